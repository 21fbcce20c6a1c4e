// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Subcommand implementations.

pub mod run;
pub mod settings;
pub mod summary;
pub mod system;
