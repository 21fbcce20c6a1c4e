// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Host inspection for the `system` command and run-time thermal warnings.

pub mod profile;
pub mod requirements;
pub mod thermal;

pub use profile::*;
pub use requirements::*;
pub use thermal::*;
