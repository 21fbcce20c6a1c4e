// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! mhm - supervisor for simulated optimizer components.
//!
//! Architecture highlights:
//! - `optimizer`: the start/stop/summary contract and its two implementations
//! - `supervisor`: owns the optimizers, runs one report loop per optimizer,
//!   and stops everything once on shutdown
//! - `config`: JSON settings with defaults, validation, and legacy migration
//! - `system`: host profile, thermal sampling, and requirement checks
//! - `commands`, `cli`: the `mhm` binary surface
//!
//! Figures reported by the optimizers come from bounded synthetic models.
//! They are placeholders for display and do not measure any real workload.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod optimizer;
pub mod supervisor;
pub mod system;

pub use error::{MhmError, Result};
