// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for mhm
//!
//! Handles loading and saving settings from ~/.mhm/settings.json

use serde::{Deserialize, Serialize};
use std::time::Duration;

mod io;
mod keys;
mod migration;
mod validation;

pub use keys::SETTABLE_KEYS;

/// Component name of the framework optimizer.
pub const FRAMEWORK: &str = "framework";

/// Component name of the auxiliary tuner.
pub const AUXILIARY: &str = "auxiliary";

/// Longest accepted tick or report period, in seconds (one day).
pub const MAX_PERIOD_SECS: u64 = 86_400;

/// Whether `period` is usable as a tick or report interval.
pub fn period_in_range(period: Duration) -> bool {
    !period.is_zero() && period <= Duration::from_secs(MAX_PERIOD_SECS)
}

/// Main settings structure, stored in ~/.mhm/settings.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Framework optimizer settings
    #[serde(default)]
    pub framework: FrameworkConfig,

    /// Auxiliary tuner settings
    #[serde(default)]
    pub auxiliary: AuxiliaryConfig,

    /// Supervisor settings
    #[serde(default)]
    pub supervisor: SupervisorConfig,

    /// Status output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Framework optimizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkConfig {
    /// Whether the optimizer is registered with the supervisor
    pub enabled: bool,

    /// Simulated baseline throughput in H/s
    pub baseline_value: u64,

    /// Seconds between model updates
    pub tick_secs: u64,

    /// Seconds between status reports
    pub report_interval_secs: u64,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            baseline_value: 3779,
            tick_secs: 10,
            report_interval_secs: 30,
        }
    }
}

impl FrameworkConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_secs(self.tick_secs)
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }
}

/// Auxiliary tuner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuxiliaryConfig {
    /// Whether the tuner is registered with the supervisor
    pub enabled: bool,

    /// Seconds between model updates
    pub tick_secs: u64,

    /// Seconds between status reports
    pub report_interval_secs: u64,
}

impl Default for AuxiliaryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_secs: 10,
            report_interval_secs: 60,
        }
    }
}

impl AuxiliaryConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_secs(self.tick_secs)
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }
}

/// Supervisor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    /// Components that must be registered before anything starts
    pub required_components: Vec<String>,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            required_components: vec![FRAMEWORK.to_string(), AUXILIARY.to_string()],
        }
    }
}

/// Status output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Colorize text status lines
    pub color: bool,

    /// Write a results file on orderly shutdown
    pub save_results: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            save_results: true,
        }
    }
}
