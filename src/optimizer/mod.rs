// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Optimizer components and their shared contract.
//!
//! Every optimizer moves between two states:
//!
//! ```text
//! Idle --start()--> Running --stop()--> Idle
//! ```
//!
//! - `start` on a running optimizer fails with `AlreadyRunning`
//! - `stop` on an idle optimizer is a no-op
//! - `summary` on an idle optimizer fails with `NotRunning`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::OptimizerError;

pub mod auxiliary;
pub mod factory;
pub mod framework;
pub mod runner;
pub mod summary;

pub use auxiliary::{AuxiliaryModel, AuxiliaryTuner};
pub use factory::OptimizerFactory;
pub use framework::{FrameworkModel, FrameworkOptimizer};
pub use summary::{AuxiliarySummary, FrameworkSummary, Summary};

/// Lifecycle state of an optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerState {
    Idle,
    Running,
}

/// A start/stop/report component owned by the supervisor.
#[async_trait]
pub trait Optimizer: Send + Sync {
    /// Stable component name (e.g., "framework")
    fn name(&self) -> &str;

    /// Current lifecycle state
    fn state(&self) -> OptimizerState;

    /// Transition Idle -> Running. Requires a tokio runtime.
    fn start(&mut self) -> Result<(), OptimizerError>;

    /// Transition Running -> Idle and release the tick task
    async fn stop(&mut self) -> Result<(), OptimizerError>;

    /// Current snapshot while running
    fn summary(&self) -> Result<Summary, OptimizerError>;
}

/// Clamp a model output into `[0, cap]`, treating NaN as zero.
pub(crate) fn bounded(value: f64, cap: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded() {
        assert_eq!(bounded(f64::NAN, 0.1), 0.0);
        assert_eq!(bounded(f64::INFINITY, 0.1), 0.1);
        assert_eq!(bounded(-0.5, 0.1), 0.0);
        assert_eq!(bounded(0.05, 0.1), 0.05);
    }
}
