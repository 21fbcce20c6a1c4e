// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for mhm
//!
//! This module defines all error types used throughout the application.

use thiserror::Error;

/// Main error type for mhm operations
#[derive(Error, Debug)]
pub enum MhmError {
    /// Optimizer lifecycle errors
    #[error("Optimizer error: {0}")]
    Optimizer(#[from] OptimizerError),

    /// A required component is not registered with the supervisor
    #[error("Required component not found: {0}")]
    MissingComponent(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Background task errors
    #[error("Task error: {0}")]
    Task(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Optimizer state machine errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptimizerError {
    /// `start` was called on a running optimizer
    #[error("{0} is already running")]
    AlreadyRunning(String),

    /// A summary was requested from an idle optimizer
    #[error("{0} is not running")]
    NotRunning(String),

    /// The tick period is zero or longer than the supported maximum
    #[error("{name} tick period of {secs}s is out of range")]
    InvalidPeriod { name: String, secs: u64 },

    /// The optimizer's tick task panicked or was aborted
    #[error("{name} tick task failed: {reason}")]
    TaskFailed { name: String, reason: String },
}

/// Result type alias for mhm operations
pub type Result<T> = std::result::Result<T, MhmError>;

impl From<tokio::task::JoinError> for MhmError {
    fn from(err: tokio::task::JoinError) -> Self {
        MhmError::Task(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_component_display() {
        let err = MhmError::MissingComponent("auxiliary".to_string());
        assert_eq!(err.to_string(), "Required component not found: auxiliary");
    }

    #[test]
    fn test_config_error_display() {
        let err = MhmError::Config("bad interval".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("bad interval"));
    }

    #[test]
    fn test_optimizer_error_wraps() {
        let err: MhmError = OptimizerError::NotRunning("framework".to_string()).into();
        assert!(matches!(err, MhmError::Optimizer(OptimizerError::NotRunning(_))));
        assert_eq!(
            err.to_string(),
            "Optimizer error: framework is not running"
        );
    }

    #[test]
    fn test_task_failed_display() {
        let err = OptimizerError::TaskFailed {
            name: "auxiliary".to_string(),
            reason: "panicked".to_string(),
        };
        assert_eq!(err.to_string(), "auxiliary tick task failed: panicked");
    }

    #[test]
    fn test_invalid_period_display() {
        let err = OptimizerError::InvalidPeriod {
            name: "framework".to_string(),
            secs: 0,
        };
        assert_eq!(err.to_string(), "framework tick period of 0s is out of range");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: MhmError = io_err.into();
        assert!(matches!(err, MhmError::Io(_)));
    }
}
