// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Optimizer factory
//!
//! Builds the optimizers enabled in settings, in a fixed order.

use crate::config::Settings;

use super::{AuxiliaryTuner, FrameworkOptimizer, Optimizer};

/// Factory for creating optimizers from settings
pub struct OptimizerFactory;

impl OptimizerFactory {
    /// Create every enabled optimizer. Disabled ones are simply absent, which
    /// the supervisor's preflight reports if they are required.
    pub fn build(settings: &Settings) -> Vec<Box<dyn Optimizer>> {
        let mut optimizers: Vec<Box<dyn Optimizer>> = Vec::new();

        if settings.framework.enabled {
            optimizers.push(Box::new(FrameworkOptimizer::new(&settings.framework)));
        } else {
            tracing::debug!("framework optimizer disabled in settings");
        }

        if settings.auxiliary.enabled {
            optimizers.push(Box::new(AuxiliaryTuner::new(&settings.auxiliary)));
        } else {
            tracing::debug!("auxiliary tuner disabled in settings");
        }

        optimizers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_all() {
        let optimizers = OptimizerFactory::build(&Settings::default());
        let names: Vec<&str> = optimizers.iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["framework", "auxiliary"]);
    }

    #[test]
    fn test_build_skips_disabled() {
        let mut settings = Settings::default();
        settings.framework.enabled = false;
        let optimizers = OptimizerFactory::build(&settings);
        assert_eq!(optimizers.len(), 1);
        assert_eq!(optimizers[0].name(), "auxiliary");
    }
}
