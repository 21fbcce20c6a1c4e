// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Framework optimizer.
//!
//! Reports a simulated throughput and its improvement over a fixed baseline.
//! The improvement is a bounded combination of four synthetic signals; it is
//! an illustrative placeholder and does not measure or change any real miner.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::runner::{Model, Ticker};
use super::{bounded, FrameworkSummary, Optimizer, OptimizerState, Summary};
use crate::config::{FrameworkConfig, FRAMEWORK};
use crate::error::OptimizerError;

const HARMONIC_WEIGHTS: [f64; 3] = [1.0, 0.618, 0.382];
const HARMONIC_SCALE: f64 = 0.12;
const HARMONIC_CAP: f64 = 0.25;

const CYCLIC_ACCELERATION: f64 = 2.380;
const CYCLIC_CAP: f64 = 0.15;

const MODULATION_CAP: f64 = 0.08;

const PHASE_LEVEL: f64 = 0.82;

const TOTAL_SCALE: f64 = 1.2;
const TOTAL_CAP: f64 = 0.25;

/// Per-component factors from one model step, as fractions of baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameworkBreakdown {
    pub harmonic: f64,
    pub cyclic: f64,
    pub modulation: f64,
    pub phase: f64,
    pub total: f64,
}

/// Synthetic model behind the framework optimizer.
#[derive(Debug, Clone)]
pub struct FrameworkModel {
    baseline_value: u64,
    cycles: u64,
    resonance: f64,
}

impl FrameworkModel {
    pub fn new(baseline_value: u64) -> Self {
        Self {
            baseline_value,
            cycles: 0,
            resonance: 0.0,
        }
    }

    fn harmonic(t: f64) -> f64 {
        let [primary, secondary, tertiary] = HARMONIC_WEIGHTS;
        let sum = (0.1 * t).sin().abs() * primary
            + (0.15 * t).cos().abs() * secondary
            + (0.08 * t).sin().abs() * tertiary;
        bounded(sum * HARMONIC_SCALE, HARMONIC_CAP)
    }

    /// Sawtooth contributions on 3, 6 and 9 cycle periods.
    fn cyclic(&mut self) -> f64 {
        let c = self.cycles;
        let boost = ((c % 3) as f64 * 0.03 + (c % 6) as f64 * 0.02 + (c % 9) as f64 * 0.015)
            * CYCLIC_ACCELERATION;
        self.resonance += boost * 0.001;
        bounded(boost, CYCLIC_CAP)
    }

    fn modulation(t: f64) -> f64 {
        let value = (0.12 * t).sin().abs() * 0.04 + (0.07 * t).cos().abs() * 0.03;
        bounded(value, MODULATION_CAP)
    }

    fn phase(t: f64) -> f64 {
        bounded((PHASE_LEVEL * 0.05 * (0.09 * t).sin()).abs(), PHASE_LEVEL * 0.05)
    }

    /// Compute one step's breakdown and advance the cycle counter.
    pub fn breakdown(&mut self, t: f64) -> FrameworkBreakdown {
        let harmonic = Self::harmonic(t);
        let cyclic = self.cyclic();
        let modulation = Self::modulation(t);
        let phase = Self::phase(t);
        let total = bounded(
            (harmonic + cyclic + modulation + phase) * TOTAL_SCALE,
            TOTAL_CAP,
        );
        self.cycles += 1;
        FrameworkBreakdown {
            harmonic,
            cyclic,
            modulation,
            phase,
            total,
        }
    }
}

impl Model for FrameworkModel {
    type Snapshot = FrameworkSummary;

    fn step(&mut self, t: f64) -> FrameworkSummary {
        let b = self.breakdown(t);
        let current_value = (self.baseline_value as f64 * (1.0 + b.total)).floor() as u64;

        let mut components = BTreeMap::new();
        components.insert("harmonic".to_string(), b.harmonic * 100.0);
        components.insert("cyclic".to_string(), b.cyclic * 100.0);
        components.insert("modulation".to_string(), b.modulation * 100.0);
        components.insert("phase".to_string(), b.phase * 100.0);

        FrameworkSummary {
            baseline_value: self.baseline_value,
            current_value,
            improvement_percent: b.total * 100.0,
            improvement_absolute: current_value.saturating_sub(self.baseline_value),
            cycle_resonance: self.resonance,
            cycles: self.cycles,
            components,
        }
    }
}

/// Optimizer A: throughput value plus improvement percentage.
pub struct FrameworkOptimizer {
    ticker: Ticker<FrameworkModel>,
}

impl FrameworkOptimizer {
    pub fn new(config: &FrameworkConfig) -> Self {
        Self {
            ticker: Ticker::new(
                FRAMEWORK,
                config.tick(),
                FrameworkModel::new(config.baseline_value),
            ),
        }
    }
}

#[async_trait]
impl Optimizer for FrameworkOptimizer {
    fn name(&self) -> &str {
        self.ticker.name()
    }

    fn state(&self) -> OptimizerState {
        self.ticker.state()
    }

    fn start(&mut self) -> Result<(), OptimizerError> {
        self.ticker.start()
    }

    async fn stop(&mut self) -> Result<(), OptimizerError> {
        self.ticker.stop().await
    }

    fn summary(&self) -> Result<Summary, OptimizerError> {
        self.ticker.snapshot().map(Summary::Framework)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cyclic_sawtooth() {
        let mut model = FrameworkModel::new(3779);
        // cycle 0 contributes nothing; cycle 1 is 0.065 * 2.38, above the cap
        assert_eq!(model.breakdown(0.0).cyclic, 0.0);
        assert_eq!(model.breakdown(0.0).cyclic, CYCLIC_CAP);
        // cycle 9 is (0 + 3 * 0.02 + 0) * 2.38, below the cap
        for _ in 2..9 {
            model.breakdown(0.0);
        }
        let ninth = model.breakdown(0.0).cyclic;
        assert!((ninth - 0.06 * CYCLIC_ACCELERATION).abs() < 1e-12);
    }

    #[test]
    fn test_resonance_accumulates() {
        let mut model = FrameworkModel::new(3779);
        for _ in 0..5 {
            model.step(1.0);
        }
        let summary = model.step(1.0);
        assert!(summary.cycle_resonance > 0.0);
        assert_eq!(summary.cycles, 6);
    }

    #[test]
    fn test_current_value_matches_improvement() {
        let mut model = FrameworkModel::new(3779);
        let summary = model.step(12.5);
        let expected = (3779.0 * (1.0 + summary.improvement_percent / 100.0)).floor() as u64;
        assert_eq!(summary.current_value, expected);
        assert_eq!(
            summary.improvement_absolute,
            summary.current_value - summary.baseline_value
        );
        assert_eq!(summary.components.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_optimizer_lifecycle() {
        let mut optimizer = FrameworkOptimizer::new(&FrameworkConfig::default());
        assert_eq!(optimizer.state(), OptimizerState::Idle);
        assert!(optimizer.summary().is_err());

        optimizer.start().unwrap();
        assert_eq!(optimizer.state(), OptimizerState::Running);
        let summary = optimizer.summary().unwrap();
        assert_eq!(summary.component(), "framework");

        optimizer.stop().await.unwrap();
        assert_eq!(optimizer.state(), OptimizerState::Idle);
        assert!(matches!(
            optimizer.summary(),
            Err(OptimizerError::NotRunning(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_improvement_bounded(t in 0.0f64..1.0e7, warmup in 0usize..40) {
            let mut model = FrameworkModel::new(3779);
            for _ in 0..warmup {
                model.step(t);
            }
            let summary = model.step(t);
            prop_assert!(summary.improvement_percent.is_finite());
            prop_assert!(summary.improvement_percent >= 0.0);
            prop_assert!(summary.improvement_percent <= TOTAL_CAP * 100.0 + 1e-9);
            prop_assert!(summary.current_value >= summary.baseline_value);
            for value in summary.components.values() {
                prop_assert!(*value >= 0.0 && value.is_finite());
            }
        }
    }
}
