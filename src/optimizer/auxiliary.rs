// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Auxiliary tuner.
//!
//! Reports a breakdown of four named contributions and their total. Each
//! contribution is a synthetic, capped signal kept for illustration only.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use async_trait::async_trait;

use super::runner::{Model, Ticker};
use super::{bounded, AuxiliarySummary, Optimizer, OptimizerState, Summary};
use crate::config::{AuxiliaryConfig, AUXILIARY};
use crate::error::OptimizerError;

const SWITCHING_FREQUENCIES: [f64; 8] = [3.0, 6.0, 9.0, 12.0, 18.0, 27.0, 36.0, 54.0];
const SWITCHING_PATTERNS: [u32; 9] = [5, 3, 7, 6, 8, 4, 9, 2, 1];
const SWITCHING_CAP: f64 = 0.08;
const THERMAL_CAP: f64 = 0.06;
const STAGGER_CAP: f64 = 0.05;
const RECOVERY_CAP: f64 = 0.04;

const TOTAL_SCALE: f64 = 1.1;
const TOTAL_CAP: f64 = 0.12;

#[derive(Debug, Clone, Default)]
struct Switching {
    voltage: f64,
    current: f64,
    alignment: f64,
}

impl Switching {
    fn sum(&self) -> f64 {
        self.voltage + self.current + self.alignment
    }
}

#[derive(Debug, Clone)]
struct Thermal {
    spreading: f64,
    vias: f64,
    cooling: f64,
}

#[derive(Debug, Clone, Default)]
struct Stagger {
    patterns: [f64; 3],
}

#[derive(Debug, Clone)]
struct Recovery {
    charge: f64,
    harvest: f64,
    efficiency: f64,
}

/// Per-component factors from one model step, as fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuxiliaryBreakdown {
    pub switching: f64,
    pub thermal: f64,
    pub stagger: f64,
    pub recovery: f64,
    pub total: f64,
}

/// Synthetic model behind the auxiliary tuner.
///
/// The thermal, stagger and recovery accumulators only grow, so those
/// contributions saturate at their caps after enough cycles.
#[derive(Debug, Clone)]
pub struct AuxiliaryModel {
    switching: Switching,
    thermal: Thermal,
    stagger: Stagger,
    recovery: Recovery,
    cycles: u64,
}

impl Default for AuxiliaryModel {
    fn default() -> Self {
        Self {
            switching: Switching::default(),
            thermal: Thermal {
                spreading: 1.0,
                vias: 0.0,
                cooling: 1.0,
            },
            stagger: Stagger::default(),
            recovery: Recovery {
                charge: 0.0,
                harvest: 0.0,
                efficiency: 1.0,
            },
            cycles: 0,
        }
    }
}

impl AuxiliaryModel {
    pub fn new() -> Self {
        Self::default()
    }

    fn switching(&mut self, t: f64) -> f64 {
        self.switching.voltage = SWITCHING_FREQUENCIES
            .iter()
            .map(|f| (f * PI / 18.0 + t * 0.1).sin() * 0.008)
            .filter(|v| *v > 0.004)
            .sum();

        let swing = (t * 0.08).cos();
        self.switching.current = SWITCHING_PATTERNS
            .iter()
            .map(|p| ((p % 3) as f64 * 0.015 * swing).abs())
            .sum();

        self.switching.alignment = self.switching.voltage * self.switching.current * 0.3;
        bounded(self.switching.sum() * 0.12, SWITCHING_CAP)
    }

    fn thermal(&mut self, t: f64) -> f64 {
        self.thermal.spreading += 4.0_f64.log10() * 0.12 * 0.01;
        self.thermal.vias += (0.06 * (t * 0.09).sin()).abs();
        self.thermal.cooling += self.thermal.spreading * 0.08;
        let sum = self.thermal.spreading + self.thermal.vias + self.thermal.cooling;
        bounded((sum - 2.0) * 0.10, THERMAL_CAP)
    }

    fn stagger(&mut self, t: f64) -> f64 {
        let increments = [
            (0.10 * (t * 0.12).sin()).abs(),
            (0.08 * (t * 0.11).cos()).abs(),
            (0.12 * (t * 0.13).sin()).abs(),
        ];
        for (pattern, inc) in self.stagger.patterns.iter_mut().zip(increments) {
            *pattern += inc;
        }
        bounded(self.stagger.patterns.iter().sum::<f64>() * 0.15, STAGGER_CAP)
    }

    fn recovery(&mut self, t: f64) -> f64 {
        self.recovery.charge += (0.04 * (t * 0.06).cos()).abs();
        self.recovery.harvest += 0.03 * (self.switching.sum() / 3.0);
        self.recovery.efficiency += (self.recovery.charge + self.recovery.harvest) * 0.25;
        let sum = self.recovery.charge + self.recovery.harvest + self.recovery.efficiency;
        bounded((sum - 1.0) * 0.08, RECOVERY_CAP)
    }

    /// Compute one step's breakdown and advance the cycle counter.
    pub fn breakdown(&mut self, t: f64) -> AuxiliaryBreakdown {
        // Recovery reads the switching state, so switching runs first.
        let switching = self.switching(t);
        let thermal = self.thermal(t);
        let stagger = self.stagger(t);
        let recovery = self.recovery(t);
        let total = bounded(
            (switching + thermal + stagger + recovery) * TOTAL_SCALE,
            TOTAL_CAP,
        );
        self.cycles += 1;
        AuxiliaryBreakdown {
            switching,
            thermal,
            stagger,
            recovery,
            total,
        }
    }
}

impl Model for AuxiliaryModel {
    type Snapshot = AuxiliarySummary;

    fn step(&mut self, t: f64) -> AuxiliarySummary {
        let b = self.breakdown(t);

        let mut named_components = BTreeMap::new();
        named_components.insert("switching".to_string(), b.switching * 100.0);
        named_components.insert("thermal".to_string(), b.thermal * 100.0);
        named_components.insert("stagger".to_string(), b.stagger * 100.0);
        named_components.insert("recovery".to_string(), b.recovery * 100.0);

        AuxiliarySummary {
            total_improvement: b.total * 100.0,
            named_components,
            cooling_efficiency: self.thermal.cooling,
            active_patterns: self.stagger.patterns.iter().filter(|p| **p > 0.0).count(),
            cycles: self.cycles,
        }
    }
}

/// Optimizer B: named sub-improvements and their total.
pub struct AuxiliaryTuner {
    ticker: Ticker<AuxiliaryModel>,
}

impl AuxiliaryTuner {
    pub fn new(config: &AuxiliaryConfig) -> Self {
        Self {
            ticker: Ticker::new(AUXILIARY, config.tick(), AuxiliaryModel::new()),
        }
    }
}

#[async_trait]
impl Optimizer for AuxiliaryTuner {
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
        self.ticker.snapshot().map(Summary::Auxiliary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accumulating_components_saturate() {
        let mut model = AuxiliaryModel::new();
        let last = (0..500)
            .map(|i| model.breakdown(1.0 + i as f64 * 10.0))
            .last()
            .unwrap();
        assert_eq!(last.thermal, THERMAL_CAP);
        assert_eq!(last.stagger, STAGGER_CAP);
        assert_eq!(last.recovery, RECOVERY_CAP);
    }

    #[test]
    fn test_summary_has_four_named_components() {
        let mut model = AuxiliaryModel::new();
        let summary = model.step(3.0);
        let names: Vec<&str> = summary.named_components.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["recovery", "stagger", "switching", "thermal"]);
        assert_eq!(summary.cycles, 1);
        assert!(summary.cooling_efficiency > 1.0);
    }

    #[test]
    fn test_total_is_scaled_sum() {
        let mut model = AuxiliaryModel::new();
        let b = model.breakdown(2.0);
        let expected = ((b.switching + b.thermal + b.stagger + b.recovery) * TOTAL_SCALE)
            .min(TOTAL_CAP);
        assert!((b.total - expected).abs() < 1e-12);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tuner_lifecycle() {
        let mut tuner = AuxiliaryTuner::new(&AuxiliaryConfig::default());
        tuner.start().unwrap();
        assert!(matches!(tuner.summary(), Ok(Summary::Auxiliary(_))));
        assert!(matches!(
            tuner.start(),
            Err(OptimizerError::AlreadyRunning(_))
        ));
        tuner.stop().await.unwrap();
        tuner.stop().await.unwrap();
        assert_eq!(tuner.state(), OptimizerState::Idle);
    }

    proptest! {
        #[test]
        fn prop_total_bounded(t in 0.0f64..1.0e7, warmup in 0usize..60) {
            let mut model = AuxiliaryModel::new();
            for i in 0..warmup {
                model.step(t + i as f64);
            }
            let summary = model.step(t);
            prop_assert!(summary.total_improvement.is_finite());
            prop_assert!(summary.total_improvement >= 0.0);
            prop_assert!(summary.total_improvement <= TOTAL_CAP * 100.0 + 1e-9);
        }
    }
}
