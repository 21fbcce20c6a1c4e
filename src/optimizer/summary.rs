// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Point-in-time snapshots reported by optimizers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Snapshot of the framework optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkSummary {
    /// Simulated throughput before any adjustment, in H/s
    pub baseline_value: u64,
    /// Simulated throughput after the current adjustment, in H/s
    pub current_value: u64,
    /// Combined improvement over baseline
    pub improvement_percent: f64,
    /// `current_value - baseline_value`
    pub improvement_absolute: u64,
    /// Slowly accumulating resonance level of the cyclic component
    pub cycle_resonance: f64,
    /// Model updates since construction
    pub cycles: u64,
    /// Per-component contribution, in percent
    pub components: BTreeMap<String, f64>,
}

/// Snapshot of the auxiliary tuner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxiliarySummary {
    /// Combined improvement, in percent
    pub total_improvement: f64,
    /// Per-component contribution, in percent
    pub named_components: BTreeMap<String, f64>,
    /// Accumulated cooling efficiency factor
    pub cooling_efficiency: f64,
    /// Stagger patterns that have contributed so far
    pub active_patterns: usize,
    /// Model updates since construction
    pub cycles: u64,
}

/// A summary from either optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "component", rename_all = "lowercase")]
pub enum Summary {
    Framework(FrameworkSummary),
    Auxiliary(AuxiliarySummary),
}

impl Summary {
    /// Name of the component that produced this summary.
    pub fn component(&self) -> &'static str {
        match self {
            Summary::Framework(_) => crate::config::FRAMEWORK,
            Summary::Auxiliary(_) => crate::config::AUXILIARY,
        }
    }

    /// Headline improvement percentage.
    pub fn improvement_percent(&self) -> f64 {
        match self {
            Summary::Framework(s) => s.improvement_percent,
            Summary::Auxiliary(s) => s.total_improvement,
        }
    }
}

impl fmt::Display for FrameworkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} H/s (+{:.2}%, +{} H/s over {} H/s baseline, cycle {})",
            self.current_value,
            self.improvement_percent,
            self.improvement_absolute,
            self.baseline_value,
            self.cycles
        )
    }
}

impl fmt::Display for AuxiliarySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{:.2}% total", self.total_improvement)?;
        if !self.named_components.is_empty() {
            let parts: Vec<String> = self
                .named_components
                .iter()
                .map(|(name, pct)| format!("{} +{:.2}%", name, pct))
                .collect();
            write!(f, " ({})", parts.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Framework(s) => write!(f, "[{}] {}", self.component(), s),
            Summary::Auxiliary(s) => write!(f, "[{}] {}", self.component(), s),
        }
    }
}
