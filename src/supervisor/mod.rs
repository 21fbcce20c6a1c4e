// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Supervisor for optimizer components.
//!
//! The supervisor owns its optimizers, starts them, and runs one report
//! loop per optimizer on that optimizer's interval. All loops share a single
//! `watch` cancellation channel that flips when the shutdown future
//! resolves. After the loops have drained, each optimizer is stopped exactly
//! once and the final summaries are returned as a [`ShutdownReport`].

use std::collections::{BTreeMap, HashMap};
use std::fs::OpenOptions;
use std::future::Future;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::config::{period_in_range, Settings, AUXILIARY, FRAMEWORK, MAX_PERIOD_SECS};
use crate::error::{MhmError, Result};
use crate::optimizer::{Optimizer, OptimizerFactory, Summary};

pub mod signal;
pub mod sink;

pub use signal::shutdown_signal;
pub use sink::{MemorySink, ReportSink, StdoutSink};

/// Report interval per component name.
#[derive(Debug, Clone, Default)]
pub struct ReportSchedule {
    intervals: HashMap<String, Duration>,
}

impl ReportSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, component: &str, interval: Duration) -> Self {
        self.intervals.insert(component.to_string(), interval);
        self
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new()
            .with(FRAMEWORK, settings.framework.report_interval())
            .with(AUXILIARY, settings.auxiliary.report_interval())
    }

    pub fn interval_for(&self, component: &str) -> Option<Duration> {
        self.intervals.get(component).copied()
    }
}

/// Outcome of an orderly shutdown.
#[derive(Debug, Clone, Serialize)]
pub struct ShutdownReport {
    pub started_at: DateTime<Utc>,
    pub stopped_at: DateTime<Utc>,
    /// Status lines emitted per component
    pub reports_emitted: BTreeMap<String, u64>,
    /// Last summary of each optimizer, taken just before it was stopped
    pub final_summaries: Vec<Summary>,
}

impl ShutdownReport {
    /// Write the report as pretty JSON into `dir`, returning the file path.
    /// An existing report is never overwritten; a `-N` suffix is added
    /// instead.
    pub fn save_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let stem = format!("run-{}", self.started_at.format("%Y%m%dT%H%M%S%.3fZ"));
        let content = serde_json::to_string_pretty(self)?;

        let mut attempt = 0u32;
        loop {
            let name = match attempt {
                0 => format!("{}.json", stem),
                n => format!("{}-{}.json", stem, n),
            };
            let path = dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(content.as_bytes())?;
                    return Ok(path);
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(err) => return Err(err.into()),
            }
        }
    }
}

/// Owns the optimizers and drives their report loops.
pub struct Supervisor {
    optimizers: Vec<Box<dyn Optimizer>>,
    schedule: ReportSchedule,
    required: Vec<String>,
    sink: Arc<dyn ReportSink>,
}

impl Supervisor {
    pub fn new(
        optimizers: Vec<Box<dyn Optimizer>>,
        schedule: ReportSchedule,
        sink: Arc<dyn ReportSink>,
    ) -> Self {
        Self {
            optimizers,
            schedule,
            required: Vec::new(),
            sink,
        }
    }

    /// Build the supervisor described by `settings`.
    pub fn from_settings(settings: &Settings, sink: Arc<dyn ReportSink>) -> Self {
        Self::new(
            OptimizerFactory::build(settings),
            ReportSchedule::from_settings(settings),
            sink,
        )
        .with_required(settings.supervisor.required_components.clone())
    }

    /// Components that must be present before anything starts.
    pub fn with_required(mut self, required: Vec<String>) -> Self {
        self.required = required;
        self
    }

    /// Names of the registered optimizers, in start order.
    pub fn components(&self) -> Vec<&str> {
        self.optimizers.iter().map(|o| o.name()).collect()
    }

    /// Check that every required component is registered and every
    /// registered optimizer has a report interval within range.
    pub fn preflight(&self) -> Result<()> {
        for name in &self.required {
            if !self.optimizers.iter().any(|o| o.name() == name) {
                tracing::error!(component = %name, "required component missing");
                return Err(MhmError::MissingComponent(name.clone()));
            }
        }
        for optimizer in &self.optimizers {
            match self.schedule.interval_for(optimizer.name()) {
                Some(interval) if period_in_range(interval) => {}
                Some(_) => {
                    return Err(MhmError::Config(format!(
                        "report interval for {} must be between 1 and {} seconds",
                        optimizer.name(),
                        MAX_PERIOD_SECS
                    )))
                }
                None => {
                    return Err(MhmError::Config(format!(
                        "no report interval for {}",
                        optimizer.name()
                    )))
                }
            }
        }
        Ok(())
    }

    /// Run until `shutdown` resolves, then stop every optimizer once.
    pub async fn run<F>(mut self, shutdown: F) -> Result<ShutdownReport>
    where
        F: Future<Output = ()>,
    {
        self.preflight()?;
        let started_at = Utc::now();
        self.start_all().await?;
        tracing::info!(components = ?self.components(), "supervisor running");

        let (cancel_tx, cancel_rx) = watch::channel(false);

        let loops: Vec<_> = self
            .optimizers
            .iter()
            .map(|optimizer| {
                // preflight guarantees an interval for every optimizer
                let period = self
                    .schedule
                    .interval_for(optimizer.name())
                    .unwrap_or(Duration::from_secs(1));
                report_loop(&**optimizer, period, &*self.sink, cancel_rx.clone())
            })
            .collect();
        drop(cancel_rx);

        let trigger = async move {
            shutdown.await;
            tracing::info!("shutdown requested");
            // Receivers outlive this send; the loops are still being polled.
            let _ = cancel_tx.send(true);
        };

        let (counts, ()) = tokio::join!(futures::future::join_all(loops), trigger);

        let reports_emitted = self
            .optimizers
            .iter()
            .map(|o| o.name().to_string())
            .zip(counts)
            .collect();

        let final_summaries = self.stop_all().await?;

        Ok(ShutdownReport {
            started_at,
            stopped_at: Utc::now(),
            reports_emitted,
            final_summaries,
        })
    }

    /// Start every optimizer; on failure, stop the ones already started.
    async fn start_all(&mut self) -> Result<()> {
        for index in 0..self.optimizers.len() {
            if let Err(err) = self.optimizers[index].start() {
                tracing::error!(
                    component = self.optimizers[index].name(),
                    error = %err,
                    "start failed"
                );
                for started in self.optimizers[..index].iter_mut() {
                    if let Err(stop_err) = started.stop().await {
                        tracing::warn!(component = started.name(), error = %stop_err, "rollback stop failed");
                    }
                }
                return Err(err.into());
            }
        }
        Ok(())
    }

    /// Stop every optimizer exactly once, even if an earlier stop fails.
    async fn stop_all(&mut self) -> Result<Vec<Summary>> {
        let mut summaries = Vec::with_capacity(self.optimizers.len());
        let mut first_error = None;

        for optimizer in self.optimizers.iter_mut() {
            if let Ok(summary) = optimizer.summary() {
                summaries.push(summary);
            }
            match optimizer.stop().await {
                Ok(()) => tracing::info!(component = optimizer.name(), "stopped"),
                Err(err) => {
                    tracing::error!(component = optimizer.name(), error = %err, "stop failed");
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(summaries),
        }
    }
}

/// Emit one summary per `period` until cancelled. The first report fires a
/// full period after the loop begins. Returns the number of reports emitted.
async fn report_loop(
    optimizer: &dyn Optimizer,
    period: Duration,
    sink: &dyn ReportSink,
    mut cancel: watch::Receiver<bool>,
) -> u64 {
    let mut ticks = interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut emitted = 0;

    loop {
        if *cancel.borrow() {
            break;
        }
        tokio::select! {
            biased;
            changed = cancel.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = ticks.tick() => match optimizer.summary() {
                Ok(summary) => {
                    sink.emit(&summary);
                    emitted += 1;
                }
                Err(err) => {
                    tracing::warn!(component = optimizer.name(), error = %err, "summary unavailable");
                }
            },
        }
    }

    tracing::debug!(component = optimizer.name(), emitted, "report loop finished");
    emitted
}
