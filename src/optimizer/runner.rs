// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Background tick task shared by both optimizers.
//!
//! A [`Ticker`] owns a model. While running, the model lives inside a tokio
//! task that advances it once per tick and publishes the latest snapshot.
//! Stopping the ticker hands the model back, so a restart resumes from the
//! same model state.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::OptimizerState;
use crate::config::period_in_range;
use crate::error::OptimizerError;

/// A deterministic model advanced once per tick.
pub trait Model: Send + Sync + 'static {
    type Snapshot: Clone + Send + Sync + 'static;

    /// Advance one cycle at `t` seconds since the ticker was created.
    fn step(&mut self, t: f64) -> Self::Snapshot;
}

struct Running<M> {
    stop_tx: oneshot::Sender<()>,
    handle: JoinHandle<M>,
}

/// Drives a [`Model`] on its own tokio task.
pub struct Ticker<M: Model> {
    name: &'static str,
    tick: Duration,
    origin: Instant,
    model: Option<M>,
    running: Option<Running<M>>,
    latest: Arc<RwLock<Option<M::Snapshot>>>,
}

impl<M: Model> Ticker<M> {
    pub fn new(name: &'static str, tick: Duration, model: M) -> Self {
        Self {
            name,
            tick,
            origin: Instant::now(),
            model: Some(model),
            running: None,
            latest: Arc::new(RwLock::new(None)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> OptimizerState {
        if self.running.is_some() {
            OptimizerState::Running
        } else {
            OptimizerState::Idle
        }
    }

    /// Spawn the tick task. Must be called from within a tokio runtime.
    pub fn start(&mut self) -> Result<(), OptimizerError> {
        if self.running.is_some() {
            return Err(OptimizerError::AlreadyRunning(self.name.to_string()));
        }
        if !period_in_range(self.tick) {
            return Err(OptimizerError::InvalidPeriod {
                name: self.name.to_string(),
                secs: self.tick.as_secs(),
            });
        }
        let mut model = self.model.take().ok_or_else(|| OptimizerError::TaskFailed {
            name: self.name.to_string(),
            reason: "model lost by a previous run".to_string(),
        })?;

        // Publish an initial snapshot so `snapshot()` never observes a gap.
        let initial = model.step(self.origin.elapsed().as_secs_f64());
        self.publish(initial);

        let (stop_tx, mut stop_rx) = oneshot::channel();
        let latest = Arc::clone(&self.latest);
        let origin = self.origin;
        let tick = self.tick;
        let name = self.name;

        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + tick, tick);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticks.tick() => {
                        let snapshot = model.step(origin.elapsed().as_secs_f64());
                        store(&latest, Some(snapshot));
                        tracing::trace!(component = name, "model tick");
                    }
                }
            }
            model
        });

        self.running = Some(Running { stop_tx, handle });
        tracing::debug!(component = self.name, tick_secs = self.tick.as_secs(), "started");
        Ok(())
    }

    /// Stop the tick task and reclaim the model. No-op when idle.
    pub async fn stop(&mut self) -> Result<(), OptimizerError> {
        let Some(Running { stop_tx, handle }) = self.running.take() else {
            return Ok(());
        };

        // The task may already have exited; the join below reports why.
        let _ = stop_tx.send(());
        self.clear();

        match handle.await {
            Ok(model) => {
                self.model = Some(model);
                tracing::debug!(component = self.name, "stopped");
                Ok(())
            }
            Err(err) => Err(OptimizerError::TaskFailed {
                name: self.name.to_string(),
                reason: err.to_string(),
            }),
        }
    }

    /// Latest published snapshot while running.
    pub fn snapshot(&self) -> Result<M::Snapshot, OptimizerError> {
        if self.running.is_none() {
            return Err(OptimizerError::NotRunning(self.name.to_string()));
        }
        let slot = self.latest.read().unwrap_or_else(|e| e.into_inner());
        slot.clone()
            .ok_or_else(|| OptimizerError::NotRunning(self.name.to_string()))
    }

    fn publish(&self, snapshot: M::Snapshot) {
        store(&self.latest, Some(snapshot));
    }

    fn clear(&self) {
        store(&self.latest, None);
    }
}

fn store<S>(slot: &RwLock<Option<S>>, value: Option<S>) {
    let mut guard = slot.write().unwrap_or_else(|e| e.into_inner());
    *guard = value;
}

impl<M: Model> Drop for Ticker<M> {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            running.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        steps: u64,
    }

    impl Model for Counter {
        type Snapshot = u64;

        fn step(&mut self, _t: f64) -> u64 {
            self.steps += 1;
            self.steps
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_snapshot_then_ticks() {
        let mut ticker = Ticker::new("counter", Duration::from_secs(10), Counter::default());
        ticker.start().unwrap();
        assert_eq!(ticker.snapshot().unwrap(), 1);

        tokio::time::sleep(Duration::from_secs(9)).await;
        assert_eq!(ticker.snapshot().unwrap(), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(ticker.snapshot().unwrap(), 2);

        ticker.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_fails() {
        let mut ticker = Ticker::new("counter", Duration::from_secs(1), Counter::default());
        ticker.start().unwrap();
        assert_eq!(
            ticker.start(),
            Err(OptimizerError::AlreadyRunning("counter".to_string()))
        );
        ticker.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_tick_refuses_to_start() {
        for tick in [Duration::ZERO, Duration::from_secs(u64::MAX)] {
            let mut ticker = Ticker::new("counter", tick, Counter::default());
            assert_eq!(
                ticker.start(),
                Err(OptimizerError::InvalidPeriod {
                    name: "counter".to_string(),
                    secs: tick.as_secs(),
                })
            );
            assert_eq!(ticker.state(), OptimizerState::Idle);
            assert!(ticker.model.is_some());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_idle_is_noop() {
        let mut ticker = Ticker::new("counter", Duration::from_secs(1), Counter::default());
        assert!(ticker.stop().await.is_ok());
        assert_eq!(ticker.state(), OptimizerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resumes_model_state() {
        let mut ticker = Ticker::new("counter", Duration::from_secs(5), Counter::default());
        ticker.start().unwrap();
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(ticker.snapshot().unwrap(), 2);
        ticker.stop().await.unwrap();

        assert_eq!(
            ticker.snapshot(),
            Err(OptimizerError::NotRunning("counter".to_string()))
        );

        ticker.start().unwrap();
        assert_eq!(ticker.snapshot().unwrap(), 3);
        ticker.stop().await.unwrap();
    }
}
