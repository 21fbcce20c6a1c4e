// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use crate::error::{MhmError, Result};

use super::{Settings, AUXILIARY, FRAMEWORK, MAX_PERIOD_SECS};

impl Settings {
    /// Reject settings the supervisor cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.framework.baseline_value == 0 {
            return Err(MhmError::Config(
                "framework.baseline_value must be greater than zero".to_string(),
            ));
        }

        let durations = [
            ("framework.tick_secs", self.framework.tick_secs),
            (
                "framework.report_interval_secs",
                self.framework.report_interval_secs,
            ),
            ("auxiliary.tick_secs", self.auxiliary.tick_secs),
            (
                "auxiliary.report_interval_secs",
                self.auxiliary.report_interval_secs,
            ),
        ];
        for (key, secs) in durations {
            if secs == 0 {
                return Err(MhmError::Config(format!("{} must be at least 1", key)));
            }
            if secs > MAX_PERIOD_SECS {
                return Err(MhmError::Config(format!(
                    "{} must be at most {}",
                    key, MAX_PERIOD_SECS
                )));
            }
        }

        for name in &self.supervisor.required_components {
            if name != FRAMEWORK && name != AUXILIARY {
                return Err(MhmError::Config(format!(
                    "unknown required component '{}'",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Apply command-line overrides for report intervals.
    pub fn with_interval_overrides(
        mut self,
        framework_secs: Option<u64>,
        auxiliary_secs: Option<u64>,
    ) -> Self {
        if let Some(secs) = framework_secs {
            self.framework.report_interval_secs = secs;
        }
        if let Some(secs) = auxiliary_secs {
            self.auxiliary.report_interval_secs = secs;
        }
        self
    }
}
