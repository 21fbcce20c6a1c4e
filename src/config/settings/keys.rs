// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::str::FromStr;

use crate::error::{MhmError, Result};

use super::Settings;

/// Keys accepted by `mhm settings set`.
pub const SETTABLE_KEYS: &[&str] = &[
    "framework.enabled",
    "framework.baseline_value",
    "framework.tick_secs",
    "framework.report_interval_secs",
    "auxiliary.enabled",
    "auxiliary.tick_secs",
    "auxiliary.report_interval_secs",
    "output.color",
    "output.save_results",
];

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| MhmError::InvalidInput(format!("Invalid value '{}' for {}", value, key)))
}

impl Settings {
    /// Set a single value by dotted key, then re-validate.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "framework.enabled" => self.framework.enabled = parse(key, value)?,
            "framework.baseline_value" => self.framework.baseline_value = parse(key, value)?,
            "framework.tick_secs" => self.framework.tick_secs = parse(key, value)?,
            "framework.report_interval_secs" => {
                self.framework.report_interval_secs = parse(key, value)?
            }
            "auxiliary.enabled" => self.auxiliary.enabled = parse(key, value)?,
            "auxiliary.tick_secs" => self.auxiliary.tick_secs = parse(key, value)?,
            "auxiliary.report_interval_secs" => {
                self.auxiliary.report_interval_secs = parse(key, value)?
            }
            "output.color" => self.output.color = parse(key, value)?,
            "output.save_results" => self.output.save_results = parse(key, value)?,
            _ => {
                return Err(MhmError::InvalidInput(format!(
                    "Unknown key '{}'. Valid keys: {}",
                    key,
                    SETTABLE_KEYS.join(", ")
                )))
            }
        }
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_interval() {
        let mut settings = Settings::default();
        settings
            .set_value("auxiliary.report_interval_secs", "15")
            .unwrap();
        assert_eq!(settings.auxiliary.report_interval_secs, 15);
    }

    #[test]
    fn test_set_bool() {
        let mut settings = Settings::default();
        settings.set_value("output.color", "false").unwrap();
        assert!(!settings.output.color);
    }

    #[test]
    fn test_set_bad_value() {
        let mut settings = Settings::default();
        let err = settings.set_value("framework.tick_secs", "fast").unwrap_err();
        assert!(matches!(err, MhmError::InvalidInput(_)));
    }

    #[test]
    fn test_set_unknown_key() {
        let mut settings = Settings::default();
        let err = settings.set_value("framework.colour", "1").unwrap_err();
        assert!(err.to_string().contains("Unknown key"));
    }

    #[test]
    fn test_set_zero_interval_fails_validation() {
        let mut settings = Settings::default();
        let err = settings
            .set_value("framework.report_interval_secs", "0")
            .unwrap_err();
        assert!(matches!(err, MhmError::Config(_)));
    }
}
