// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Where settings and run results live on disk, and how they are written.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::Result;

use super::migration;
use super::Settings;

const HOME_ENV: &str = "MHM_HOME";
const SETTINGS_FILE: &str = "settings.json";
const RESULTS_DIR: &str = "results";

impl Settings {
    /// `$MHM_HOME`, or `~/.mhm` when unset.
    pub fn mhm_home() -> PathBuf {
        match std::env::var_os(HOME_ENV) {
            Some(home) => PathBuf::from(home),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".mhm"),
        }
    }

    pub fn default_path() -> PathBuf {
        Self::mhm_home().join(SETTINGS_FILE)
    }

    /// Destination of `run-*.json` shutdown reports.
    pub fn results_dir() -> PathBuf {
        Self::mhm_home().join(RESULTS_DIR)
    }

    /// Directories a run writes into, in creation order.
    pub fn working_dirs() -> [PathBuf; 2] {
        [Self::mhm_home(), Self::results_dir()]
    }

    /// Create every working directory that does not exist yet.
    pub fn ensure_directories() -> Result<()> {
        for dir in Self::working_dirs() {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(())
    }

    /// Read settings from `path`. An absent file yields the defaults; a
    /// legacy `asic` section is renamed before parsing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        Ok(serde_json::from_value(migration::migrate_on_load(raw))?)
    }

    /// Write settings to `path`, layered over whatever the file already
    /// holds so keys this version does not know survive. An unreadable
    /// file is replaced.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let current = serde_json::to_value(self)?;
        let merged = match std::fs::read_to_string(path) {
            Ok(existing) => match serde_json::from_str::<Value>(&existing) {
                Ok(previous) => migration::deep_merge(previous, current),
                Err(_) => current,
            },
            Err(_) => current,
        };
        write_json(path, &merged)
    }

    /// Write settings to `path`, dropping anything else in the file.
    pub fn save_to_clean(&self, path: &Path) -> Result<()> {
        write_json(path, &serde_json::to_value(self)?)
    }
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
