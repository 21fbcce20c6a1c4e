// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management command

use std::path::Path;

use crate::cli::{SettingsArgs, SettingsCommands};
use crate::config::Settings;
use crate::error::Result;

/// Execute the settings command against the file at `path`
pub fn execute(args: SettingsArgs, mut settings: Settings, path: &Path) -> Result<()> {
    match args.command {
        None | Some(SettingsCommands::Show) => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Some(SettingsCommands::Set { key, value }) => {
            settings.set_value(&key, &value)?;
            settings.save_to(path)?;
            println!("Set {} = {}", key, value);
        }
        Some(SettingsCommands::Path) => {
            println!("{}", path.display());
        }
        Some(SettingsCommands::Reset) => {
            Settings::default().save_to_clean(path)?;
            println!("Settings reset to defaults at {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let args = SettingsArgs {
            command: Some(SettingsCommands::Set {
                key: "framework.tick_secs".to_string(),
                value: "3".to_string(),
            }),
        };
        execute(args, Settings::default(), &path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap().framework.tick_secs, 3);
    }

    #[test]
    fn test_reset_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"framework": {"tick_secs": 9}, "extra": 1}"#).unwrap();
        let args = SettingsArgs {
            command: Some(SettingsCommands::Reset),
        };
        execute(args, Settings::default(), &path).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get("extra").is_none());
        assert_eq!(raw["framework"]["tick_secs"], 10);
    }
}
