// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for mhm.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// mhm - supervisor for simulated optimizer components
#[derive(Parser, Debug)]
#[command(name = "mhm")]
#[command(version, about = "Supervisor for simulated optimizer components")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file path (defaults to ~/.mhm/settings.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the supervisor until interrupted (default when no command given)
    Run(RunArgs),

    /// Start both optimizers, print one summary of each, and stop
    Summary,

    /// Check platform requirements and show system information
    #[command(alias = "hw")]
    System(SystemArgs),

    /// Manage configuration
    #[command(alias = "config")]
    Settings(SettingsArgs),
}

/// Arguments for the run subcommand
#[derive(clap::Args, Debug, Default)]
pub struct RunArgs {
    /// Seconds between framework status reports
    #[arg(long, value_name = "SECS")]
    pub framework_interval: Option<u64>,

    /// Seconds between auxiliary status reports
    #[arg(long, value_name = "SECS")]
    pub auxiliary_interval: Option<u64>,

    /// Disable colored status lines
    #[arg(long)]
    pub no_color: bool,

    /// Do not write a results file on shutdown
    #[arg(long)]
    pub no_save: bool,
}

/// Arguments for the system subcommand
#[derive(clap::Args, Debug, Default)]
pub struct SystemArgs {
    /// Create the mhm home, logs, and results directories
    #[arg(long)]
    pub init: bool,
}

/// Arguments for the settings subcommand
#[derive(clap::Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: Option<SettingsCommands>,
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "framework.report_interval_secs")
        key: String,

        /// Value to set
        value: String,
    },

    /// Print the settings file path
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Output format for status lines and reports
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,

    /// One JSON object per line
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_default_no_command() {
        let cli = Cli::parse_from(["mhm"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_verbose_multiple() {
        let cli = Cli::parse_from(["mhm", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_run_intervals() {
        let cli = Cli::parse_from([
            "mhm",
            "run",
            "--framework-interval",
            "5",
            "--auxiliary-interval",
            "12",
            "--no-color",
        ]);
        if let Some(Commands::Run(args)) = cli.command {
            assert_eq!(args.framework_interval, Some(5));
            assert_eq!(args.auxiliary_interval, Some(12));
            assert!(args.no_color);
            assert!(!args.no_save);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_system_alias() {
        let cli = Cli::parse_from(["mhm", "hw", "--init"]);
        if let Some(Commands::System(args)) = cli.command {
            assert!(args.init);
        } else {
            panic!("Expected System command");
        }
    }

    #[test]
    fn test_settings_path() {
        let cli = Cli::parse_from(["mhm", "config", "path"]);
        if let Some(Commands::Settings(args)) = cli.command {
            assert!(matches!(args.command, Some(SettingsCommands::Path)));
        } else {
            panic!("Expected Settings command");
        }
    }

    #[test]
    fn test_settings_set() {
        let cli = Cli::parse_from(["mhm", "settings", "set", "output.color", "false"]);
        if let Some(Commands::Settings(args)) = cli.command {
            if let Some(SettingsCommands::Set { key, value }) = args.command {
                assert_eq!(key, "output.color");
                assert_eq!(value, "false");
            } else {
                panic!("Expected Set subcommand");
            }
        } else {
            panic!("Expected Settings command");
        }
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::parse_from(["mhm", "summary", "--format", "json"]);
        assert!(matches!(cli.command, Some(Commands::Summary)));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let result = Cli::try_parse_from(["mhm", "run", "--framework-interval", "soon"]);
        assert!(result.is_err());
    }
}
