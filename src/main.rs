// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! mhm - supervisor for simulated optimizer components
//!
//! Entry point for the mhm CLI application.

use clap::Parser;

use mhm::cli::{Cli, Commands, RunArgs};
use mhm::commands;
use mhm::config::Settings;
use mhm::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` turns on lifecycle logging without knowing target names.
    // `RUST_LOG` still takes precedence.
    if cli.verbose > 0 {
        let level = if cli.verbose > 1 { "trace" } else { "debug" };
        if let Ok(parsed) = format!("mhm={}", level).parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings_path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let settings = Settings::load_from(&settings_path)?;

    match cli.command {
        None => {
            commands::run::execute(&RunArgs::default(), settings, cli.format).await?;
        }
        Some(Commands::Run(args)) => {
            commands::run::execute(&args, settings, cli.format).await?;
        }
        Some(Commands::Summary) => {
            commands::summary::execute(&settings, cli.format).await?;
        }
        Some(Commands::System(args)) => {
            commands::system::execute(&args, cli.format)?;
        }
        Some(Commands::Settings(args)) => {
            commands::settings::execute(args, settings, &settings_path)?;
        }
    }

    Ok(())
}
