// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Foreground supervisor run

use std::sync::Arc;

use crate::cli::{OutputFormat, RunArgs};
use crate::config::Settings;
use crate::error::Result;
use crate::supervisor::{shutdown_signal, StdoutSink, Supervisor};
use crate::system::sample_thermal_status;

/// Execute the run command
pub async fn execute(args: &RunArgs, settings: Settings, format: OutputFormat) -> Result<()> {
    let settings =
        settings.with_interval_overrides(args.framework_interval, args.auxiliary_interval);
    settings.validate()?;

    if let Some(status) = sample_thermal_status() {
        if status.needs_attention() {
            tracing::warn!(level = ?status.level, reading = %status.reading, "host is running hot");
            eprintln!(
                "⚠️  Host thermal level is {:?}; monitor temperature during the run.",
                status.level
            );
        }
    }

    let color = settings.output.color && !args.no_color;
    let sink = Arc::new(StdoutSink::new(format, color));
    let supervisor = Supervisor::from_settings(&settings, sink);

    if format == OutputFormat::Text {
        println!(
            "Supervising {} (framework every {}s, auxiliary every {}s). Press Ctrl+C to stop.",
            supervisor.components().join(", "),
            settings.framework.report_interval_secs,
            settings.auxiliary.report_interval_secs
        );
        println!("Reported figures are simulated and do not reflect real miner throughput.");
    }

    let report = supervisor.run(shutdown_signal()).await?;

    if format == OutputFormat::Text {
        println!();
        for summary in &report.final_summaries {
            println!("final {}", summary);
        }
    }

    if settings.output.save_results && !args.no_save {
        let path = report.save_to_dir(&Settings::results_dir())?;
        tracing::info!(path = %path.display(), "results saved");
        if format == OutputFormat::Text {
            println!("Results saved to {}", path.display());
        }
    }

    Ok(())
}
