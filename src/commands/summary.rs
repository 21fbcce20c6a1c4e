// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! One-shot summary: start, sample, and stop each enabled optimizer.

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::error::Result;
use crate::optimizer::{OptimizerFactory, Summary};

/// Start every enabled optimizer, take one summary each, and stop them.
pub async fn collect(settings: &Settings) -> Result<Vec<Summary>> {
    let mut summaries = Vec::new();
    for mut optimizer in OptimizerFactory::build(settings) {
        optimizer.start()?;
        let summary = optimizer.summary();
        optimizer.stop().await?;
        summaries.push(summary?);
    }
    Ok(summaries)
}

/// Execute the summary command
pub async fn execute(settings: &Settings, format: OutputFormat) -> Result<()> {
    settings.validate()?;
    let summaries = collect(settings).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Text => {
            if summaries.is_empty() {
                println!("No optimizers enabled.");
            }
            for summary in &summaries {
                println!("{}", summary);
            }
        }
    }
    Ok(())
}
