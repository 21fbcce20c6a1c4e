// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Destinations for periodic status lines.

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::{
    style::{Color, ResetColor, SetForegroundColor},
    ExecutableCommand,
};
use tokio::time::Instant;

use crate::cli::OutputFormat;
use crate::optimizer::Summary;

/// Receives every summary the supervisor reports.
pub trait ReportSink: Send + Sync {
    fn emit(&self, summary: &Summary);
}

/// Writes status lines to stdout.
pub struct StdoutSink {
    format: OutputFormat,
    color: bool,
}

impl StdoutSink {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    /// Render a summary the way `emit` prints it, without color.
    pub fn render(&self, summary: &Summary) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string(summary)
                .unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e)),
            OutputFormat::Text => format!(
                "{} {}",
                chrono::Local::now().format("%H:%M:%S"),
                summary
            ),
        }
    }

    fn color_for(summary: &Summary) -> Color {
        match summary {
            Summary::Framework(_) => Color::Green,
            Summary::Auxiliary(_) => Color::Cyan,
        }
    }
}

impl ReportSink for StdoutSink {
    fn emit(&self, summary: &Summary) {
        let line = self.render(summary);
        let mut stdout = io::stdout();

        if self.color && self.format == OutputFormat::Text {
            let _ = stdout.execute(SetForegroundColor(Self::color_for(summary)));
            let _ = writeln!(stdout, "{}", line);
            let _ = stdout.execute(ResetColor);
        } else {
            let _ = writeln!(stdout, "{}", line);
        }
        let _ = stdout.flush();
    }
}

/// A recorded report.
#[derive(Debug, Clone)]
pub struct Record {
    pub at: Instant,
    pub summary: Summary,
}

/// Keeps every report in memory. Used by tests and embedders.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }

    /// Records produced by one component.
    pub fn records_for(&self, component: &str) -> Vec<Record> {
        self.records()
            .into_iter()
            .filter(|r| r.summary.component() == component)
            .collect()
    }
}

impl ReportSink for MemorySink {
    fn emit(&self, summary: &Summary) {
        let record = Record {
            at: Instant::now(),
            summary: summary.clone(),
        };
        match self.records.lock() {
            Ok(mut records) => records.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
    }
}
