// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! System requirements command

use serde::Serialize;

use crate::cli::{OutputFormat, SystemArgs};
use crate::config::Settings;
use crate::error::Result;
use crate::system::{
    check_requirements, sample_thermal_status, CheckStatus, RequirementCheck, SystemProfile,
    ThermalStatus,
};

#[derive(Serialize)]
struct SystemReport {
    profile: SystemProfile,
    thermal: Option<ThermalStatus>,
    checks: Vec<RequirementCheck>,
}

/// Execute the system command
pub fn execute(args: &SystemArgs, format: OutputFormat) -> Result<()> {
    if args.init {
        Settings::ensure_directories()?;
    }

    let profile = SystemProfile::detect();
    let thermal = sample_thermal_status();
    let directories = Settings::working_dirs();
    let checks = check_requirements(&profile, thermal.as_ref(), &directories);

    if format == OutputFormat::Json {
        let report = SystemReport {
            profile,
            thermal,
            checks,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n=== mhm System Check ===\n");
    println!(
        "OS: {}{}",
        profile.os,
        profile
            .os_version
            .as_deref()
            .map(|v| format!(" ({})", v))
            .unwrap_or_default()
    );
    println!("Architecture: {:?}", profile.architecture);
    println!("CPU: {} ({} cores)", profile.cpu_brand, profile.cpu_cores);
    println!("RAM: {}GB", profile.ram_gb);
    if let Some(status) = &thermal {
        println!("Thermal: {:?} ({})", status.level, status.reading);
    }

    println!("\n=== Checks ===");
    for check in &checks {
        let mark = match check.status {
            CheckStatus::Ok => "✓",
            CheckStatus::Warn => "⚠️ ",
        };
        println!("  {} {}: {}", mark, check.label, check.detail);
    }
    println!();

    Ok(())
}
