// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Host temperature sampling for `mhm system` and the pre-run warning.
//!
//! On Linux every `thermal_zone*` sensor under sysfs is read and the hottest
//! one sets the level. On macOS the CPU speed limit from `pmset -g therm`
//! stands in for a temperature.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;

#[cfg(target_os = "linux")]
const SYSFS_THERMAL_ROOT: &str = "/sys/class/thermal";

/// Coarse thermal state of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermalLevel {
    Cool,
    Warm,
    Hot,
    Critical,
}

impl ThermalLevel {
    pub fn from_celsius(celsius: f32) -> Self {
        match celsius {
            c if c >= 85.0 => Self::Critical,
            c if c >= 75.0 => Self::Hot,
            c if c >= 65.0 => Self::Warm,
            _ => Self::Cool,
        }
    }

    /// Map a CPU speed limit (100 = unthrottled) to a level.
    pub fn from_speed_limit(percent: u8) -> Self {
        match percent {
            0..=69 => Self::Critical,
            70..=84 => Self::Hot,
            85..=99 => Self::Warm,
            _ => Self::Cool,
        }
    }
}

/// One sysfs thermal zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneReading {
    /// Directory name, e.g. `thermal_zone2`
    pub zone: String,
    /// Contents of the zone's `type` file, e.g. `x86_pkg_temp`
    pub kind: String,
    pub celsius: f32,
}

/// What a thermal level was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ThermalReading {
    Sysfs {
        hottest: ZoneReading,
        zones_sampled: usize,
    },
    Pmset {
        cpu_speed_limit_percent: u8,
    },
}

impl fmt::Display for ThermalReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sysfs {
                hottest,
                zones_sampled,
            } => {
                let kind = if hottest.kind.is_empty() {
                    hottest.zone.as_str()
                } else {
                    hottest.kind.as_str()
                };
                write!(
                    f,
                    "{:.1}°C on {} (hottest of {} zones)",
                    hottest.celsius, kind, zones_sampled
                )
            }
            Self::Pmset {
                cpu_speed_limit_percent,
            } => write!(f, "CPU speed limit {}%", cpu_speed_limit_percent),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThermalStatus {
    pub level: ThermalLevel,
    pub reading: ThermalReading,
}

impl ThermalStatus {
    /// Whether the host is hot enough to warn about sustained load.
    pub fn needs_attention(&self) -> bool {
        self.level >= ThermalLevel::Hot
    }

    /// Status of the hottest zone, or `None` when no zone was readable.
    pub fn from_zones(zones: &[ZoneReading]) -> Option<Self> {
        let hottest = zones
            .iter()
            .max_by(|a, b| a.celsius.total_cmp(&b.celsius))?;
        Some(Self {
            level: ThermalLevel::from_celsius(hottest.celsius),
            reading: ThermalReading::Sysfs {
                hottest: hottest.clone(),
                zones_sampled: zones.len(),
            },
        })
    }

    pub fn from_speed_limit(percent: u8) -> Self {
        Self {
            level: ThermalLevel::from_speed_limit(percent),
            reading: ThermalReading::Pmset {
                cpu_speed_limit_percent: percent,
            },
        }
    }
}

/// Sample whatever the platform exposes. `None` when nothing is readable.
pub fn sample_thermal_status() -> Option<ThermalStatus> {
    #[cfg(target_os = "linux")]
    {
        let zones = read_thermal_zones(Path::new(SYSFS_THERMAL_ROOT));
        tracing::debug!(zones = zones.len(), "sampled sysfs thermal zones");
        ThermalStatus::from_zones(&zones)
    }

    #[cfg(target_os = "macos")]
    {
        let output = std::process::Command::new("pmset")
            .args(["-g", "therm"])
            .output()
            .ok()
            .filter(|output| output.status.success())?;
        parse_pmset_speed_limit(&String::from_utf8_lossy(&output.stdout))
            .map(ThermalStatus::from_speed_limit)
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

/// Read every `thermal_zone*` below `root`, sorted by zone name. Zones
/// whose `temp` is missing, unparsable, or not above zero are skipped.
pub fn read_thermal_zones(root: &Path) -> Vec<ZoneReading> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };

    let mut zones: Vec<ZoneReading> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let zone = entry.file_name().to_string_lossy().into_owned();
            if !zone.starts_with("thermal_zone") {
                return None;
            }
            let dir = entry.path();
            let celsius = parse_millicelsius(&fs::read_to_string(dir.join("temp")).ok()?)?;
            let kind = fs::read_to_string(dir.join("type"))
                .map(|kind| kind.trim().to_string())
                .unwrap_or_default();
            Some(ZoneReading {
                zone,
                kind,
                celsius,
            })
        })
        .collect();

    zones.sort_by(|a, b| a.zone.cmp(&b.zone));
    zones
}

/// sysfs reports millidegrees; a few drivers report whole degrees.
pub fn parse_millicelsius(raw: &str) -> Option<f32> {
    let value: f32 = raw.trim().parse().ok()?;
    let celsius = if value.abs() >= 1000.0 {
        value / 1000.0
    } else {
        value
    };
    (celsius > 0.0).then_some(celsius)
}

/// Extract `CPU_Speed_Limit` from `pmset -g therm` output.
pub fn parse_pmset_speed_limit(output: &str) -> Option<u8> {
    output
        .lines()
        .filter(|line| line.contains("CPU_Speed_Limit"))
        .find_map(|line| line.split('=').nth(1)?.trim().parse().ok())
}
