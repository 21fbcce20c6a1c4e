// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Requirement checks shown by `mhm system`.

use std::path::PathBuf;

use serde::Serialize;

use super::{PlatformSupport, SystemProfile, ThermalStatus};

/// Below this the host is flagged as too small for a long run.
pub const MIN_RAM_GB: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Warn,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequirementCheck {
    pub label: &'static str,
    pub status: CheckStatus,
    pub detail: String,
}

impl RequirementCheck {
    fn ok(label: &'static str, detail: impl Into<String>) -> Self {
        Self {
            label,
            status: CheckStatus::Ok,
            detail: detail.into(),
        }
    }

    fn warn(label: &'static str, detail: impl Into<String>) -> Self {
        Self {
            label,
            status: CheckStatus::Warn,
            detail: detail.into(),
        }
    }
}

/// Evaluate the host against what a long supervisor run needs.
pub fn check_requirements(
    profile: &SystemProfile,
    thermal: Option<&ThermalStatus>,
    directories: &[PathBuf],
) -> Vec<RequirementCheck> {
    let mut checks = Vec::new();

    checks.push(match profile.support {
        PlatformSupport::Full => RequirementCheck::ok("platform", profile.os.clone()),
        PlatformSupport::Basic => {
            RequirementCheck::warn("platform", format!("{} (basic support)", profile.os))
        }
        PlatformSupport::Unknown => {
            RequirementCheck::warn("platform", format!("{} (untested)", profile.os))
        }
    });

    checks.push(if profile.cpu_cores == 0 {
        RequirementCheck::warn("cpu", "no CPUs reported")
    } else {
        RequirementCheck::ok(
            "cpu",
            format!("{} ({} cores)", profile.cpu_brand, profile.cpu_cores),
        )
    });

    checks.push(match profile.ram_gb {
        0 => RequirementCheck::warn("memory", "total memory unknown"),
        gb if gb < MIN_RAM_GB => RequirementCheck::warn(
            "memory",
            format!("{}GB (at least {}GB recommended)", gb, MIN_RAM_GB),
        ),
        gb => RequirementCheck::ok("memory", format!("{}GB", gb)),
    });

    checks.push(match thermal {
        Some(status) if status.needs_attention() => {
            RequirementCheck::warn("thermal", format!("{:?}, {}", status.level, status.reading))
        }
        Some(status) => {
            RequirementCheck::ok("thermal", format!("{:?}, {}", status.level, status.reading))
        }
        None => RequirementCheck::ok("thermal", "no sensor available"),
    });

    for dir in directories {
        checks.push(if dir.is_dir() {
            RequirementCheck::ok("directory", dir.display().to_string())
        } else {
            RequirementCheck::warn(
                "directory",
                format!("{} missing (run `mhm system --init`)", dir.display()),
            )
        });
    }

    checks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{CpuArchitecture, ThermalLevel};

    fn check<'a>(checks: &'a [RequirementCheck], label: &str) -> &'a RequirementCheck {
        checks.iter().find(|c| c.label == label).unwrap()
    }

    fn profile(os: &str) -> SystemProfile {
        SystemProfile {
            os: os.to_string(),
            os_version: None,
            architecture: CpuArchitecture::X86_64,
            cpu_brand: "Test CPU".to_string(),
            cpu_cores: 8,
            ram_gb: 16,
            support: PlatformSupport::from_os(os),
        }
    }

    #[test]
    fn test_supported_platform_passes() {
        let checks = check_requirements(&profile("linux"), None, &[]);
        assert!(checks.iter().all(|c| c.status == CheckStatus::Ok));
    }

    #[test]
    fn test_hot_host_warns() {
        let hot = ThermalStatus::from_speed_limit(60);
        assert_eq!(hot.level, ThermalLevel::Critical);
        let checks = check_requirements(&profile("macos"), Some(&hot), &[]);
        let thermal = check(&checks, "thermal");
        assert_eq!(thermal.status, CheckStatus::Warn);
        assert_eq!(thermal.detail, "Critical, CPU speed limit 60%");
    }

    #[test]
    fn test_memory_thresholds() {
        let mut host = profile("linux");
        assert_eq!(check(&check_requirements(&host, None, &[]), "memory").status, CheckStatus::Ok);

        host.ram_gb = MIN_RAM_GB - 1;
        let checks = check_requirements(&host, None, &[]);
        assert_eq!(check(&checks, "memory").status, CheckStatus::Warn);
        assert!(check(&checks, "memory").detail.contains("recommended"));

        host.ram_gb = 0;
        let checks = check_requirements(&host, None, &[]);
        assert_eq!(check(&checks, "memory").detail, "total memory unknown");
    }

    #[test]
    fn test_missing_directory_warns() {
        let tmp = tempfile::TempDir::new().unwrap();
        let present = tmp.path().to_path_buf();
        let absent = tmp.path().join("results");
        let checks = check_requirements(&profile("windows"), None, &[present, absent]);
        let statuses: Vec<CheckStatus> = checks
            .iter()
            .filter(|c| c.label == "directory")
            .map(|c| c.status)
            .collect();
        assert_eq!(statuses, vec![CheckStatus::Ok, CheckStatus::Warn]);
        assert_eq!(checks[0].status, CheckStatus::Warn);
    }
}
