// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Host profile collected through `sysinfo`.

use serde::Serialize;
use sysinfo::System;

/// CPU architecture classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CpuArchitecture {
    X86_64,
    ARM64,
    Other,
}

impl CpuArchitecture {
    pub fn from_arch(arch: &str) -> Self {
        match arch {
            "x86_64" | "amd64" => CpuArchitecture::X86_64,
            "aarch64" | "arm64" => CpuArchitecture::ARM64,
            _ => CpuArchitecture::Other,
        }
    }

    /// Detect the current CPU architecture
    pub fn detect() -> Self {
        Self::from_arch(std::env::consts::ARCH)
    }
}

/// How well the host platform is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformSupport {
    Full,
    Basic,
    Unknown,
}

impl PlatformSupport {
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" | "linux" => PlatformSupport::Full,
            "windows" => PlatformSupport::Basic,
            _ => PlatformSupport::Unknown,
        }
    }
}

/// Host profile
#[derive(Debug, Clone, Serialize)]
pub struct SystemProfile {
    pub os: String,
    pub os_version: Option<String>,
    pub architecture: CpuArchitecture,
    pub cpu_brand: String,
    pub cpu_cores: usize,
    pub ram_gb: u64,
    pub support: PlatformSupport,
}

impl SystemProfile {
    /// Detect the current host profile
    pub fn detect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();

        let cpu_brand = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| "Unknown CPU".to_string());

        let os = std::env::consts::OS.to_string();
        Self {
            support: PlatformSupport::from_os(&os),
            os,
            os_version: System::long_os_version(),
            architecture: CpuArchitecture::detect(),
            cpu_brand,
            cpu_cores: sys.cpus().len(),
            ram_gb: sys.total_memory() / (1024 * 1024 * 1024),
        }
    }
}
