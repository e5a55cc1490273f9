// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! sysinfo-based CPU probe and host identification.

use std::process::Command;
use std::sync::Mutex;
use sysinfo::System;
use trisweep_core::{SystemInfo, UtilizationProbe};

/// A CPU utilization probe that uses the `sysinfo` crate.
///
/// Usage is computed between two refreshes, so the very first reading is `0`.
pub struct SysinfoCpuProbe {
    system: Mutex<System>,
}

impl SysinfoCpuProbe {
    /// Creates a new probe and takes the initial CPU snapshot.
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu_usage();
        Self {
            system: Mutex::new(system),
        }
    }
}

impl Default for SysinfoCpuProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl UtilizationProbe for SysinfoCpuProbe {
    fn probe_id(&self) -> &str {
        "cpu/sysinfo"
    }

    fn sample_percent(&self) -> Option<f64> {
        match self.system.lock() {
            Ok(mut system) => {
                system.refresh_cpu_usage();
                Some(system.global_cpu_usage() as f64)
            }
            Err(_) => {
                log::warn!("CPU probe state poisoned, skipping reading");
                None
            }
        }
    }
}

/// Identifies the host CPU and GPU.
///
/// Unknown parts are reported with the placeholders of [`SystemInfo::unknown`].
pub fn detect_system_info() -> SystemInfo {
    let fallback = SystemInfo::unknown();

    let mut system = System::new();
    system.refresh_cpu_all();
    let cpu_model = system
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|brand| !brand.is_empty())
        .unwrap_or(fallback.cpu_model);
    let cpu_cores = system.cpus().len();

    let gpu_model = query_lspci().unwrap_or(fallback.gpu_model);

    let info = SystemInfo {
        cpu_model,
        gpu_model,
        cpu_cores,
    };
    log::info!(
        "Host: {} ({} cores), {}",
        info.cpu_model,
        info.cpu_cores,
        info.gpu_model
    );
    info
}

fn query_lspci() -> Option<String> {
    let output = Command::new("lspci").output().ok()?;
    if !output.status.success() {
        log::debug!("lspci exited with {}", output.status);
        return None;
    }
    parse_lspci_vga(&String::from_utf8_lossy(&output.stdout))
}

/// Extracts the device description of the first VGA controller from `lspci`
/// output.
pub fn parse_lspci_vga(output: &str) -> Option<String> {
    let line = output
        .lines()
        .find(|line| line.to_ascii_lowercase().contains("vga"))?;
    let description = match line.find("controller: ") {
        Some(index) => &line[index + "controller: ".len()..],
        None => line,
    };
    let description = description.trim();
    (!description.is_empty()).then(|| description.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lspci_vga_line_is_extracted() {
        let output = "\
00:00.0 Host bridge: Intel Corporation Device 9b33 (rev 05)
01:00.0 VGA compatible controller: NVIDIA Corporation GA104 [GeForce RTX 3070] (rev a1)
01:00.1 Audio device: NVIDIA Corporation GA104 High Definition Audio Controller (rev a1)
";
        assert_eq!(
            parse_lspci_vga(output).as_deref(),
            Some("NVIDIA Corporation GA104 [GeForce RTX 3070] (rev a1)")
        );
    }

    #[test]
    fn lspci_without_vga_yields_none() {
        assert_eq!(parse_lspci_vga(""), None);
        assert_eq!(
            parse_lspci_vga("00:1f.3 Audio device: Intel Corporation Device\n"),
            None
        );
    }

    #[test]
    fn cpu_probe_reports_a_percentage() {
        let probe = SysinfoCpuProbe::new();
        assert_eq!(probe.probe_id(), "cpu/sysinfo");
        let reading = probe.sample_percent().expect("sysinfo always reports");
        assert!(reading.is_finite());
        assert!(reading >= 0.0);
    }

    #[test]
    fn system_info_is_never_blank() {
        let info = detect_system_info();
        assert!(!info.cpu_model.is_empty());
        assert!(!info.gpu_model.is_empty());
    }
}
