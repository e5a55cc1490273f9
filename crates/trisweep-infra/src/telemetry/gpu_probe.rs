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

//! GPU utilization from vendor command line tools.
//!
//! `nvidia-smi` is tried first, then `radeontop`. The first tool that answers
//! is remembered; if neither does, the probe stops spawning processes and
//! reports nothing from then on.

use std::process::Command;
use std::sync::Mutex;
use trisweep_core::UtilizationProbe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GpuTool {
    Nvidia,
    Radeon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Detection {
    Pending,
    Found(GpuTool),
    Unavailable,
}

/// A GPU utilization probe that shells out to `nvidia-smi` or `radeontop`.
#[derive(Debug)]
pub struct GpuUtilizationProbe {
    detection: Mutex<Detection>,
}

impl GpuUtilizationProbe {
    /// Creates a probe. Tool detection happens on the first sample.
    pub fn new() -> Self {
        Self {
            detection: Mutex::new(Detection::Pending),
        }
    }

    fn query(tool: GpuTool) -> Option<f64> {
        match tool {
            GpuTool::Nvidia => {
                let stdout = run(
                    "nvidia-smi",
                    &[
                        "--query-gpu=utilization.gpu",
                        "--format=csv,noheader,nounits",
                    ],
                )?;
                parse_nvidia_smi(&stdout)
            }
            GpuTool::Radeon => {
                let stdout = run("radeontop", &["-d", "-", "-l", "1"])?;
                parse_radeontop(&stdout)
            }
        }
    }
}

impl Default for GpuUtilizationProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl UtilizationProbe for GpuUtilizationProbe {
    fn probe_id(&self) -> &str {
        "gpu/vendor-tools"
    }

    fn sample_percent(&self) -> Option<f64> {
        let Ok(mut detection) = self.detection.lock() else {
            return None;
        };
        match *detection {
            Detection::Found(tool) => Self::query(tool),
            Detection::Unavailable => None,
            Detection::Pending => {
                for tool in [GpuTool::Nvidia, GpuTool::Radeon] {
                    if let Some(reading) = Self::query(tool) {
                        log::info!("GPU utilization source: {:?}", tool);
                        *detection = Detection::Found(tool);
                        return Some(reading);
                    }
                }
                log::info!("No GPU utilization tool available, GPU usage will be recorded as 0");
                *detection = Detection::Unavailable;
                None
            }
        }
    }
}

fn run(program: &str, args: &[&str]) -> Option<String> {
    match Command::new(program).args(args).output() {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            log::debug!("{} exited with {}", program, output.status);
            None
        }
        Err(e) => {
            log::debug!("{} unavailable: {}", program, e);
            None
        }
    }
}

/// Parses the first line of `nvidia-smi --format=csv,noheader,nounits`.
pub fn parse_nvidia_smi(output: &str) -> Option<f64> {
    output.lines().next()?.trim().parse().ok()
}

/// Parses the `gpu NN.NN%` field of a `radeontop -d -` dump line.
pub fn parse_radeontop(output: &str) -> Option<f64> {
    output
        .lines()
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .find_map(|field| field.strip_prefix("gpu "))
        .and_then(|value| value.trim().trim_end_matches('%').parse().ok())
}
