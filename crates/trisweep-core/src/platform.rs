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

//! Abstractions over host telemetry.
//!
//! The benchmark only needs result values from the host: a utilization
//! percentage per probe and a few identification strings. How they are
//! obtained is the business of `trisweep-infra`.

use std::fmt;

/// Trait for sampling the utilization of a host resource (CPU, GPU).
pub trait UtilizationProbe: Send + Sync {
    /// Identifier used in logs, e.g. `"cpu/sysinfo"`.
    fn probe_id(&self) -> &str;

    /// Returns the current utilization in percent, or `None` when unavailable.
    fn sample_percent(&self) -> Option<f64>;
}

/// A probe that never produces a reading.
#[derive(Debug, Clone, Default)]
pub struct NullProbe;

impl UtilizationProbe for NullProbe {
    fn probe_id(&self) -> &str {
        "null"
    }

    fn sample_percent(&self) -> Option<f64> {
        None
    }
}

/// A probe that always returns the same reading. Handy in tests and dry runs.
#[derive(Debug, Clone)]
pub struct FixedProbe {
    percent: Option<f64>,
}

impl FixedProbe {
    /// Creates a probe returning `percent` on every sample.
    pub fn new(percent: Option<f64>) -> Self {
        Self { percent }
    }
}

impl UtilizationProbe for FixedProbe {
    fn probe_id(&self) -> &str {
        "fixed"
    }

    fn sample_percent(&self) -> Option<f64> {
        self.percent
    }
}

/// Normalizes a raw probe reading: missing or non-finite becomes `0`,
/// everything else is clamped to `[0, 100]`.
pub fn normalize_percent(reading: Option<f64>) -> f64 {
    match reading {
        Some(value) if value.is_finite() => value.clamp(0.0, 100.0),
        _ => 0.0,
    }
}

/// Opaque host identification strings written into the summary report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    /// CPU model name.
    pub cpu_model: String,
    /// GPU model name.
    pub gpu_model: String,
    /// Number of logical CPU cores.
    pub cpu_cores: usize,
}

impl SystemInfo {
    /// Placeholder used when the host cannot be identified.
    pub fn unknown() -> Self {
        Self {
            cpu_model: "unidentified CPU".to_string(),
            gpu_model: "unidentified GPU".to_string(),
            cpu_cores: 0,
        }
    }
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CPU: {}", self.cpu_model)?;
        writeln!(f, "GPU: {}", self.gpu_model)?;
        writeln!(f, "CPU cores: {}", self.cpu_cores)
    }
}
