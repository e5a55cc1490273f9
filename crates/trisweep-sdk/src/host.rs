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

//! Wiring of the real host collaborators.

use trisweep_core::SystemInfo;
use trisweep_infra::{detect_system_info, GpuUtilizationProbe, SysinfoCpuProbe};
use trisweep_telemetry::UtilizationProbes;

/// CPU and GPU probes reading the machine the benchmark runs on.
pub fn host_probes() -> UtilizationProbes {
    UtilizationProbes::new(
        Box::new(SysinfoCpuProbe::new()),
        Box::new(GpuUtilizationProbe::new()),
    )
}

/// Identification of the machine the benchmark runs on.
pub fn host_system_info() -> SystemInfo {
    detect_system_info()
}
