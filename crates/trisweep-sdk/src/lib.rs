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

//! # Trisweep SDK
//!
//! The entry point for running a triangle sweep benchmark. A
//! [`BenchmarkContext`] owns every piece of benchmark state explicitly (scene,
//! frame sampler, sweep controller and its recorder) and is advanced by
//! calling [`BenchmarkContext::frame`] once per rendered frame.

#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod host;
pub mod signal;

pub use config::{BenchmarkConfig, ConfigError, SweepPreset};
pub use context::{BenchmarkContext, FrameOutcome};
pub use host::{host_probes, host_system_info};
pub use signal::Signal;

/// Commonly used types, re-exported for convenience.
pub mod prelude {
    pub use crate::config::{BenchmarkConfig, SweepPreset};
    pub use crate::context::{BenchmarkContext, FrameOutcome};
    pub use crate::signal::Signal;
    pub use trisweep_control::{SweepEvent, SweepPhase, SweepPlan, SweepState};
    pub use trisweep_core::{
        DrawBackend, EffectConfiguration, ManualClock, MonotonicClock, Scene, SystemInfo,
        VertexLayout,
    };
    pub use trisweep_infra::HeadlessRenderer;
    pub use trisweep_telemetry::{PerformanceRecorder, Sample, UtilizationProbes};
}
