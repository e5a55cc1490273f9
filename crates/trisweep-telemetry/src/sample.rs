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

//! A single performance observation.

use serde::{Deserialize, Serialize};
use trisweep_core::EffectConfiguration;

/// One recorded observation, tied to a triangle count and effect configuration.
///
/// Samples are append-only: once recorded they are never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds since the recorder was created.
    pub timestamp_seconds: f64,
    /// Frames per second measured over the sampling window.
    pub fps: f64,
    /// Host CPU utilization in percent, `0` when unavailable.
    pub cpu_usage_percent: f64,
    /// Host GPU utilization in percent, `0` when unavailable.
    pub gpu_usage_percent: f64,
    /// Number of triangles drawn during the window.
    pub triangle_count: usize,
    /// Whether lighting was enabled.
    pub lighting_enabled: bool,
    /// Whether texturing was enabled.
    pub texturing_enabled: bool,
}

impl Sample {
    /// The effect configuration the sample was taken under.
    pub fn effects(&self) -> EffectConfiguration {
        EffectConfiguration::new(self.lighting_enabled, self.texturing_enabled)
    }
}
