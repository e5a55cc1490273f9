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

//! # Trisweep Core
//!
//! Foundational crate containing the renderable population, the effect toggles,
//! the light rig and the contracts (draw backend, utilization probes, clocks)
//! that the rest of the benchmark harness is built on.
//!
//! Nothing in this crate talks to a graphics API or to the operating system;
//! concrete collaborators live in `trisweep-infra`.

#![warn(missing_docs)]

pub mod effects;
pub mod light;
pub mod math;
pub mod platform;
pub mod population;
pub mod renderer;
pub mod scene;
pub mod texture;
pub mod utils;

pub use effects::EffectConfiguration;
pub use light::{Light, LightRig};
pub use math::Vec3;
pub use platform::{FixedProbe, NullProbe, SystemInfo, UtilizationProbe};
pub use population::{Instance, Population, VertexLayout};
pub use renderer::{DrawBackend, DrawStats, FrameInput, RenderError};
pub use scene::Scene;
pub use utils::clock::{Clock, ManualClock, MonotonicClock, SharedClock};
pub use utils::timer::Stopwatch;
