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

//! # Trisweep Infra
//!
//! Concrete implementations of the collaborator contracts declared in
//! `trisweep-core`: host utilization probes, host identification and a
//! headless CPU draw backend.

#![warn(missing_docs)]

pub mod graphics;
pub mod platform;
pub mod telemetry;

pub use graphics::headless::HeadlessRenderer;
pub use platform::sysinfo_impl::{detect_system_info, SysinfoCpuProbe};
pub use telemetry::gpu_probe::GpuUtilizationProbe;
