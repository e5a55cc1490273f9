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

//! # Trisweep Telemetry
//!
//! Measures the frame rate in fixed windows, records timestamped performance
//! samples together with host utilization, and exports them as CSV and as a
//! human readable summary report.

#![warn(missing_docs)]

pub mod error;
pub mod recorder;
pub mod report;
pub mod sample;
pub mod sampler;
pub mod stats;

pub use error::{CsvParseError, ExportError};
pub use recorder::{PerformanceRecorder, UtilizationProbes};
pub use sample::Sample;
pub use sampler::FrameSampler;
pub use stats::{ConfigurationStats, MetricStats, SummaryStatistics, TriangleCountStats};
