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

//! The append-only performance sample buffer and its exports.

use crate::error::ExportError;
use crate::report;
use crate::sample::Sample;
use crate::stats::SummaryStatistics;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use trisweep_core::platform::{normalize_percent, NullProbe};
use trisweep_core::{EffectConfiguration, SharedClock, SystemInfo, UtilizationProbe};

/// The host utilization probes sampled on every record.
pub struct UtilizationProbes {
    /// CPU utilization source.
    pub cpu: Box<dyn UtilizationProbe>,
    /// GPU utilization source.
    pub gpu: Box<dyn UtilizationProbe>,
}

impl UtilizationProbes {
    /// Bundles a CPU and a GPU probe.
    pub fn new(cpu: Box<dyn UtilizationProbe>, gpu: Box<dyn UtilizationProbe>) -> Self {
        Self { cpu, gpu }
    }

    /// Probes that never report anything; every reading is recorded as `0`.
    pub fn none() -> Self {
        Self::new(Box::new(NullProbe), Box::new(NullProbe))
    }
}

impl fmt::Debug for UtilizationProbes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UtilizationProbes")
            .field("cpu", &self.cpu.probe_id())
            .field("gpu", &self.gpu.probe_id())
            .finish()
    }
}

/// Timestamped, append-only buffer of [`Sample`]s.
///
/// Samples are kept in insertion order, which is also temporal order. A failed
/// export leaves the buffer untouched.
#[derive(Debug)]
pub struct PerformanceRecorder {
    samples: Vec<Sample>,
    probes: UtilizationProbes,
    clock: SharedClock,
    origin: Duration,
}

impl PerformanceRecorder {
    /// Creates an empty recorder. Timestamps are relative to this call.
    pub fn new(probes: UtilizationProbes, clock: SharedClock) -> Self {
        let origin = clock.now();
        Self {
            samples: Vec::new(),
            probes,
            clock,
            origin,
        }
    }

    /// Reads the probes, stamps the time and appends one sample.
    ///
    /// Missing or out of range probe readings are recorded as `0` or clamped
    /// to `[0, 100]`.
    pub fn record(
        &mut self,
        fps: f64,
        triangle_count: usize,
        effects: EffectConfiguration,
    ) -> &Sample {
        let cpu = self.probes.cpu.sample_percent();
        let gpu = self.probes.gpu.sample_percent();
        if gpu.is_none() {
            log::trace!("GPU probe '{}' returned no reading", self.probes.gpu.probe_id());
        }

        let sample = Sample {
            timestamp_seconds: self.clock.now().saturating_sub(self.origin).as_secs_f64(),
            fps,
            cpu_usage_percent: normalize_percent(cpu),
            gpu_usage_percent: normalize_percent(gpu),
            triangle_count,
            lighting_enabled: effects.lighting_enabled,
            texturing_enabled: effects.texturing_enabled,
        };
        log::info!(
            "Recorded: {} triangles, FPS {:.2}, CPU {:.1}%, GPU {:.1}%, {}",
            sample.triangle_count,
            sample.fps,
            sample.cpu_usage_percent,
            sample.gpu_usage_percent,
            effects
        );

        self.samples.push(sample);
        &self.samples[self.samples.len() - 1]
    }

    /// All samples, in insertion order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of recorded samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Discards every sample. Only called on an explicit request.
    pub fn clear(&mut self) {
        log::debug!("Clearing {} recorded samples", self.samples.len());
        self.samples.clear();
    }

    /// Aggregate statistics, or `None` when the buffer is empty.
    pub fn statistics(&self) -> Option<SummaryStatistics> {
        SummaryStatistics::from_samples(&self.samples)
    }

    /// Writes the CSV export to `writer`.
    pub fn write_csv<W: Write>(&self, writer: W) -> io::Result<()> {
        report::write_csv(writer, &self.samples)
    }

    /// Writes the summary report to `writer`.
    pub fn write_summary<W: Write>(&self, writer: W, system: &SystemInfo) -> io::Result<()> {
        let generated_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        report::write_summary(writer, &self.samples, system, generated_at)
    }

    /// Writes the CSV export to `path`, replacing any existing file.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        export_to(path, |w| self.write_csv(w))?;
        log::info!("Exported {} samples to {}", self.samples.len(), path.display());
        Ok(())
    }

    /// Writes the summary report to `path`, replacing any existing file.
    pub fn export_summary(
        &self,
        path: impl AsRef<Path>,
        system: &SystemInfo,
    ) -> Result<(), ExportError> {
        let path = path.as_ref();
        export_to(path, |w| self.write_summary(w, system))?;
        log::info!("Summary report written to {}", path.display());
        Ok(())
    }
}

fn export_to<F>(path: &Path, write: F) -> Result<(), ExportError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer).map_err(io_error)?;
    writer.flush().map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use trisweep_core::platform::FixedProbe;
    use trisweep_core::ManualClock;

    fn recorder(cpu: Option<f64>, gpu: Option<f64>) -> (PerformanceRecorder, ManualClock) {
        let clock = ManualClock::new();
        clock.advance(Duration::from_secs(100));
        let probes = UtilizationProbes::new(
            Box::new(FixedProbe::new(cpu)),
            Box::new(FixedProbe::new(gpu)),
        );
        (PerformanceRecorder::new(probes, Arc::new(clock.clone())), clock)
    }

    #[test]
    fn record_stamps_time_since_creation() {
        let (mut recorder, clock) = recorder(Some(35.0), Some(70.0));
        clock.advance(Duration::from_millis(1500));
        let sample = *recorder.record(60.0, 26, EffectConfiguration::LIGHTING);

        assert_eq!(sample.timestamp_seconds, 1.5);
        assert_eq!(sample.cpu_usage_percent, 35.0);
        assert_eq!(sample.gpu_usage_percent, 70.0);
        assert_eq!(sample.triangle_count, 26);
        assert!(sample.lighting_enabled);
        assert!(!sample.texturing_enabled);
    }

    #[test]
    fn unavailable_probes_record_zero() {
        let (mut recorder, _clock) = recorder(None, Some(f64::NAN));
        let sample = *recorder.record(30.0, 1, EffectConfiguration::BASIC);
        assert_eq!(sample.cpu_usage_percent, 0.0);
        assert_eq!(sample.gpu_usage_percent, 0.0);
    }

    #[test]
    fn out_of_range_readings_are_clamped() {
        let (mut recorder, _clock) = recorder(Some(130.0), Some(-5.0));
        let sample = *recorder.record(30.0, 1, EffectConfiguration::BASIC);
        assert_eq!(sample.cpu_usage_percent, 100.0);
        assert_eq!(sample.gpu_usage_percent, 0.0);
    }

    #[test]
    fn samples_keep_insertion_order() {
        let (mut recorder, clock) = recorder(None, None);
        for count in [1, 26, 51] {
            clock.advance(Duration::from_secs(1));
            recorder.record(60.0, count, EffectConfiguration::BASIC);
        }
        let counts: Vec<usize> = recorder.samples().iter().map(|s| s.triangle_count).collect();
        assert_eq!(counts, vec![1, 26, 51]);
        assert_eq!(recorder.len(), 3);

        recorder.clear();
        assert!(recorder.is_empty());
        assert!(recorder.statistics().is_none());
    }
}
