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

//! Aggregate statistics over a sample buffer.
//!
//! Aggregates are only defined over a non-empty buffer; every constructor
//! returns `None` for an empty one instead of reporting zeros.

use crate::sample::Sample;
use serde::Serialize;
use trisweep_core::EffectConfiguration;

/// Minimum, mean and maximum of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricStats {
    /// Smallest observed value.
    pub min: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Largest observed value.
    pub max: f64,
}

impl MetricStats {
    /// Computes the statistics of `values`, or `None` if it is empty.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }
        (count > 0).then(|| Self {
            min,
            mean: sum / count as f64,
            max,
        })
    }
}

/// Aggregates for all samples taken under one effect configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfigurationStats {
    /// The effect configuration.
    pub effects: EffectConfiguration,
    /// Number of samples.
    pub sample_count: usize,
    /// FPS statistics.
    pub fps: MetricStats,
    /// Smallest triangle count sampled.
    pub min_triangles: usize,
    /// Largest triangle count sampled.
    pub max_triangles: usize,
}

/// Mean FPS for one (configuration, triangle count) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TriangleCountStats {
    /// The effect configuration.
    pub effects: EffectConfiguration,
    /// The triangle count.
    pub triangle_count: usize,
    /// Number of samples aggregated.
    pub sample_count: usize,
    /// Mean FPS over those samples.
    pub mean_fps: f64,
}

/// Everything the summary report prints about a sample buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    /// Total number of samples.
    pub sample_count: usize,
    /// FPS over the whole buffer.
    pub fps: MetricStats,
    /// CPU utilization over the whole buffer.
    pub cpu_usage: MetricStats,
    /// GPU utilization over the whole buffer.
    pub gpu_usage: MetricStats,
    /// Per configuration breakdown, in order of first appearance.
    pub by_configuration: Vec<ConfigurationStats>,
}

impl SummaryStatistics {
    /// Aggregates `samples`, or returns `None` if there are none.
    pub fn from_samples(samples: &[Sample]) -> Option<Self> {
        Some(Self {
            sample_count: samples.len(),
            fps: MetricStats::from_values(samples.iter().map(|s| s.fps))?,
            cpu_usage: MetricStats::from_values(samples.iter().map(|s| s.cpu_usage_percent))?,
            gpu_usage: MetricStats::from_values(samples.iter().map(|s| s.gpu_usage_percent))?,
            by_configuration: by_configuration(samples),
        })
    }

    /// Pretty-printed JSON rendition, for machine consumption.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Groups samples by effect configuration, in order of first appearance.
pub fn by_configuration(samples: &[Sample]) -> Vec<ConfigurationStats> {
    let mut order: Vec<EffectConfiguration> = Vec::new();
    for sample in samples {
        let effects = sample.effects();
        if !order.contains(&effects) {
            order.push(effects);
        }
    }

    order
        .into_iter()
        .filter_map(|effects| {
            let group: Vec<&Sample> = samples.iter().filter(|s| s.effects() == effects).collect();
            Some(ConfigurationStats {
                effects,
                sample_count: group.len(),
                fps: MetricStats::from_values(group.iter().map(|s| s.fps))?,
                min_triangles: group.iter().map(|s| s.triangle_count).min()?,
                max_triangles: group.iter().map(|s| s.triangle_count).max()?,
            })
        })
        .collect()
}

/// Mean FPS per configuration and triangle count, sorted by configuration
/// (first appearance) then ascending triangle count.
pub fn by_triangle_count(samples: &[Sample]) -> Vec<TriangleCountStats> {
    let mut rows: Vec<TriangleCountStats> = Vec::new();
    for sample in samples {
        let effects = sample.effects();
        match rows
            .iter_mut()
            .find(|r| r.effects == effects && r.triangle_count == sample.triangle_count)
        {
            // Running mean.
            Some(row) => {
                row.sample_count += 1;
                row.mean_fps += (sample.fps - row.mean_fps) / row.sample_count as f64;
            }
            None => rows.push(TriangleCountStats {
                effects,
                triangle_count: sample.triangle_count,
                sample_count: 1,
                mean_fps: sample.fps,
            }),
        }
    }

    let order: Vec<EffectConfiguration> = by_configuration(samples)
        .iter()
        .map(|c| c.effects)
        .collect();
    rows.sort_by_key(|r| {
        (
            order.iter().position(|e| *e == r.effects).unwrap_or(usize::MAX),
            r.triangle_count,
        )
    });
    rows
}
