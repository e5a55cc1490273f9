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

//! Human readable summary report.

use crate::sample::Sample;
use crate::stats::{MetricStats, SummaryStatistics};
use std::io::{self, Write};
use trisweep_core::SystemInfo;

/// Writes the summary report for `samples`.
///
/// Aggregate figures are only written when at least one sample exists. With
/// an empty buffer the report states that they are undefined instead.
pub fn write_summary<W: Write>(
    mut w: W,
    samples: &[Sample],
    system: &SystemInfo,
    generated_at_unix: u64,
) -> io::Result<()> {
    let stats = SummaryStatistics::from_samples(samples);

    writeln!(w, "=== Triangle Rendering Performance Report ===")?;
    writeln!(w, "Generated: {generated_at_unix} (unix time)")?;
    writeln!(w)?;

    section(&mut w, "Hardware")?;
    write!(w, "{system}")?;
    writeln!(w)?;

    section(&mut w, "Methodology")?;
    writeln!(
        w,
        "Triangles are drawn as independently rotating instances. The triangle count"
    )?;
    writeln!(
        w,
        "is raised by a fixed step after every sampling window and each phase applies"
    )?;
    writeln!(
        w,
        "one effect configuration. Every sample is the frame rate averaged over one window,"
    )?;
    writeln!(w, "taken together with host CPU and GPU utilization.")?;
    if let Some(stats) = &stats {
        let labels: Vec<&str> = stats
            .by_configuration
            .iter()
            .map(|c| c.effects.label())
            .collect();
        writeln!(w, "Configurations tested: {}", labels.join(", "))?;
        let low = stats.by_configuration.iter().map(|c| c.min_triangles).min();
        let high = stats.by_configuration.iter().map(|c| c.max_triangles).max();
        if let (Some(low), Some(high)) = (low, high) {
            writeln!(w, "Triangle counts tested: {low} to {high}")?;
        }
    }
    writeln!(w)?;

    section(&mut w, "Results")?;
    writeln!(w, "Total samples: {}", samples.len())?;
    match &stats {
        None => {
            writeln!(w, "No samples recorded, aggregate statistics are undefined.")?;
        }
        Some(stats) => {
            metric_line(&mut w, "FPS", &stats.fps)?;
            metric_line(&mut w, "CPU %", &stats.cpu_usage)?;
            metric_line(&mut w, "GPU %", &stats.gpu_usage)?;
            writeln!(w)?;

            section(&mut w, "Per configuration")?;
            for c in &stats.by_configuration {
                writeln!(
                    w,
                    "{:<20} samples {:>5}  mean FPS {:>10.2}  min FPS {:>10.2}  triangles {}..={}",
                    c.effects.label(),
                    c.sample_count,
                    c.fps.mean,
                    c.fps.min,
                    c.min_triangles,
                    c.max_triangles
                )?;
            }
        }
    }
    writeln!(w)?;

    section(&mut w, "Analysis")?;
    writeln!(
        w,
        "Compare the frame rate curves of each configuration at equal triangle counts to"
    )?;
    writeln!(
        w,
        "isolate the cost of lighting and texturing. The CSV export holds the full series."
    )?;
    w.flush()
}

fn section<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    writeln!(w, "{title}")?;
    writeln!(w, "{}", "-".repeat(title.len()))
}

fn metric_line<W: Write>(w: &mut W, name: &str, stats: &MetricStats) -> io::Result<()> {
    writeln!(
        w,
        "{name:<6} min {:>10.2}  mean {:>10.2}  max {:>10.2}",
        stats.min, stats.mean, stats.max
    )
}
