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

use anyhow::{Context, Result};
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;
use trisweep_telemetry::report::read_csv_file;
use trisweep_telemetry::stats::{by_configuration, by_triangle_count};
use trisweep_telemetry::{Sample, SummaryStatistics};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// CSV file produced by `trisweep run`
    pub csv: PathBuf,
    /// Print machine-readable JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let samples = read_csv_file(&args.csv)
        .with_context(|| format!("Failed to load samples from {}", args.csv.display()))?;
    log::info!("Loaded {} samples from {}", samples.len(), args.csv.display());

    let output = if args.json {
        render_json(&samples)?
    } else {
        render_tables(&samples)
    };
    println!("{output}");
    Ok(())
}

fn render_json(samples: &[Sample]) -> Result<String> {
    let value = serde_json::json!({
        "summary": SummaryStatistics::from_samples(samples),
        "by_triangle_count": by_triangle_count(samples),
    });
    serde_json::to_string_pretty(&value).context("Failed to encode analysis as JSON")
}

fn render_tables(samples: &[Sample]) -> String {
    let mut out = String::new();
    if samples.is_empty() {
        out.push_str("No samples recorded.");
        return out;
    }

    let _ = writeln!(out, "Per configuration");
    let _ = writeln!(
        out,
        "{:<20} {:>8} {:>10} {:>10} {:>10} {:>17}",
        "configuration", "samples", "mean fps", "min fps", "max fps", "triangles"
    );
    for row in by_configuration(samples) {
        let _ = writeln!(
            out,
            "{:<20} {:>8} {:>10.2} {:>10.2} {:>10.2} {:>17}",
            row.effects.label(),
            row.sample_count,
            row.fps.mean,
            row.fps.min,
            row.fps.max,
            format!("{}..={}", row.min_triangles, row.max_triangles)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Mean FPS per triangle count");
    let _ = writeln!(
        out,
        "{:<20} {:>10} {:>8} {:>10}",
        "configuration", "triangles", "samples", "mean fps"
    );
    for row in by_triangle_count(samples) {
        let _ = writeln!(
            out,
            "{:<20} {:>10} {:>8} {:>10.2}",
            row.effects.label(),
            row.triangle_count,
            row.sample_count,
            row.mean_fps
        );
    }
    out.trim_end().to_string()
}
