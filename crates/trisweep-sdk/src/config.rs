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

//! Benchmark configuration, loadable from TOML or JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use trisweep_control::{PlanError, SweepOptions, SweepPhase, SweepPlan};
use trisweep_core::{SystemInfo, VertexLayout};

/// Errors raised while loading or validating a [`BenchmarkConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// The file extension is neither `.toml` nor `.json`.
    #[error("Unsupported config format for '{0}', expected .toml or .json")]
    UnsupportedFormat(PathBuf),
    /// TOML syntax or schema error.
    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    /// TOML serialization failure.
    #[error("Failed to serialize config as TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    /// JSON syntax or schema error.
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    /// The sampling window must be a positive number of seconds that fits a [`Duration`].
    #[error("Sampling window must be a positive, representable number of seconds, got {0}")]
    InvalidWindow(f64),
    /// The manual triangle step must be at least one.
    #[error("Manual triangle step must be at least 1")]
    InvalidManualStep,
    /// The phase list is not a valid plan.
    #[error(transparent)]
    Plan(#[from] PlanError),
    /// A phase asks for effects the vertex layout cannot feed.
    #[error("Phase '{phase}' enables {effects} but the {layout:?} vertex layout has no normals or texture coordinates")]
    LayoutMismatch {
        /// Offending phase.
        phase: String,
        /// Its effect label.
        effects: String,
        /// Configured layout.
        layout: VertexLayout,
    },
}

/// The reference sweep presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepPreset {
    /// One basic phase, `1..=1000` step 50.
    Baseline,
    /// Basic, Lighting, Texturing, Combined at `1..=500` step 25.
    #[default]
    Advanced,
    /// Basic, Lighting, Combined at `10000..=200000` step 10000, 2 s window.
    Extreme,
}

impl SweepPreset {
    /// All presets.
    pub const ALL: [SweepPreset; 3] = [
        SweepPreset::Baseline,
        SweepPreset::Advanced,
        SweepPreset::Extreme,
    ];

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            SweepPreset::Baseline => "baseline",
            SweepPreset::Advanced => "advanced",
            SweepPreset::Extreme => "extreme",
        }
    }
}

impl fmt::Display for SweepPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SweepPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SweepPreset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown preset '{s}', expected baseline, advanced or extreme"))
    }
}

/// Everything needed to set up a [`BenchmarkContext`](crate::BenchmarkContext).
///
/// Missing fields take the values of the `advanced` preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchmarkConfig {
    /// Length of one sampling window in seconds.
    pub window_seconds: f64,
    /// CSV export destination.
    pub csv_path: PathBuf,
    /// Summary report destination.
    pub summary_path: PathBuf,
    /// Whether a reset also discards recorded samples.
    pub reset_clears_history: bool,
    /// Population RNG seed. Seeded from the OS when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Vertex layout handed to the draw backend.
    pub vertex_layout: VertexLayout,
    /// Triangles added or removed by a manual adjustment.
    pub manual_step: usize,
    /// Start sweeping on the first frame instead of waiting for a signal.
    pub auto_start: bool,
    /// The sweep phases, in order.
    pub phases: Vec<SweepPhase>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self::preset(SweepPreset::Advanced)
    }
}

impl BenchmarkConfig {
    /// The configuration of a reference preset.
    pub fn preset(preset: SweepPreset) -> Self {
        let base = Self {
            window_seconds: 1.0,
            csv_path: PathBuf::from("data/advanced_performance_data.csv"),
            summary_path: PathBuf::from("reports/advanced_performance_report.txt"),
            reset_clears_history: false,
            seed: None,
            vertex_layout: VertexLayout::Extended,
            manual_step: 100,
            auto_start: false,
            phases: SweepPlan::advanced().phases().to_vec(),
        };
        match preset {
            SweepPreset::Advanced => base,
            SweepPreset::Baseline => Self {
                phases: SweepPlan::baseline().phases().to_vec(),
                csv_path: PathBuf::from("data/performance_data.csv"),
                summary_path: PathBuf::from("reports/performance_report.txt"),
                vertex_layout: VertexLayout::Basic,
                ..base
            },
            SweepPreset::Extreme => Self {
                window_seconds: 2.0,
                phases: SweepPlan::extreme().phases().to_vec(),
                csv_path: PathBuf::from("data/extreme_performance_data.csv"),
                summary_path: PathBuf::from("reports/extreme_performance_report.txt"),
                ..base
            },
        }
    }

    /// Parses a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Parses a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads a `.toml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let read = || {
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        };
        let config = match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&read()?)?,
            Some("json") => Self::from_json_str(&read()?)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        log::debug!("Loaded benchmark config from {}", path.display());
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The sampling window as a [`Duration`].
    ///
    /// Zero when `window_seconds` does not pass [`validate`](Self::validate).
    pub fn window(&self) -> Duration {
        positive_duration(self.window_seconds).unwrap_or_default()
    }

    /// Checks every field and returns the validated plan.
    pub fn validate(&self) -> Result<SweepPlan, ConfigError> {
        if positive_duration(self.window_seconds).is_none() {
            return Err(ConfigError::InvalidWindow(self.window_seconds));
        }
        if self.manual_step == 0 {
            return Err(ConfigError::InvalidManualStep);
        }
        let plan = SweepPlan::new(self.phases.clone())?;
        if self.vertex_layout == VertexLayout::Basic {
            if let Some(phase) = plan
                .phases()
                .iter()
                .find(|p| p.effects.lighting_enabled || p.effects.texturing_enabled)
            {
                return Err(ConfigError::LayoutMismatch {
                    phase: phase.name.clone(),
                    effects: phase.effects.label().to_string(),
                    layout: self.vertex_layout,
                });
            }
        }
        Ok(plan)
    }

    /// Controller options derived from this configuration.
    pub fn sweep_options(&self, system_info: SystemInfo) -> SweepOptions {
        SweepOptions {
            csv_path: self.csv_path.clone(),
            summary_path: self.summary_path.clone(),
            reset_clears_history: self.reset_clears_history,
            system_info,
        }
    }
}

/// Converts seconds to a [`Duration`], or `None` unless the value is positive
/// and representable.
pub fn positive_duration(seconds: f64) -> Option<Duration> {
    if seconds <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(seconds).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trisweep_core::EffectConfiguration;

    #[test]
    fn defaults_match_advanced_preset() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.window(), Duration::from_secs(1));
        assert_eq!(config.phases.len(), 4);
        assert_eq!(
            config.csv_path,
            PathBuf::from("data/advanced_performance_data.csv")
        );
        assert!(!config.reset_clears_history);
        assert_eq!(config.vertex_layout, VertexLayout::Extended);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn every_preset_validates() {
        for preset in SweepPreset::ALL {
            let config = BenchmarkConfig::preset(preset);
            assert!(config.validate().is_ok(), "{preset} should be valid");
        }
        assert_eq!(
            BenchmarkConfig::preset(SweepPreset::Extreme).window(),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config = BenchmarkConfig::from_toml_str(
            r#"
            window_seconds = 0.5
            seed = 7
            csv_path = "out/run.csv"

            [[phases]]
            name = "Lit"
            lighting_enabled = true
            min_triangles = 10
            max_triangles = 40
            step = 10
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.window(), Duration::from_millis(500));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.csv_path, PathBuf::from("out/run.csv"));
        assert_eq!(
            config.summary_path,
            PathBuf::from("reports/advanced_performance_report.txt")
        );
        assert_eq!(config.phases.len(), 1);
        assert_eq!(config.phases[0].effects, EffectConfiguration::LIGHTING);
        assert_eq!(config.validate().map(|p| p.total_samples()).ok(), Some(4));
    }

    #[test]
    fn json_is_accepted() {
        let config =
            BenchmarkConfig::from_json_str(r#"{ "auto_start": true, "reset_clears_history": true }"#)
                .expect("valid json");
        assert!(config.auto_start);
        assert!(config.reset_clears_history);
        assert_eq!(config.phases.len(), 4);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            BenchmarkConfig::from_toml_str("window = 1.0"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn validation_catches_bad_values() {
        let mut config = BenchmarkConfig {
            window_seconds: 0.0,
            ..BenchmarkConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWindow(_))));

        config.window_seconds = 1.0;
        config.phases.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Plan(PlanError::Empty))
        ));

        let mismatch = BenchmarkConfig {
            vertex_layout: VertexLayout::Basic,
            ..BenchmarkConfig::default()
        };
        assert!(matches!(
            mismatch.validate(),
            Err(ConfigError::LayoutMismatch { .. })
        ));
    }

    #[test]
    fn unrepresentable_windows_are_rejected() {
        for window_seconds in [1e20, f64::NAN, f64::INFINITY, -2.0] {
            let config = BenchmarkConfig {
                window_seconds,
                ..BenchmarkConfig::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::InvalidWindow(_))));
            assert_eq!(config.window(), Duration::ZERO);
        }
        assert_eq!(positive_duration(0.25), Some(Duration::from_millis(250)));
        assert_eq!(positive_duration(0.0), None);
    }

    #[test]
    fn toml_output_reloads() {
        let config = BenchmarkConfig {
            seed: Some(3),
            ..BenchmarkConfig::preset(SweepPreset::Extreme)
        };
        let text = config.to_toml_string().expect("serializable");
        assert_eq!(BenchmarkConfig::from_toml_str(&text).expect("reloads"), config);
    }

    #[test]
    fn presets_parse_from_names() {
        assert_eq!("Extreme".parse::<SweepPreset>(), Ok(SweepPreset::Extreme));
        assert!("turbo".parse::<SweepPreset>().is_err());
    }
}
