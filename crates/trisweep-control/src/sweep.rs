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

//! The phased benchmark state machine.
//!
//! The controller owns the [`PerformanceRecorder`] and is fed one FPS value per
//! sampling window. It never looks at the clock itself, so it can be driven
//! entirely with synthetic values.

use crate::plan::{SweepPhase, SweepPlan};
use std::path::PathBuf;
use trisweep_core::{EffectConfiguration, Scene, SystemInfo};
use trisweep_telemetry::{ExportError, PerformanceRecorder, Sample};

/// Where the controller currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepState {
    /// Not sweeping. Windows are not recorded.
    #[default]
    Idle,
    /// Sweeping through the plan.
    Running {
        /// Index of the active phase.
        phase_index: usize,
        /// Triangle count being measured.
        triangle_count: usize,
    },
    /// The last phase is exhausted and the reports were exported.
    Complete,
}

impl SweepState {
    /// Returns `true` while a sweep is in progress.
    pub fn is_running(&self) -> bool {
        matches!(self, SweepState::Running { .. })
    }
}

/// Static settings of a controller.
#[derive(Debug, Clone)]
pub struct SweepOptions {
    /// CSV export destination.
    pub csv_path: PathBuf,
    /// Summary report destination.
    pub summary_path: PathBuf,
    /// Whether [`SweepController::reset`] also discards the recorded samples.
    pub reset_clears_history: bool,
    /// Host identification written into the summary report.
    pub system_info: SystemInfo,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data/advanced_performance_data.csv"),
            summary_path: PathBuf::from("reports/advanced_performance_report.txt"),
            reset_clears_history: false,
            system_info: SystemInfo::unknown(),
        }
    }
}

/// The outcome of feeding one window to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepEvent {
    /// Not running; nothing was recorded.
    NotRunning,
    /// A sample was recorded and the count advanced within the phase.
    Stepped {
        /// The recorded sample.
        sample: Sample,
        /// The triangle count for the next window.
        next_count: usize,
    },
    /// A sample was recorded and the next phase started.
    PhaseAdvanced {
        /// The recorded sample.
        sample: Sample,
        /// Index of the phase that just started.
        phase_index: usize,
    },
    /// The final sample was recorded and the sweep is complete.
    Completed {
        /// The recorded sample.
        sample: Sample,
        /// `true` if both reports were written.
        exported: bool,
    },
}

/// Walks a [`SweepPlan`], recording one sample per window.
#[derive(Debug)]
pub struct SweepController {
    plan: SweepPlan,
    recorder: PerformanceRecorder,
    options: SweepOptions,
    state: SweepState,
    export_errors: Vec<ExportError>,
}

impl SweepController {
    /// Creates an idle controller.
    pub fn new(plan: SweepPlan, recorder: PerformanceRecorder, options: SweepOptions) -> Self {
        Self {
            plan,
            recorder,
            options,
            state: SweepState::Idle,
            export_errors: Vec::new(),
        }
    }

    /// The current state.
    pub fn state(&self) -> SweepState {
        self.state
    }

    /// The plan being executed.
    pub fn plan(&self) -> &SweepPlan {
        &self.plan
    }

    /// The controller options.
    pub fn options(&self) -> &SweepOptions {
        &self.options
    }

    /// The active phase while running.
    pub fn current_phase(&self) -> Option<&SweepPhase> {
        match self.state {
            SweepState::Running { phase_index, .. } => self.plan.phase(phase_index),
            _ => None,
        }
    }

    /// The sample buffer.
    pub fn recorder(&self) -> &PerformanceRecorder {
        &self.recorder
    }

    /// Consumes the controller, returning its sample buffer.
    pub fn into_recorder(self) -> PerformanceRecorder {
        self.recorder
    }

    /// Errors raised by the last completion export, if any.
    pub fn export_errors(&self) -> &[ExportError] {
        &self.export_errors
    }

    /// Starts a sweep from the first phase.
    ///
    /// Starting from `Complete` performs a [`reset`](Self::reset) first. Has no
    /// effect while already running.
    pub fn start(&mut self, scene: &mut Scene) {
        match self.state {
            SweepState::Running { .. } => {
                log::warn!("Sweep already running, ignoring start request");
                return;
            }
            SweepState::Complete => self.reset(scene),
            SweepState::Idle => {}
        }

        log::info!(
            "=== Starting sweep: {} phases, {} samples expected ===",
            self.plan.len(),
            self.plan.total_samples()
        );
        self.enter_phase(0, scene);
    }

    /// Stops a running sweep. Recorded samples are kept and nothing is exported.
    pub fn halt(&mut self) {
        if let SweepState::Running {
            phase_index,
            triangle_count,
        } = self.state
        {
            log::info!(
                "Sweep halted in phase {} at {} triangles",
                phase_index,
                triangle_count
            );
            self.state = SweepState::Idle;
        }
    }

    /// Returns to `Idle` at the first phase's initial count.
    ///
    /// Reports already on disk are left alone. The sample buffer is only
    /// cleared when [`SweepOptions::reset_clears_history`] is set.
    pub fn reset(&mut self, scene: &mut Scene) {
        self.state = SweepState::Idle;
        self.export_errors.clear();
        if self.options.reset_clears_history {
            self.recorder.clear();
        }
        scene.population.resize(self.plan.first().min_triangles);
        log::info!(
            "Sweep reset to {} triangles ({} samples kept)",
            self.plan.first().min_triangles,
            self.recorder.len()
        );
    }

    /// Feeds the FPS value of one completed sampling window.
    ///
    /// While running, records a sample for the current count and effects, then
    /// advances the count, the phase, or completes the sweep.
    pub fn on_window(&mut self, fps: f64, scene: &mut Scene) -> SweepEvent {
        let SweepState::Running {
            phase_index,
            triangle_count,
        } = self.state
        else {
            return SweepEvent::NotRunning;
        };
        let Some(phase) = self.plan.phase(phase_index) else {
            log::error!("Phase index {} out of range, halting sweep", phase_index);
            self.state = SweepState::Idle;
            return SweepEvent::NotRunning;
        };

        let sample = *self.recorder.record(fps, triangle_count, scene.effects);

        if let Some(next_count) = phase.next_count(triangle_count) {
            scene.population.resize(next_count);
            self.state = SweepState::Running {
                phase_index,
                triangle_count: next_count,
            };
            return SweepEvent::Stepped { sample, next_count };
        }

        let next_phase = phase_index + 1;
        if next_phase < self.plan.len() {
            self.enter_phase(next_phase, scene);
            return SweepEvent::PhaseAdvanced {
                sample,
                phase_index: next_phase,
            };
        }

        self.state = SweepState::Complete;
        log::info!(
            "=== Sweep complete: {} samples recorded ===",
            self.recorder.len()
        );
        let exported = self.export();
        SweepEvent::Completed { sample, exported }
    }

    fn enter_phase(&mut self, phase_index: usize, scene: &mut Scene) {
        let Some(phase) = self.plan.phase(phase_index) else {
            return;
        };
        apply_effects(&mut scene.effects, phase.effects);
        scene.population.resize(phase.min_triangles);
        self.state = SweepState::Running {
            phase_index,
            triangle_count: phase.min_triangles,
        };
        log::info!(
            "Starting phase {}/{} '{}' ({}): {}..={} step {}",
            phase_index + 1,
            self.plan.len(),
            phase.name,
            phase.effects,
            phase.min_triangles,
            phase.max_triangles,
            phase.step
        );
    }

    fn export(&mut self) -> bool {
        self.export_errors.clear();
        if let Err(e) = self.recorder.export_csv(&self.options.csv_path) {
            log::error!("CSV export failed: {}", e);
            self.export_errors.push(e);
        }
        if let Err(e) = self
            .recorder
            .export_summary(&self.options.summary_path, &self.options.system_info)
        {
            log::error!("Summary export failed: {}", e);
            self.export_errors.push(e);
        }
        self.export_errors.is_empty()
    }
}

fn apply_effects(current: &mut EffectConfiguration, target: EffectConfiguration) {
    current.set_lighting(target.lighting_enabled);
    current.set_texturing(target.texturing_enabled);
}
