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

//! The explicit benchmark context advanced once per frame.

use crate::config::{BenchmarkConfig, ConfigError};
use crate::signal::{Signal, MAX_MANUAL_TRIANGLES};
use anyhow::Context as _;
use std::time::Duration;
use trisweep_control::{SweepController, SweepEvent, SweepState};
use trisweep_core::{
    DrawBackend, DrawStats, EffectConfiguration, LightRig, Population, Scene, SharedClock,
    SystemInfo, VertexLayout,
};
use trisweep_telemetry::{FrameSampler, PerformanceRecorder, UtilizationProbes};

/// What happened during one call to [`BenchmarkContext::frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    /// Statistics reported by the draw backend.
    pub draw: DrawStats,
    /// The FPS value, when this frame closed a sampling window.
    pub fps: Option<f64>,
    /// The controller's reaction, when a window closed during a sweep.
    pub event: Option<SweepEvent>,
    /// The sweep state after the frame.
    pub state: SweepState,
}

/// Owns every piece of benchmark state.
///
/// Nothing here is global: the scene, the frame sampler and the sweep
/// controller (with its recorder) live in this value and are mutated only from
/// [`frame`](Self::frame), on the caller's thread.
#[derive(Debug)]
pub struct BenchmarkContext {
    scene: Scene,
    sampler: FrameSampler,
    controller: SweepController,
    pending: Option<Signal>,
    layout: VertexLayout,
    manual_step: usize,
}

impl BenchmarkContext {
    /// Validates `config` and builds an idle context at the first phase's
    /// initial count, with no effects enabled.
    ///
    /// With `auto_start` set, the sweep starts right away.
    pub fn new(
        config: &BenchmarkConfig,
        probes: UtilizationProbes,
        system_info: SystemInfo,
        clock: SharedClock,
    ) -> Result<Self, ConfigError> {
        let plan = config.validate()?;

        let mut population = match config.seed {
            Some(seed) => Population::with_seed(seed),
            None => Population::from_entropy(),
        };
        population.resize(plan.first().min_triangles);
        let scene = Scene::new(population, EffectConfiguration::BASIC, LightRig::reference());

        let recorder = PerformanceRecorder::new(probes, clock.clone());
        let controller =
            SweepController::new(plan, recorder, config.sweep_options(system_info));
        let sampler = FrameSampler::new(config.window(), clock);

        let mut context = Self {
            scene,
            sampler,
            controller,
            pending: None,
            layout: config.vertex_layout,
            manual_step: config.manual_step,
        };
        log::info!(
            "Benchmark context ready: {} phases, {:?} window, {} triangles",
            context.controller.plan().len(),
            config.window(),
            context.scene.population.count()
        );
        if config.auto_start {
            context.controller.start(&mut context.scene);
            context.sampler.reset();
        }
        Ok(context)
    }

    /// Queues a signal for the next frame.
    ///
    /// Only one signal is applied per frame; a newer signal replaces one that
    /// has not been applied yet.
    pub fn handle_signal(&mut self, signal: Signal) {
        if let Some(dropped) = self.pending.replace(signal) {
            log::debug!("Signal '{}' replaced by '{}'", dropped, signal);
        }
    }

    /// Runs one frame: applies the pending signal, animates, draws, samples,
    /// and steps the sweep when a window closes.
    pub fn frame(
        &mut self,
        delta: Duration,
        backend: &mut dyn DrawBackend,
    ) -> anyhow::Result<FrameOutcome> {
        if let Some(signal) = self.pending.take() {
            self.apply_signal(signal);
        }

        self.scene.population.tick(delta.as_secs_f32());

        let draw = backend.draw(&self.scene.frame_input()).with_context(|| {
            format!(
                "Backend '{}' failed to draw {} triangles ({})",
                backend.name(),
                self.scene.population.count(),
                self.scene.effects
            )
        })?;

        let fps = self.sampler.tick();
        let event = match fps {
            Some(fps) if self.controller.state().is_running() => {
                Some(self.controller.on_window(fps, &mut self.scene))
            }
            Some(fps) => {
                log::info!(
                    "FPS: {:.1} | Triangles: {} | Lighting: {} | Texturing: {}",
                    fps,
                    self.scene.population.count(),
                    on_off(self.scene.effects.lighting_enabled),
                    on_off(self.scene.effects.texturing_enabled)
                );
                None
            }
            None => None,
        };

        Ok(FrameOutcome {
            draw,
            fps,
            event,
            state: self.controller.state(),
        })
    }

    fn apply_signal(&mut self, signal: Signal) {
        log::debug!("Applying signal '{}'", signal);
        match signal {
            Signal::ToggleRun => {
                if self.controller.state().is_running() {
                    self.controller.halt();
                } else {
                    self.controller.start(&mut self.scene);
                }
                self.sampler.reset();
            }
            Signal::Reset => {
                self.controller.reset(&mut self.scene);
                self.sampler.reset();
            }
            Signal::ToggleLighting => {
                let mut effects = self.scene.effects;
                effects.lighting_enabled = !effects.lighting_enabled;
                self.set_effects(effects);
            }
            Signal::ToggleTexturing => {
                let mut effects = self.scene.effects;
                effects.texturing_enabled = !effects.texturing_enabled;
                self.set_effects(effects);
            }
            Signal::SetEffects(effects) => self.set_effects(effects),
            Signal::MoreTriangles => self.adjust_count(true),
            Signal::FewerTriangles => self.adjust_count(false),
        }
    }

    fn set_effects(&mut self, effects: EffectConfiguration) {
        if self.layout == VertexLayout::Basic && effects != EffectConfiguration::BASIC {
            log::warn!(
                "The basic vertex layout cannot render '{}', keeping '{}'",
                effects,
                self.scene.effects
            );
            return;
        }
        self.scene.effects.set_lighting(effects.lighting_enabled);
        self.scene.effects.set_texturing(effects.texturing_enabled);
        log::info!("Effects set to '{}'", self.scene.effects);
    }

    fn adjust_count(&mut self, increase: bool) {
        if self.controller.state().is_running() {
            log::warn!("Triangle count is driven by the running sweep, ignoring manual change");
            return;
        }
        let current = self.scene.population.count();
        let target = if increase {
            current.saturating_add(self.manual_step)
        } else {
            current.saturating_sub(self.manual_step)
        }
        .clamp(1, MAX_MANUAL_TRIANGLES);
        if target != current {
            self.scene.population.resize(target);
            log::info!("Triangle count: {}", target);
        }
    }

    /// The scene being drawn.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The sweep controller.
    pub fn controller(&self) -> &SweepController {
        &self.controller
    }

    /// The current sweep state.
    pub fn state(&self) -> SweepState {
        self.controller.state()
    }

    /// Samples recorded so far.
    pub fn recorder(&self) -> &PerformanceRecorder {
        self.controller.recorder()
    }

    /// Consumes the context, returning its sample buffer.
    pub fn into_recorder(self) -> PerformanceRecorder {
        self.controller.into_recorder()
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "ON"
    } else {
        "OFF"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use trisweep_control::SweepPhase;
    use trisweep_core::ManualClock;
    use trisweep_infra::HeadlessRenderer;

    const FRAME: Duration = Duration::from_millis(100);

    fn config(dir: &std::path::Path) -> BenchmarkConfig {
        BenchmarkConfig {
            window_seconds: 0.5,
            seed: Some(42),
            csv_path: dir.join("data.csv"),
            summary_path: dir.join("report.txt"),
            phases: vec![
                SweepPhase::new("Basic", EffectConfiguration::BASIC, 10, 30, 10),
                SweepPhase::new("Lighting", EffectConfiguration::LIGHTING, 10, 20, 10),
            ],
            ..BenchmarkConfig::default()
        }
    }

    fn context(config: &BenchmarkConfig) -> (BenchmarkContext, ManualClock) {
        let clock = ManualClock::new();
        let context = BenchmarkContext::new(
            config,
            UtilizationProbes::none(),
            SystemInfo::unknown(),
            Arc::new(clock.clone()),
        )
        .expect("valid config");
        (context, clock)
    }

    fn step(
        context: &mut BenchmarkContext,
        clock: &ManualClock,
        backend: &mut HeadlessRenderer,
    ) -> FrameOutcome {
        clock.advance(FRAME);
        context.frame(FRAME, backend).expect("frame")
    }

    #[test]
    fn new_context_is_idle_at_initial_count() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (context, _) = context(&config(dir.path()));
        assert_eq!(context.state(), SweepState::Idle);
        assert_eq!(context.scene().population.count(), 10);
        assert_eq!(context.scene().effects, EffectConfiguration::BASIC);
        assert!(context.recorder().is_empty());
    }

    #[test]
    fn idle_windows_are_not_recorded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (mut context, clock) = context(&config(dir.path()));
        let mut backend = HeadlessRenderer::new(VertexLayout::Extended);

        let emitted = (0..20)
            .filter_map(|_| step(&mut context, &clock, &mut backend).fps)
            .count();
        assert_eq!(emitted, 4);
        assert!(context.recorder().is_empty());
    }

    #[test]
    fn full_sweep_records_every_step_and_exports() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config(dir.path());
        let (mut context, clock) = context(&config);
        let mut backend = HeadlessRenderer::new(VertexLayout::Extended);

        context.handle_signal(Signal::ToggleRun);
        let mut frames = 0;
        while context.state() != SweepState::Complete {
            step(&mut context, &clock, &mut backend);
            frames += 1;
            assert!(frames < 1_000, "sweep never completed");
        }

        let samples = context.recorder().samples();
        let counts: Vec<usize> = samples.iter().map(|s| s.triangle_count).collect();
        assert_eq!(counts, vec![10, 20, 30, 10, 20]);
        assert!(!samples[2].lighting_enabled);
        assert!(samples[3].lighting_enabled);
        assert!(context.controller().export_errors().is_empty());
        assert!(config.csv_path.exists());
        assert!(config.summary_path.exists());
    }

    #[test]
    fn reset_signal_after_completion_returns_to_idle() {
        for reset_clears_history in [false, true] {
            let dir = tempfile::tempdir().expect("tempdir");
            let config = BenchmarkConfig {
                reset_clears_history,
                ..config(dir.path())
            };
            let (mut context, clock) = context(&config);
            let mut backend = HeadlessRenderer::new(VertexLayout::Extended);

            context.handle_signal(Signal::ToggleRun);
            let mut frames = 0;
            while context.state() != SweepState::Complete {
                step(&mut context, &clock, &mut backend);
                frames += 1;
                assert!(frames < 1_000, "sweep never completed");
            }
            let csv_before = std::fs::read_to_string(&config.csv_path).expect("csv written");
            let summary_before =
                std::fs::read_to_string(&config.summary_path).expect("summary written");
            assert_eq!(csv_before.lines().count(), 6);

            context.handle_signal(Signal::Reset);
            let outcome = step(&mut context, &clock, &mut backend);

            assert_eq!(outcome.state, SweepState::Idle);
            assert_eq!(context.scene().population.count(), 10);
            assert_eq!(std::fs::read_to_string(&config.csv_path).expect("csv"), csv_before);
            assert_eq!(
                std::fs::read_to_string(&config.summary_path).expect("summary"),
                summary_before
            );
            let expected = if reset_clears_history { 0 } else { 5 };
            assert_eq!(context.recorder().len(), expected);
        }
    }

    #[test]
    fn one_signal_per_frame_latest_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (mut context, clock) = context(&config(dir.path()));
        let mut backend = HeadlessRenderer::new(VertexLayout::Extended);

        context.handle_signal(Signal::ToggleLighting);
        context.handle_signal(Signal::ToggleTexturing);
        step(&mut context, &clock, &mut backend);
        assert_eq!(context.scene().effects, EffectConfiguration::TEXTURING);
    }

    #[test]
    fn manual_count_changes_are_clamped_and_ignored_while_running() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (mut context, clock) = context(&config(dir.path()));
        let mut backend = HeadlessRenderer::new(VertexLayout::Extended);

        context.handle_signal(Signal::FewerTriangles);
        step(&mut context, &clock, &mut backend);
        assert_eq!(context.scene().population.count(), 1);

        context.handle_signal(Signal::MoreTriangles);
        step(&mut context, &clock, &mut backend);
        assert_eq!(context.scene().population.count(), 101);

        context.handle_signal(Signal::ToggleRun);
        step(&mut context, &clock, &mut backend);
        assert_eq!(context.scene().population.count(), 10);
        context.handle_signal(Signal::MoreTriangles);
        step(&mut context, &clock, &mut backend);
        assert_eq!(context.scene().population.count(), 10);
    }

    #[test]
    fn toggle_run_halts_and_keeps_samples() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (mut context, clock) = context(&config(dir.path()));
        let mut backend = HeadlessRenderer::new(VertexLayout::Extended);

        context.handle_signal(Signal::ToggleRun);
        for _ in 0..6 {
            step(&mut context, &clock, &mut backend);
        }
        assert!(context.state().is_running());
        assert_eq!(context.recorder().len(), 1);

        context.handle_signal(Signal::ToggleRun);
        step(&mut context, &clock, &mut backend);
        assert_eq!(context.state(), SweepState::Idle);
        assert_eq!(context.recorder().len(), 1);
    }

    #[test]
    fn basic_layout_rejects_effect_toggles() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = BenchmarkConfig {
            vertex_layout: VertexLayout::Basic,
            phases: vec![SweepPhase::new("Basic", EffectConfiguration::BASIC, 5, 5, 1)],
            ..config(dir.path())
        };
        let (mut context, clock) = context(&config);
        let mut backend = HeadlessRenderer::new(VertexLayout::Basic);

        context.handle_signal(Signal::ToggleLighting);
        step(&mut context, &clock, &mut backend);
        assert_eq!(context.scene().effects, EffectConfiguration::BASIC);
    }

    #[test]
    fn auto_start_runs_immediately() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = BenchmarkConfig {
            auto_start: true,
            ..config(dir.path())
        };
        let (context, _) = context(&config);
        assert_eq!(
            context.state(),
            SweepState::Running {
                phase_index: 0,
                triangle_count: 10
            }
        );
    }

    #[test]
    fn draw_failures_carry_context() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (mut context, clock) = context(&config(dir.path()));
        let mut backend = HeadlessRenderer::new(VertexLayout::Basic);

        context.handle_signal(Signal::SetEffects(EffectConfiguration::LIGHTING));
        clock.advance(FRAME);
        let error = context.frame(FRAME, &mut backend).expect_err("basic layout cannot light");
        assert!(error.to_string().contains("failed to draw 10 triangles"));
    }
}
