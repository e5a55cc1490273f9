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
use clap::{Args, ValueEnum};
use crossbeam_channel::{Receiver, TryRecvError};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use trisweep_core::{MonotonicClock, VertexLayout};
use trisweep_infra::HeadlessRenderer;
use trisweep_sdk::config::positive_duration;
use trisweep_sdk::prelude::SweepState;
use trisweep_sdk::{
    host_probes, host_system_info, BenchmarkConfig, BenchmarkContext, Signal, SweepPreset,
};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Load settings from a .toml or .json file
    #[arg(long, short)]
    pub config: Option<PathBuf>,
    /// Start from a built-in preset (ignored when --config is given)
    #[arg(long, short, default_value_t = SweepPreset::Advanced)]
    pub preset: SweepPreset,
    /// Sampling window in seconds
    #[arg(long)]
    pub window: Option<f64>,
    /// Seed for the triangle population
    #[arg(long)]
    pub seed: Option<u64>,
    /// Give up after this many seconds, without exporting
    #[arg(long)]
    pub max_seconds: Option<f64>,
    /// Start sweeping immediately in interactive mode
    #[arg(long)]
    pub auto_start: bool,
    /// Read key commands from stdin (enter toggles the run, q quits)
    #[arg(long, short)]
    pub interactive: bool,
    /// CSV output path
    #[arg(long)]
    pub csv: Option<PathBuf>,
    /// Summary report output path
    #[arg(long)]
    pub summary: Option<PathBuf>,
    /// Vertex layout fed to the draw backend
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,
    /// Discard recorded samples on reset
    #[arg(long)]
    pub reset_clears_history: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutArg {
    Basic,
    Extended,
}

impl From<LayoutArg> for VertexLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Basic => VertexLayout::Basic,
            LayoutArg::Extended => VertexLayout::Extended,
        }
    }
}

enum Command {
    Signal(Signal),
    Quit,
}

impl RunArgs {
    /// Loads the base configuration and applies the command-line overrides.
    fn resolve(&self) -> Result<BenchmarkConfig> {
        let mut config = match &self.config {
            Some(path) => BenchmarkConfig::from_file(path)?,
            None => BenchmarkConfig::preset(self.preset),
        };
        if let Some(window) = self.window {
            config.window_seconds = window;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(csv) = &self.csv {
            config.csv_path = csv.clone();
        }
        if let Some(summary) = &self.summary {
            config.summary_path = summary.clone();
        }
        if let Some(layout) = self.layout {
            config.vertex_layout = layout.into();
        }
        if self.reset_clears_history {
            config.reset_clears_history = true;
        }
        // Nobody can send a start signal without stdin.
        if self.auto_start || !self.interactive {
            config.auto_start = true;
        }
        config.validate()?;
        Ok(config)
    }

    /// The `--max-seconds` budget, rejected unless positive and representable.
    fn time_budget(&self) -> Result<Option<Duration>> {
        self.max_seconds
            .map(|seconds| {
                positive_duration(seconds).ok_or_else(|| {
                    anyhow::anyhow!(
                        "--max-seconds must be a positive number of seconds, got {seconds}"
                    )
                })
            })
            .transpose()
    }
}

pub fn execute(args: RunArgs) -> Result<()> {
    let config = args.resolve()?;
    let budget = args.time_budget()?;
    create_parent_dir(&config.csv_path)?;
    create_parent_dir(&config.summary_path)?;

    let mut context = BenchmarkContext::new(
        &config,
        host_probes(),
        host_system_info(),
        MonotonicClock::shared(),
    )?;
    let mut backend = HeadlessRenderer::new(config.vertex_layout);
    let commands = args.interactive.then(spawn_stdin_reader);

    let started = Instant::now();
    let mut last_frame = started;

    loop {
        if let Some(rx) = &commands {
            match rx.try_recv() {
                Ok(Command::Signal(signal)) => context.handle_signal(signal),
                Ok(Command::Quit) | Err(TryRecvError::Disconnected) => {
                    log::info!(
                        "Stopping on request, {} samples recorded",
                        context.recorder().len()
                    );
                    return Ok(());
                }
                Err(TryRecvError::Empty) => {}
            }
        }

        let now = Instant::now();
        let outcome = context.frame(now - last_frame, &mut backend)?;
        last_frame = now;

        if outcome.state == SweepState::Complete && !args.interactive {
            break;
        }
        if budget.is_some_and(|limit| started.elapsed() >= limit) {
            log::warn!(
                "Time budget of {:?} exhausted in state {:?}, exiting without exporting",
                budget.unwrap_or_default(),
                outcome.state
            );
            return Ok(());
        }
    }

    let errors = context.controller().export_errors();
    if !errors.is_empty() {
        anyhow::bail!("{} report(s) could not be written", errors.len());
    }
    log::info!(
        "Reports written to {} and {}",
        config.csv_path.display(),
        config.summary_path.display()
    );
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display())),
        _ => Ok(()),
    }
}

/// Turns stdin lines into commands on a background thread.
///
/// An empty line toggles the run, `q` quits, and every other character is
/// mapped with [`Signal::from_key`].
fn spawn_stdin_reader() -> Receiver<Command> {
    let (tx, rx) = crossbeam_channel::unbounded();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let commands = parse_line(&line);
            if commands.into_iter().any(|c| tx.send(c).is_err()) {
                break;
            }
        }
        log::debug!("stdin closed");
    });
    rx
}

fn parse_line(line: &str) -> Vec<Command> {
    if line.is_empty() {
        return vec![Command::Signal(Signal::ToggleRun)];
    }
    line.chars()
        .filter_map(|key| match key {
            'q' | 'Q' => Some(Command::Quit),
            key => Signal::from_key(key).map(Command::Signal),
        })
        .collect()
}
