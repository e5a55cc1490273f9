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

//! Windowed frame rate counter.

use std::time::Duration;
use trisweep_core::{SharedClock, Stopwatch};

/// Counts frames and emits one FPS value per elapsed window.
///
/// Windows are contiguous: the next window starts at the exact instant the
/// previous one was measured.
#[derive(Debug)]
pub struct FrameSampler {
    window: Duration,
    stopwatch: Stopwatch,
    frames: u64,
}

impl FrameSampler {
    /// Creates a sampler whose first window starts now.
    pub fn new(window: Duration, clock: SharedClock) -> Self {
        Self {
            window,
            stopwatch: Stopwatch::new(clock),
            frames: 0,
        }
    }

    /// Registers one rendered frame.
    ///
    /// Returns `Some(frames / elapsed_seconds)` once the window has elapsed,
    /// then starts a new window. Returns `None` otherwise.
    pub fn tick(&mut self) -> Option<f64> {
        self.frames += 1;
        let elapsed = self.stopwatch.lap_after(self.window)?;
        let fps = self.frames as f64 / elapsed.as_secs_f64();
        self.frames = 0;
        log::trace!("Frame window closed after {:?}: {:.2} FPS", elapsed, fps);
        Some(fps)
    }

    /// Drops the frames counted so far and starts a fresh window.
    pub fn reset(&mut self) {
        self.frames = 0;
        self.stopwatch.restart();
    }

    /// The configured window length.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Frames counted in the current, still open, window.
    pub fn frames_in_window(&self) -> u64 {
        self.frames
    }
}
