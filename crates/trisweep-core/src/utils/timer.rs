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

//! Clock-driven stopwatch.

use super::clock::SharedClock;
use std::fmt;
use std::time::Duration;

/// Measures elapsed time against a [`Clock`](super::clock::Clock).
#[derive(Clone)]
pub struct Stopwatch {
    clock: SharedClock,
    start_time: Duration,
}

impl Stopwatch {
    /// Creates a new stopwatch and starts it immediately.
    #[inline]
    pub fn new(clock: SharedClock) -> Self {
        let start_time = clock.now();
        Self { clock, start_time }
    }

    /// Restarts the stopwatch from the current time.
    #[inline]
    pub fn restart(&mut self) {
        self.start_time = self.clock.now();
    }

    /// Once at least `min` (and more than zero) has elapsed, returns the
    /// elapsed time and restarts from the same instant, so consecutive laps
    /// are contiguous. The clock is read once.
    #[inline]
    pub fn lap_after(&mut self, min: Duration) -> Option<Duration> {
        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.start_time);
        if elapsed < min || elapsed.is_zero() {
            return None;
        }
        self.start_time = now;
        Some(elapsed)
    }
}

impl fmt::Debug for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stopwatch")
            .field("start_time", &self.start_time)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::clock::ManualClock;
    use std::sync::Arc;

    #[test]
    fn stopwatch_elapsed_time_after_advance() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_secs(5));
        let mut watch = Stopwatch::new(Arc::new(clock.clone()));

        clock.advance(Duration::from_millis(1500));
        assert_eq!(watch.lap_after(Duration::ZERO), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn laps_are_contiguous() {
        let clock = ManualClock::new();
        let mut watch = Stopwatch::new(Arc::new(clock.clone()));
        clock.advance(Duration::from_millis(300));
        assert_eq!(watch.lap_after(Duration::ZERO), Some(Duration::from_millis(300)));
        clock.advance(Duration::from_millis(700));
        assert_eq!(watch.lap_after(Duration::ZERO), Some(Duration::from_millis(700)));
    }

    #[test]
    fn lap_after_waits_for_minimum() {
        let clock = ManualClock::new();
        let mut watch = Stopwatch::new(Arc::new(clock.clone()));
        let min = Duration::from_millis(500);

        assert_eq!(watch.lap_after(Duration::ZERO), None);
        clock.advance(Duration::from_millis(400));
        assert_eq!(watch.lap_after(min), None);
        clock.advance(Duration::from_millis(150));
        assert_eq!(watch.lap_after(min), Some(Duration::from_millis(550)));
        assert_eq!(watch.lap_after(Duration::ZERO), None);
    }

    #[test]
    fn restart_resets_origin() {
        let clock = ManualClock::new();
        let mut watch = Stopwatch::new(Arc::new(clock.clone()));
        clock.advance(Duration::from_secs(2));
        watch.restart();
        clock.advance(Duration::from_millis(100));
        assert_eq!(watch.lap_after(Duration::ZERO), Some(Duration::from_millis(100)));
    }
}
