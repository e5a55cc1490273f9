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

//! Discrete external commands, at most one per frame.

use std::fmt;
use trisweep_core::EffectConfiguration;

/// Highest triangle count reachable with manual adjustments.
pub const MAX_MANUAL_TRIANGLES: usize = 999_999;

/// A command from the outside world (keyboard, stdin, a test).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Starts a sweep when idle or complete, halts it when running.
    ToggleRun,
    /// Returns the sweep to idle at its initial triangle count.
    Reset,
    /// Flips the lighting toggle.
    ToggleLighting,
    /// Flips the texturing toggle.
    ToggleTexturing,
    /// Sets both toggles at once.
    SetEffects(EffectConfiguration),
    /// Adds one manual step of triangles while idle.
    MoreTriangles,
    /// Removes one manual step of triangles while idle.
    FewerTriangles,
}

impl Signal {
    /// Maps a key to a signal.
    ///
    /// Space toggles the run, `r` resets, `l`/`t` flip lighting/texturing,
    /// `1`..`4` select basic/lighting/texturing/combined, `+`/`=` and `-`
    /// adjust the triangle count.
    pub fn from_key(key: char) -> Option<Self> {
        let signal = match key.to_ascii_lowercase() {
            ' ' => Signal::ToggleRun,
            'r' => Signal::Reset,
            'l' => Signal::ToggleLighting,
            't' => Signal::ToggleTexturing,
            '1' => Signal::SetEffects(EffectConfiguration::BASIC),
            '2' => Signal::SetEffects(EffectConfiguration::LIGHTING),
            '3' => Signal::SetEffects(EffectConfiguration::TEXTURING),
            '4' => Signal::SetEffects(EffectConfiguration::COMBINED),
            '+' | '=' => Signal::MoreTriangles,
            '-' => Signal::FewerTriangles,
            _ => return None,
        };
        Some(signal)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::ToggleRun => f.write_str("toggle run"),
            Signal::Reset => f.write_str("reset"),
            Signal::ToggleLighting => f.write_str("toggle lighting"),
            Signal::ToggleTexturing => f.write_str("toggle texturing"),
            Signal::SetEffects(effects) => write!(f, "set effects {effects}"),
            Signal::MoreTriangles => f.write_str("more triangles"),
            Signal::FewerTriangles => f.write_str("fewer triangles"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_signals() {
        assert_eq!(Signal::from_key(' '), Some(Signal::ToggleRun));
        assert_eq!(Signal::from_key('R'), Some(Signal::Reset));
        assert_eq!(
            Signal::from_key('4'),
            Some(Signal::SetEffects(EffectConfiguration::COMBINED))
        );
        assert_eq!(Signal::from_key('='), Some(Signal::MoreTriangles));
        assert_eq!(Signal::from_key('x'), None);
    }
}
