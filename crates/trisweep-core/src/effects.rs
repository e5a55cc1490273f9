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

//! The two independent effect toggles consumed by the draw step.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which optional effects the draw step applies.
///
/// Both toggles are independent and every combination is legal, including
/// texturing without lighting. The configuration is not tied to the population
/// and survives resizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectConfiguration {
    /// Whether the light rig contributes to shading.
    #[serde(default)]
    pub lighting_enabled: bool,
    /// Whether the procedural texture modulates the shaded color.
    #[serde(default)]
    pub texturing_enabled: bool,
}

impl EffectConfiguration {
    /// No effects.
    pub const BASIC: Self = Self::new(false, false);
    /// Lighting only.
    pub const LIGHTING: Self = Self::new(true, false);
    /// Texturing only.
    pub const TEXTURING: Self = Self::new(false, true);
    /// Lighting and texturing.
    pub const COMBINED: Self = Self::new(true, true);

    /// Creates a configuration from both toggles.
    pub const fn new(lighting_enabled: bool, texturing_enabled: bool) -> Self {
        Self {
            lighting_enabled,
            texturing_enabled,
        }
    }

    /// Returns whether lighting is enabled.
    pub fn lighting(&self) -> bool {
        self.lighting_enabled
    }

    /// Returns whether texturing is enabled.
    pub fn texturing(&self) -> bool {
        self.texturing_enabled
    }

    /// Enables or disables lighting.
    pub fn set_lighting(&mut self, enabled: bool) {
        self.lighting_enabled = enabled;
        log::debug!("Lighting {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Enables or disables texturing.
    pub fn set_texturing(&mut self, enabled: bool) {
        self.texturing_enabled = enabled;
        log::debug!("Texturing {}", if enabled { "enabled" } else { "disabled" });
    }

    /// A short human-readable label, e.g. `"lighting+texturing"`.
    pub fn label(&self) -> &'static str {
        match (self.lighting_enabled, self.texturing_enabled) {
            (false, false) => "basic",
            (true, false) => "lighting",
            (false, true) => "texturing",
            (true, true) => "lighting+texturing",
        }
    }
}

impl fmt::Display for EffectConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_are_independent() {
        let mut effects = EffectConfiguration::default();
        effects.set_texturing(true);
        assert!(!effects.lighting());
        assert!(effects.texturing());

        effects.set_lighting(true);
        effects.set_texturing(false);
        assert_eq!(effects, EffectConfiguration::LIGHTING);
    }

    #[test]
    fn labels_cover_every_combination() {
        assert_eq!(EffectConfiguration::BASIC.to_string(), "basic");
        assert_eq!(EffectConfiguration::TEXTURING.label(), "texturing");
        assert_eq!(EffectConfiguration::COMBINED.label(), "lighting+texturing");
    }
}
