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

//! Defines the fixed light rig read by the draw step when lighting is enabled.
//!
//! The rig is built once and never mutated by the benchmark core; backends
//! consume it read-only through [`crate::renderer::FrameInput`].

use crate::math::Vec3;
use serde::{Deserialize, Serialize};

/// The maximum number of lights a backend is expected to consume.
pub const MAX_LIGHTS: usize = 8;

/// A single light source.
///
/// The same struct describes both omnidirectional and spot lights in the
/// reference rig; they differ only in `radius`.
///
/// # Examples
///
/// ```
/// use trisweep_core::light::Light;
/// use trisweep_core::math::Vec3;
///
/// let lamp = Light::omnidirectional(Vec3::new(0.0, 0.0, 2.0), Vec3::ONE, 1.0);
/// assert!(lamp.enabled);
/// assert_eq!(lamp.radius, 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// World-space position of the light.
    pub position: Vec3,
    /// Linear RGB color of the light.
    pub color: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
    /// Radius of influence in world units.
    pub radius: f32,
    /// Disabled lights contribute nothing.
    pub enabled: bool,
}

impl Light {
    /// Radius given to omnidirectional lights.
    pub const DEFAULT_RADIUS: f32 = 10.0;

    /// Creates an enabled omnidirectional light.
    pub fn omnidirectional(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
            radius: Self::DEFAULT_RADIUS,
            enabled: true,
        }
    }

    /// Creates an enabled spot light with an explicit radius.
    pub fn spot(position: Vec3, color: Vec3, intensity: f32, radius: f32) -> Self {
        Self {
            position,
            color,
            intensity,
            radius,
            enabled: true,
        }
    }

    /// Distance attenuation `1 / (1 + 0.09 d + 0.032 d²)`.
    #[inline]
    pub fn attenuation(distance: f32) -> f32 {
        1.0 / (1.0 + 0.09 * distance + 0.032 * distance * distance)
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::omnidirectional(Vec3::ZERO, Vec3::ONE, 1.0)
    }
}

/// An ordered, immutable set of lights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightRig {
    lights: Vec<Light>,
}

impl LightRig {
    /// Creates a rig from an explicit list. Lights past [`MAX_LIGHTS`] are dropped.
    pub fn new(mut lights: Vec<Light>) -> Self {
        if lights.len() > MAX_LIGHTS {
            log::warn!(
                "Light rig truncated from {} to {} lights",
                lights.len(),
                MAX_LIGHTS
            );
            lights.truncate(MAX_LIGHTS);
        }
        Self { lights }
    }

    /// The reference rig: one white omnidirectional light and one orange spot light.
    pub fn reference() -> Self {
        Self::new(vec![
            Light::omnidirectional(Vec3::new(0.0, 0.0, 2.0), Vec3::ONE, 1.0),
            Light::spot(
                Vec3::new(0.0, 1.0, 1.0),
                Vec3::new(1.0, 0.5, 0.0),
                1.5,
                5.0,
            ),
        ])
    }

    /// Returns the lights in order.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Returns the number of lights in the rig.
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Returns `true` if the rig holds no light.
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_rig_has_point_and_spot() {
        let rig = LightRig::reference();
        assert_eq!(rig.len(), 2);
        assert_eq!(rig.lights()[0].radius, 10.0);
        assert_eq!(rig.lights()[1].radius, 5.0);
        assert_eq!(rig.lights()[1].color, Vec3::new(1.0, 0.5, 0.0));
        assert!(rig.lights().iter().all(|l| l.enabled));
    }

    #[test]
    fn rig_is_capped() {
        let rig = LightRig::new(vec![Light::default(); MAX_LIGHTS + 3]);
        assert_eq!(rig.len(), MAX_LIGHTS);
    }

    #[test]
    fn attenuation_falls_off() {
        assert_eq!(Light::attenuation(0.0), 1.0);
        assert!(Light::attenuation(5.0) < Light::attenuation(1.0));
    }
}
