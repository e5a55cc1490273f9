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

//! Per-vertex shading used by the headless backend.

use trisweep_core::light::{Light, MAX_LIGHTS};
use trisweep_core::Vec3;

/// Ambient term applied to every lit vertex.
pub const AMBIENT: Vec3 = Vec3::new(0.6, 0.6, 0.7);
/// Specular exponent.
pub const SHININESS: i32 = 32;
/// Camera position used for the specular term.
pub const VIEW_POSITION: Vec3 = Vec3::new(0.0, 0.0, 3.0);

/// Contribution of a single light (diffuse plus specular), before the base
/// color is applied. Disabled lights contribute nothing.
pub fn light_contribution(light: &Light, normal: Vec3, position: Vec3, view_dir: Vec3) -> Vec3 {
    if !light.enabled {
        return Vec3::ZERO;
    }

    let to_light = light.position - position;
    let distance = to_light.length();
    let light_dir = to_light.normalize();
    let attenuation = Light::attenuation(distance);
    let energy = light.color * (light.intensity * attenuation);

    let diffuse = normal.dot(light_dir).max(0.0);
    let reflected = (-light_dir).reflect(normal);
    let specular = view_dir.dot(reflected).max(0.0).powi(SHININESS);

    energy * (diffuse + specular)
}

/// Shades `base` at `position` with the first [`MAX_LIGHTS`] lights.
pub fn shade(base: Vec3, normal: Vec3, position: Vec3, lights: &[Light]) -> Vec3 {
    let normal = normal.normalize();
    let view_dir = (VIEW_POSITION - position).normalize();

    let mut result = AMBIENT.mul_elem(base);
    for light in lights.iter().take(MAX_LIGHTS) {
        result = result + light_contribution(light, normal, position, view_dir).mul_elem(base);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn no_lights_leaves_ambient_only() {
        let shaded = shade(Vec3::ONE, Vec3::Z, Vec3::ZERO, &[]);
        assert_relative_eq!(shaded.x, 0.6);
        assert_relative_eq!(shaded.z, 0.7);
    }

    #[test]
    fn light_facing_the_surface_brightens_it() {
        let light = Light::omnidirectional(Vec3::new(0.0, 0.0, 2.0), Vec3::ONE, 1.0);
        let shaded = shade(Vec3::ONE, Vec3::Z, Vec3::ZERO, &[light]);
        assert!(shaded.x > 0.6);

        // Diffuse = 1, specular = 1 (reflection points at the camera).
        let expected = 0.6 + 2.0 * Light::attenuation(2.0);
        assert_relative_eq!(shaded.x, expected, epsilon = 1e-5);
    }

    #[test]
    fn disabled_and_backfacing_lights_contribute_nothing() {
        let mut light = Light::omnidirectional(Vec3::new(0.0, 0.0, 2.0), Vec3::ONE, 1.0);
        light.enabled = false;
        let view = (VIEW_POSITION - Vec3::ZERO).normalize();
        assert_eq!(light_contribution(&light, Vec3::Z, Vec3::ZERO, view), Vec3::ZERO);

        let behind = Light::omnidirectional(Vec3::new(0.0, 0.0, -2.0), Vec3::ONE, 1.0);
        assert_eq!(light_contribution(&behind, Vec3::Z, Vec3::ZERO, view), Vec3::ZERO);
    }
}
