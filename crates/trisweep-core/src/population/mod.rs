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

//! The renderable population: a set of independently animated triangles.
//!
//! A [`Population`] is always regenerated as a whole. Resizing discards every
//! instance and draws a fresh set from the same distributions, so that every
//! triangle count in a sweep sees the same color/speed/position statistics.
//! Each effective resize bumps [`Population::generation`]; anything holding
//! vertex data derived from an older generation must re-fetch it.

mod vertex;

pub use vertex::{BasicVertex, ExtendedVertex, VertexLayout, TRIANGLE_HALF_SIZE};

use crate::math::{translation_rotation_z, Mat4, Vec3, TAU};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Horizontal/vertical range of instance positions.
pub const POSITION_RANGE: Range<f32> = -0.8..0.8;
/// Range of each color channel. Never fully dark.
pub const COLOR_RANGE: Range<f32> = 0.5..1.0;
/// Range of rotation speeds in radians per second. Strictly positive.
pub const ROTATION_SPEED_RANGE: Range<f32> = 0.5..2.0;

/// One animated triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    /// Center of the triangle.
    pub position: Vec3,
    /// Base color (linear RGB).
    pub color: [f32; 3],
    /// Surface normal, used by the extended vertex layout.
    pub normal: Vec3,
    /// Texture anchor, used by the extended vertex layout.
    pub uv: [f32; 2],
    rotation_speed: f32,
    current_rotation: f32,
}

impl Instance {
    /// Creates an instance at rest (`current_rotation == 0`).
    pub fn new(position: Vec3, color: [f32; 3], rotation_speed: f32) -> Self {
        Self {
            position,
            color,
            normal: Vec3::Z,
            uv: [0.5, 0.5],
            rotation_speed,
            current_rotation: 0.0,
        }
    }

    /// Constant angular speed in radians per second.
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Current angle in radians, always within `[0, 2π)`.
    pub fn current_rotation(&self) -> f32 {
        self.current_rotation
    }

    /// Advances the rotation by `rotation_speed * delta_seconds`.
    ///
    /// Once the angle reaches a full turn it snaps back to `0`.
    #[inline]
    pub fn advance(&mut self, delta_seconds: f32) {
        self.current_rotation += self.rotation_speed * delta_seconds;
        if !(0.0..TAU).contains(&self.current_rotation) {
            self.current_rotation = 0.0;
        }
    }

    /// The model matrix `translate(position) * rotate_z(current_rotation)`.
    pub fn model_matrix(&self) -> Mat4 {
        translation_rotation_z(self.position, self.current_rotation)
    }
}

/// Owns the set of animated triangle instances.
#[derive(Debug)]
pub struct Population {
    instances: Vec<Instance>,
    rng: StdRng,
    generation: u64,
}

impl Population {
    /// Creates an empty population drawing from the given generator.
    pub fn new(rng: StdRng) -> Self {
        Self {
            instances: Vec::new(),
            rng,
            generation: 0,
        }
    }

    /// Creates an empty population with a deterministic generator.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Creates an empty population seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Regenerates the population with exactly `count` fresh instances.
    ///
    /// A `count` of zero is ignored and the current population is kept.
    /// Returns `true` when the population was regenerated, in which case any
    /// previously fetched vertex data is stale.
    pub fn resize(&mut self, count: usize) -> bool {
        if count == 0 {
            log::debug!("Ignoring resize to 0 triangles");
            return false;
        }

        self.instances.clear();
        self.instances.reserve(count);
        for _ in 0..count {
            let instance = Instance::new(
                Vec3::new(
                    self.rng.gen_range(POSITION_RANGE),
                    self.rng.gen_range(POSITION_RANGE),
                    0.0,
                ),
                [
                    self.rng.gen_range(COLOR_RANGE),
                    self.rng.gen_range(COLOR_RANGE),
                    self.rng.gen_range(COLOR_RANGE),
                ],
                self.rng.gen_range(ROTATION_SPEED_RANGE),
            );
            self.instances.push(instance);
        }
        self.generation += 1;

        log::debug!(
            "Population regenerated: {} triangles (generation {})",
            count,
            self.generation
        );
        true
    }

    /// Advances every instance's rotation. A no-op on an empty population.
    pub fn tick(&mut self, delta_seconds: f32) {
        for instance in &mut self.instances {
            instance.advance(delta_seconds);
        }
    }

    /// Returns the current number of instances.
    pub fn count(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` if the population holds no instance.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Read-only view of the instances.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Incremented on every effective resize or clear.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Discards every instance.
    pub fn clear(&mut self) {
        if !self.instances.is_empty() {
            self.instances.clear();
            self.generation += 1;
        }
    }

    /// Builds the interleaved vertex stream for the whole population.
    ///
    /// Three vertices per instance, in instance order, laid out as described
    /// by `layout`.
    pub fn vertex_data(&self, layout: VertexLayout) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.instances.len() * 3 * layout.floats_per_vertex());
        match layout {
            VertexLayout::Basic => {
                for instance in &self.instances {
                    let vertices = BasicVertex::for_instance(instance);
                    data.extend_from_slice(bytemuck::cast_slice(&vertices));
                }
            }
            VertexLayout::Extended => {
                for instance in &self.instances {
                    let vertices = ExtendedVertex::for_instance(instance);
                    data.extend_from_slice(bytemuck::cast_slice(&vertices));
                }
            }
        }
        data
    }
}

impl Default for Population {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn resize_generates_exact_count_at_rest() {
        let mut population = Population::with_seed(7);
        assert!(population.resize(250));
        assert_eq!(population.count(), 250);
        for instance in population.instances() {
            assert_eq!(instance.current_rotation(), 0.0);
            assert!(instance.rotation_speed() > 0.0);
            assert!(ROTATION_SPEED_RANGE.contains(&instance.rotation_speed()));
            assert!(POSITION_RANGE.contains(&instance.position.x));
            assert!(POSITION_RANGE.contains(&instance.position.y));
            assert_eq!(instance.position.z, 0.0);
            assert!(instance.color.iter().all(|c| COLOR_RANGE.contains(c)));
        }
    }

    #[test]
    fn zero_resize_keeps_previous_population() {
        let mut population = Population::with_seed(1);
        population.resize(10);
        population.tick(0.25);
        let before = population.instances().to_vec();
        let generation = population.generation();

        assert!(!population.resize(0));
        assert_eq!(population.instances(), before.as_slice());
        assert_eq!(population.generation(), generation);
    }

    #[test]
    fn resize_regenerates_instead_of_appending() {
        let mut population = Population::with_seed(3);
        population.resize(5);
        population.tick(1.0);
        population.resize(8);
        assert_eq!(population.count(), 8);
        assert!(population
            .instances()
            .iter()
            .all(|i| i.current_rotation() == 0.0));
        assert_eq!(population.generation(), 2);
    }

    #[test]
    fn tick_on_empty_population_is_noop() {
        let mut population = Population::with_seed(0);
        population.tick(1.0);
        assert!(population.is_empty());
        assert_eq!(population.generation(), 0);
    }

    #[test]
    fn split_ticks_match_single_tick() {
        let mut a = Population::with_seed(11);
        let mut b = Population::with_seed(11);
        a.resize(32);
        b.resize(32);

        let dt = 0.5;
        a.tick(dt);
        for _ in 0..10 {
            b.tick(dt / 10.0);
        }

        for (x, y) in a.instances().iter().zip(b.instances()) {
            assert_relative_eq!(x.current_rotation(), y.current_rotation(), epsilon = 1e-4);
        }
    }

    #[test]
    fn rotation_wraps_to_zero() {
        let mut instance = Instance::new(Vec3::ZERO, [1.0; 3], 2.0);
        instance.advance(TAU / 2.0 - 0.01);
        assert!(instance.current_rotation() > 0.0);
        instance.advance(0.02);
        assert_eq!(instance.current_rotation(), 0.0);

        let mut population = Population::with_seed(5);
        population.resize(16);
        for _ in 0..10_000 {
            population.tick(0.016);
            for instance in population.instances() {
                assert!(instance.current_rotation() >= 0.0);
                assert!(instance.current_rotation() < TAU);
            }
        }
    }

    #[test]
    fn clear_bumps_generation_once() {
        let mut population = Population::with_seed(2);
        population.resize(3);
        population.clear();
        population.clear();
        assert!(population.is_empty());
        assert_eq!(population.generation(), 2);
    }

    #[test]
    fn vertex_data_has_three_vertices_per_instance() {
        let mut population = Population::with_seed(9);
        population.resize(4);
        assert_eq!(population.vertex_data(VertexLayout::Basic).len(), 4 * 3 * 6);
        assert_eq!(
            population.vertex_data(VertexLayout::Extended).len(),
            4 * 3 * 11
        );

        let first = population.instances()[0];
        let data = population.vertex_data(VertexLayout::Basic);
        assert_relative_eq!(data[0], first.position.x);
        assert_relative_eq!(data[1], first.position.y + TRIANGLE_HALF_SIZE);
        assert_relative_eq!(data[3], first.color[0]);
    }
}
