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

//! The mutable state the draw step consumes every frame.

use crate::effects::EffectConfiguration;
use crate::light::LightRig;
use crate::population::Population;
use crate::renderer::FrameInput;

/// Population, effect toggles and lights, owned together.
///
/// The sweep controller mutates the population size and the effects; the draw
/// backend only ever sees a read-only [`FrameInput`].
#[derive(Debug, Default)]
pub struct Scene {
    /// The animated triangles.
    pub population: Population,
    /// The active effect toggles.
    pub effects: EffectConfiguration,
    /// The light rig, never mutated by the benchmark core.
    pub lights: LightRig,
}

impl Scene {
    /// Creates a scene around an existing population.
    pub fn new(population: Population, effects: EffectConfiguration, lights: LightRig) -> Self {
        Self {
            population,
            effects,
            lights,
        }
    }

    /// Read-only view handed to a draw backend.
    pub fn frame_input(&self) -> FrameInput<'_> {
        FrameInput {
            population: &self.population,
            effects: self.effects,
            lights: self.lights.lights(),
        }
    }
}
