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

//! The draw primitive the benchmark drives once per frame.
//!
//! There is a single draw entry point parameterized by the
//! [`EffectConfiguration`]; backends branch on the toggles at call time
//! instead of being split into per-effect renderer types.

use crate::effects::EffectConfiguration;
use crate::light::Light;
use crate::population::Population;
use std::fmt;

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    /// The triangles to draw. Backends must re-fetch their vertex data when
    /// [`Population::generation`] differs from the one they uploaded.
    pub population: &'a Population,
    /// Which effects to apply.
    pub effects: EffectConfiguration,
    /// Lights to shade with when `effects.lighting_enabled` is set.
    pub lights: &'a [Light],
}

/// Statistics for a single drawn frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// A sequential counter for drawn frames.
    pub frame_number: u64,
    /// Number of triangles submitted.
    pub triangles_drawn: usize,
    /// Whether the vertex data had to be rebuilt for this frame.
    pub vertex_data_uploaded: bool,
}

/// An error reported by a draw backend.
#[derive(Debug)]
pub enum RenderError {
    /// The backend cannot honor the requested effect combination, e.g.
    /// lighting with a vertex layout that carries no normals.
    UnsupportedEffects(EffectConfiguration),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnsupportedEffects(effects) => {
                write!(f, "Draw backend does not support effects '{effects}'")
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// The "draw N triangles with configuration C" primitive.
pub trait DrawBackend: fmt::Debug {
    /// A human-readable name, used in logs and reports.
    fn name(&self) -> &str;

    /// Draws every instance of the population with the given effects.
    fn draw(&mut self, frame: &FrameInput<'_>) -> Result<DrawStats, RenderError>;
}
