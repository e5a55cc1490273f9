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

use super::Instance;
use serde::{Deserialize, Serialize};

/// Half the width/height of a triangle in normalized device units.
pub const TRIANGLE_HALF_SIZE: f32 = 0.1;

/// Per-vertex texture coordinates: top, left, right.
const CORNER_UVS: [[f32; 2]; 3] = [[0.5, 1.0], [0.0, 0.0], [1.0, 0.0]];

/// Which attributes each uploaded vertex carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertexLayout {
    /// Position and color.
    Basic,
    /// Position, color, normal and texture coordinates.
    #[default]
    Extended,
}

impl VertexLayout {
    /// Number of `f32` values per vertex.
    pub const fn floats_per_vertex(self) -> usize {
        match self {
            VertexLayout::Basic => 6,
            VertexLayout::Extended => 11,
        }
    }

    /// Byte stride of a single vertex.
    pub const fn stride(self) -> usize {
        self.floats_per_vertex() * std::mem::size_of::<f32>()
    }
}

/// `@location(0) position, @location(1) color`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BasicVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Vertex color.
    pub color: [f32; 3],
}

/// `@location(0..=3) position, color, normal, uv`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ExtendedVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Vertex color.
    pub color: [f32; 3],
    /// Surface normal.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

fn corners(instance: &Instance) -> [[f32; 3]; 3] {
    let p = instance.position;
    [
        [p.x, p.y + TRIANGLE_HALF_SIZE, p.z],
        [p.x - TRIANGLE_HALF_SIZE, p.y - TRIANGLE_HALF_SIZE, p.z],
        [p.x + TRIANGLE_HALF_SIZE, p.y - TRIANGLE_HALF_SIZE, p.z],
    ]
}

impl BasicVertex {
    /// The three vertices of an instance.
    pub fn for_instance(instance: &Instance) -> [Self; 3] {
        corners(instance).map(|position| Self {
            position,
            color: instance.color,
        })
    }
}

impl ExtendedVertex {
    /// The three vertices of an instance.
    pub fn for_instance(instance: &Instance) -> [Self; 3] {
        let c = corners(instance);
        let normal = instance.normal.to_array();
        [0, 1, 2].map(|i| Self {
            position: c[i],
            color: instance.color,
            normal,
            uv: CORNER_UVS[i],
        })
    }
}
