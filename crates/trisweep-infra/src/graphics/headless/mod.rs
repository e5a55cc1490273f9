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

//! A draw backend that runs the per-vertex work on the CPU without a window.
//!
//! It mirrors what a GPU backend does each frame: keep an uploaded copy of the
//! population's vertex data (refreshed whenever the population generation
//! changes), transform every vertex by its instance matrix and apply the
//! enabled effects.

pub mod shading;

use trisweep_core::math::{transform_point, Mat4};
use trisweep_core::population::{BasicVertex, ExtendedVertex};
use trisweep_core::texture::ProceduralTexture;
use trisweep_core::{
    DrawBackend, DrawStats, FrameInput, Instance, RenderError, Vec3, VertexLayout,
};

/// CPU draw backend.
#[derive(Debug)]
pub struct HeadlessRenderer {
    layout: VertexLayout,
    texture: ProceduralTexture,
    vertices: Vec<f32>,
    uploaded_generation: Option<u64>,
    frame_number: u64,
    last_frame_energy: f64,
    last_frame_centroid: Vec3,
}

impl HeadlessRenderer {
    /// Creates a backend with the given vertex layout and the default texture.
    pub fn new(layout: VertexLayout) -> Self {
        Self {
            layout,
            texture: ProceduralTexture::default(),
            vertices: Vec::new(),
            uploaded_generation: None,
            frame_number: 0,
            last_frame_energy: 0.0,
            last_frame_centroid: Vec3::ZERO,
        }
    }

    /// The vertex layout used for uploads.
    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    /// Population generation of the currently uploaded vertex data.
    pub fn uploaded_generation(&self) -> Option<u64> {
        self.uploaded_generation
    }

    /// Sum of all shaded color channels of the last frame.
    pub fn last_frame_energy(&self) -> f64 {
        self.last_frame_energy
    }

    /// Mean world-space vertex position of the last frame.
    pub fn last_frame_centroid(&self) -> Vec3 {
        self.last_frame_centroid
    }

    fn supports(&self, frame: &FrameInput<'_>) -> bool {
        match self.layout {
            VertexLayout::Extended => true,
            // No normals or texture coordinates to work with.
            VertexLayout::Basic => {
                !frame.effects.lighting_enabled && !frame.effects.texturing_enabled
            }
        }
    }

    fn shade_vertex(
        &self,
        frame: &FrameInput<'_>,
        color: Vec3,
        position: Vec3,
        normal: Vec3,
        uv: [f32; 2],
    ) -> Vec3 {
        let mut color = color;
        if frame.effects.lighting_enabled {
            color = shading::shade(color, normal, position, frame.lights);
        }
        if frame.effects.texturing_enabled {
            color = color.mul_elem(Vec3::from(self.texture.sample(uv[0], uv[1])));
        }
        color
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new(VertexLayout::default())
    }
}

impl DrawBackend for HeadlessRenderer {
    fn name(&self) -> &str {
        "headless"
    }

    fn draw(&mut self, frame: &FrameInput<'_>) -> Result<DrawStats, RenderError> {
        if !self.supports(frame) {
            return Err(RenderError::UnsupportedEffects(frame.effects));
        }

        let population = frame.population;
        let generation = population.generation();
        let vertex_data_uploaded = self.uploaded_generation != Some(generation);
        if vertex_data_uploaded {
            self.vertices = population.vertex_data(self.layout);
            self.uploaded_generation = Some(generation);
            log::trace!(
                "Uploaded {} vertices for generation {}",
                population.count() * 3,
                generation
            );
        }

        let mut energy = 0.0f64;
        let mut position_sum = Vec3::ZERO;
        let mut vertex_count = 0usize;
        let mut accumulate = |color: Vec3, world: Vec3| {
            energy += f64::from(color.x + color.y + color.z);
            position_sum = position_sum + world;
            vertex_count += 1;
        };

        match self.layout {
            VertexLayout::Basic => {
                let vertices: &[BasicVertex] = bytemuck::cast_slice(&self.vertices);
                let triangles = vertices.chunks_exact(3);
                for (instance, triangle) in population.instances().iter().zip(triangles) {
                    let model = instance.model_matrix();
                    for vertex in triangle {
                        let world = to_world(&model, instance, vertex.position);
                        accumulate(Vec3::from(vertex.color), world);
                    }
                }
            }
            VertexLayout::Extended => {
                let vertices: &[ExtendedVertex] = bytemuck::cast_slice(&self.vertices);
                let triangles = vertices.chunks_exact(3);
                for (instance, triangle) in population.instances().iter().zip(triangles) {
                    let model = instance.model_matrix();
                    let origin = transform_point(&model, Vec3::ZERO);
                    for vertex in triangle {
                        let world = to_world(&model, instance, vertex.position);
                        let normal = transform_point(&model, Vec3::from(vertex.normal)) - origin;
                        let color = self.shade_vertex(
                            frame,
                            Vec3::from(vertex.color),
                            world,
                            normal,
                            vertex.uv,
                        );
                        accumulate(color, world);
                    }
                }
            }
        }

        self.frame_number += 1;
        self.last_frame_energy = energy;
        self.last_frame_centroid = if vertex_count > 0 {
            position_sum * (1.0 / vertex_count as f32)
        } else {
            Vec3::ZERO
        };

        Ok(DrawStats {
            frame_number: self.frame_number,
            triangles_drawn: population.count(),
            vertex_data_uploaded,
        })
    }
}

/// Vertex data is stored around the instance position; the model matrix
/// expects object-space coordinates around the origin.
fn to_world(model: &Mat4, instance: &Instance, position: [f32; 3]) -> Vec3 {
    transform_point(model, Vec3::from(position) - instance.position)
}
