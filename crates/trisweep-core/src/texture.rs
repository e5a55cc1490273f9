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

//! Procedural RGB8 texture used when texturing is enabled.

use crate::math::PI;

/// Number of checker cells along each axis.
const CHECKER_CELLS: usize = 8;

/// A tightly packed RGB8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProceduralTexture {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl ProceduralTexture {
    /// Default edge length of the generated texture.
    pub const DEFAULT_SIZE: usize = 256;

    /// Generates a colored checkerboard.
    ///
    /// Even cells hold a sinusoidal gradient over `(u, v)`, odd cells are black.
    pub fn checkerboard(width: usize, height: usize) -> Self {
        let mut data = vec![0u8; width * height * 3];
        for y in 0..height {
            for x in 0..width {
                let u = x as f32 / width as f32;
                let v = y as f32 / height as f32;
                let cx = (u * CHECKER_CELLS as f32) as usize % 2;
                let cy = (v * CHECKER_CELLS as f32) as usize % 2;
                if (cx + cy) % 2 != 0 {
                    continue;
                }
                let index = (y * width + x) * 3;
                data[index] = channel(0.5 + 0.5 * (u * PI).sin());
                data[index + 1] = channel(0.5 + 0.5 * (v * PI).sin());
                data[index + 2] = channel(0.5 + 0.5 * ((u + v) * PI).sin());
            }
        }
        log::debug!("Procedural texture generated: {}x{}", width, height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in texels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGB8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Nearest-neighbour sample with repeat wrapping. Returns linear `[0, 1]` RGB.
    pub fn sample(&self, u: f32, v: f32) -> [f32; 3] {
        if self.width == 0 || self.height == 0 {
            return [1.0; 3];
        }
        let x = (u.rem_euclid(1.0) * self.width as f32) as usize % self.width;
        let y = (v.rem_euclid(1.0) * self.height as f32) as usize % self.height;
        let index = (y * self.width + x) * 3;
        [
            self.data[index] as f32 / 255.0,
            self.data[index + 1] as f32 / 255.0,
            self.data[index + 2] as f32 / 255.0,
        ]
    }
}

impl Default for ProceduralTexture {
    fn default() -> Self {
        Self::checkerboard(Self::DEFAULT_SIZE, Self::DEFAULT_SIZE)
    }
}

#[inline]
fn channel(value: f32) -> u8 {
    (255.0 * value.clamp(0.0, 1.0)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_alternates_black_cells() {
        let texture = ProceduralTexture::checkerboard(64, 64);
        assert_eq!(texture.data().len(), 64 * 64 * 3);

        // Cell (0, 0) is colored, cell (1, 0) is black.
        assert_ne!(texture.sample(0.01, 0.01), [0.0; 3]);
        assert_eq!(texture.sample(1.5 / 8.0, 0.01), [0.0; 3]);
    }

    #[test]
    fn sampling_wraps() {
        let texture = ProceduralTexture::checkerboard(32, 32);
        assert_eq!(texture.sample(0.25, 0.25), texture.sample(1.25, -0.75));
    }
}
