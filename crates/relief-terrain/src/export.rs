use std::path::Path;

use image::RgbImage;

use crate::{Terrain, TerrainError};

/// RGB8 preview of a terrain, one pixel per cell, row-major.
#[derive(Clone, Debug)]
pub struct TerrainImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

#[inline]
fn to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl TerrainImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let idx = (y * self.width + x) * 3;
        self.data[idx..idx + 3].copy_from_slice(&rgb);
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let idx = (y * self.width + x) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Biome colors as generated.
    pub fn from_colors(terrain: &Terrain) -> Self {
        let mut img = Self::new(terrain.width(), terrain.height());
        for y in 0..terrain.height() {
            for x in 0..terrain.width() {
                img.put_pixel(x, y, terrain.colors.get(x, y).map(to_u8));
            }
        }
        img
    }

    /// Grayscale elevation, stretched to the grid's own min/max.
    pub fn heightmap(terrain: &Terrain) -> Self {
        let (lo, hi) = terrain.elevation_range();
        let span = (hi - lo).max(1e-6);
        let mut img = Self::new(terrain.width(), terrain.height());
        for y in 0..terrain.height() {
            for x in 0..terrain.width() {
                let g = to_u8((*terrain.elevation.get(x, y) - lo) / span);
                img.put_pixel(x, y, [g, g, g]);
            }
        }
        img
    }

    pub fn save_png(&self, path: &Path) -> Result<(), TerrainError> {
        let img = RgbImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
            .ok_or_else(|| {
                TerrainError::InvalidDimensions {
                    width: self.width,
                    height: self.height,
                }
            })?;
        img.save(path)?;
        log::info!(target: "terrain", "wrote {}x{} preview to {}", self.width, self.height, path.display());
        Ok(())
    }
}
