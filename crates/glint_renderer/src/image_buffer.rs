//! Render output storage and PNG export.

use std::path::Path;

use crate::{Color, RenderResult};
use glint_math::Interval;

/// Convert a color to 8-bit RGB, clamping each channel to [0, 1].
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let unit = Interval::new(0.0, 1.0);
    [
        (255.0 * unit.clamp(color.x)) as u8,
        (255.0 * unit.clamp(color.y)) as u8,
        (255.0 * unit.clamp(color.z)) as u8,
    ]
}

/// Simple image buffer for storing render output.
///
/// Pixels are stored row-major with row 0 at the top of the image.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to an 8-bit RGB image.
    pub fn to_rgb8(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(color_to_rgb8(self.get(x, y)))
        })
    }

    /// Save as PNG (the format is chosen from the extension by `image`).
    pub fn save_png(&self, path: &Path) -> RenderResult<()> {
        self.to_rgb8().save(path)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}
