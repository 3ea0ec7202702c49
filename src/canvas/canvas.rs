//! RGBA pixel canvas with PNG encoding

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::color::Color;
use crate::errors::{PaletteError, Result};

/// Framebuffer canvas
///
/// Pixels are RGBA, row-major. Writes outside the canvas are ignored.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel data (row-major, RGBA)
    pixels: Vec<Color>,
}

impl Canvas {
    /// Create a transparent canvas with given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Color::TRANSPARENT)
    }

    /// Create canvas with background color
    pub fn with_background(width: u32, height: u32, bg: Color) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![bg; size],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Get pixel at coordinates
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Set pixel at coordinates
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Fill an axis-aligned rectangle, clipped to the canvas
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for py in y.min(y_end)..y_end {
            let row = py as usize * self.width as usize;
            for px in x.min(x_end)..x_end {
                self.pixels[row + px as usize] = color;
            }
        }
    }

    /// Get raw pixel data
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixel data as packed 8-bit RGBA
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(Color::to_rgba8).collect()
    }

    /// Encode the canvas as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(&self.to_rgba8(), self.width, self.height, ExtendedColorType::Rgba8)
            .map_err(|e| PaletteError::ImageEncoding(e.to_string()))?;
        tracing::debug!(
            "Encoded {}x{} canvas as PNG ({} bytes)",
            self.width,
            self.height,
            png.len()
        );
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_clips() {
        let mut canvas = Canvas::with_background(4, 4, Color::WHITE);
        canvas.fill_rect(2, 2, 10, 10, Color::BLACK);
        assert_eq!(canvas.get_pixel(1, 1), Some(Color::WHITE));
        assert_eq!(canvas.get_pixel(3, 3), Some(Color::BLACK));
        assert_eq!(canvas.get_pixel(4, 4), None);
    }

    #[test]
    fn test_out_of_bounds_writes_are_ignored() {
        let mut canvas = Canvas::new(2, 2);
        canvas.set_pixel(5, 0, Color::BLACK);
        canvas.fill_rect(7, 7, 3, 3, Color::BLACK);
        assert!(canvas.pixels().iter().all(|p| *p == Color::TRANSPARENT));
    }

    #[test]
    fn test_png_signature() {
        let canvas = Canvas::with_background(3, 2, Color::WHITE);
        assert_eq!(canvas.to_rgba8().len(), 3 * 2 * 4);
        let png = canvas.encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
