//! Color types with alpha support

use crate::core::category_color;
use crate::types::RenderCategory;

/// RGBA color with f32 components (0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from 8-bit RGB values (0-255)
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0)
    }

    /// Create from hex color (e.g., 0xFF0000 for red)
    #[inline]
    pub fn from_hex(hex: u32) -> Self {
        Self::from_rgb8(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Background color for a render category
    pub fn for_category(category: RenderCategory) -> Self {
        Self::from_hex(category_color(category))
    }

    /// Convert to 8-bit RGBA
    #[inline]
    pub fn to_rgba8(&self) -> [u8; 4] {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_round_trips_to_rgba8() {
        assert_eq!(Color::from_hex(0xFF_CCCC).to_rgba8(), [0xFF, 0xCC, 0xCC, 0xFF]);
        assert_eq!(Color::from_hex(0x12_3456).to_rgba8(), [0x12, 0x34, 0x56, 0xFF]);
    }

    #[test]
    fn test_category_colors() {
        assert_eq!(Color::for_category(RenderCategory::Printable), Color::WHITE);
        assert_eq!(
            Color::for_category(RenderCategory::Private).to_rgba8(),
            [0xFF, 0xFF, 0xCC, 0xFF]
        );
    }
}
