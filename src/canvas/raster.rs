//! Grid rasterizer: paints a character grid onto a [`Canvas`]

use std::fmt;

use serde::Serialize;

use super::canvas::Canvas;
use super::color::Color;
use crate::errors::{PaletteError, Result};
use crate::render::GridData;
use crate::types::{CharInfo, RenderCategory};

/// Codepoint used as the reference for missing glyphs
const NOT_A_CHARACTER: char = '\u{FFFF}';

/// Advance width tolerance when comparing against the missing-glyph advance
const ADVANCE_EPSILON: f32 = 0.1;

/// Font collaborator for the rasterizer
pub trait GlyphSource {
    /// Horizontal advance of `ch` at the source's native size
    fn advance_width(&self, ch: char) -> f32;

    /// Draw `ch` into the cell whose top-left corner is `(x, y)`
    fn draw(&self, canvas: &mut Canvas, ch: char, x: u32, y: u32, cell_size: u32);
}

/// Number of cells rendered per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderStats {
    pub printable: usize,
    pub control: usize,
    pub surrogate: usize,
    pub unassigned: usize,
    pub private: usize,
    pub no_glyph: usize,
}

impl RenderStats {
    fn slot(&mut self, category: RenderCategory) -> &mut usize {
        match category {
            RenderCategory::Printable => &mut self.printable,
            RenderCategory::Control => &mut self.control,
            RenderCategory::Surrogate => &mut self.surrogate,
            RenderCategory::Unassigned => &mut self.unassigned,
            RenderCategory::Private => &mut self.private,
            RenderCategory::NoGlyph => &mut self.no_glyph,
        }
    }

    /// Stats of a grid as classified, without font information
    pub fn from_grid(grid: &GridData) -> Self {
        let mut stats = Self::default();
        for info in grid.chars.iter().flatten() {
            stats.record(RenderCategory::from(info.category));
        }
        stats
    }

    pub fn record(&mut self, category: RenderCategory) {
        *self.slot(category) += 1;
    }

    pub fn get(&self, category: RenderCategory) -> usize {
        match category {
            RenderCategory::Printable => self.printable,
            RenderCategory::Control => self.control,
            RenderCategory::Surrogate => self.surrogate,
            RenderCategory::Unassigned => self.unassigned,
            RenderCategory::Private => self.private,
            RenderCategory::NoGlyph => self.no_glyph,
        }
    }

    pub fn total(&self) -> usize {
        RenderCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = RenderCategory::ALL
            .iter()
            .map(|c| format!("{c}={}", self.get(*c)))
            .collect();
        f.write_str(&parts.join(" "))
    }
}

/// Result of rasterizing a grid
#[derive(Debug, Clone)]
pub struct RasterOutput {
    pub canvas: Canvas,
    pub stats: RenderStats,
}

/// Paints grids cell by cell
///
/// Without a glyph source only category backgrounds are painted, which
/// gives a category map of the range.
#[derive(Default)]
pub struct GridRasterizer<'a> {
    glyphs: Option<&'a dyn GlyphSource>,
}

impl<'a> GridRasterizer<'a> {
    pub fn new() -> Self {
        Self { glyphs: None }
    }

    pub fn with_glyphs(glyphs: &'a dyn GlyphSource) -> Self {
        Self {
            glyphs: Some(glyphs),
        }
    }

    /// Final category of a cell, demoting printable characters the glyph
    /// source draws with the missing-glyph advance
    pub fn classify(&self, info: &CharInfo, missing_advance: Option<f32>) -> RenderCategory {
        let category = RenderCategory::from(info.category);
        match (category, self.glyphs, missing_advance) {
            (RenderCategory::Printable, Some(glyphs), Some(missing))
                if (glyphs.advance_width(info.ch) - missing).abs() < ADVANCE_EPSILON =>
            {
                RenderCategory::NoGlyph
            }
            _ => category,
        }
    }

    /// Rasterize the grid at its configured cell size
    pub fn rasterize(&self, grid: &GridData, show_background: bool) -> Result<RasterOutput> {
        let dims = grid.config;
        if dims.width == 0 || dims.height == 0 {
            return Err(PaletteError::ImageEncoding(format!(
                "cannot rasterize an empty {}x{} grid",
                dims.width, dims.height
            )));
        }

        let mut canvas = Canvas::with_background(dims.width, dims.height, Color::WHITE);
        let mut stats = RenderStats::default();
        let missing_advance = self.glyphs.map(|g| g.advance_width(NOT_A_CHARACTER));

        for (row, row_chars) in grid.chars.iter().enumerate() {
            let y = row as u32 * dims.cell_size;
            for (col, info) in row_chars.iter().enumerate() {
                let x = col as u32 * dims.cell_size;
                let category = self.classify(info, missing_advance);
                stats.record(category);

                if show_background && category != RenderCategory::Printable {
                    canvas.fill_rect(x, y, dims.cell_size, dims.cell_size, Color::for_category(category));
                }
                if category == RenderCategory::Printable {
                    if let Some(glyphs) = self.glyphs {
                        glyphs.draw(&mut canvas, info.ch, x, y, dims.cell_size);
                    }
                }
            }
        }

        tracing::debug!("Rasterized {}x{} grid: {}", dims.cols, dims.rows, stats);
        Ok(RasterOutput { canvas, stats })
    }
}
