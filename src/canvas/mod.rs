//! Raster output for character grids
//!
//! ```text
//!    GridData ──► GridRasterizer ──► Canvas ──► PNG
//!                      │
//!                 GlyphSource (optional font)
//! ```

mod canvas;
mod color;
mod raster;

pub use canvas::Canvas;
pub use color::Color;
pub use raster::{GlyphSource, GridRasterizer, RasterOutput, RenderStats};
