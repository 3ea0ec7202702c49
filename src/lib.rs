//! # Unicode Palette
//!
//! Classifies Unicode codepoints against an embedded block catalog and lays
//! them out as sequential character grids or per-block "script tiles",
//! rendered as SVG (or PNG through the raster renderer).

pub mod canvas;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod output;
pub mod render;
pub mod types;

pub use crate::core::{get_category, BlockCatalog, UnicodeBlock};
pub use errors::{PaletteError, Result};
pub use render::{generate_chars, generate_grid, generate_script_tiles_svg, generate_svg_string};
pub use types::{CharCategory, CharInfo, GridConfig, GridOptions, RenderCategory, TileConfig};
