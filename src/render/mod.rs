//! Layout generators and SVG emitters
//!
//! Pure string building over classified data; writing the result anywhere
//! is the caller's job.

pub mod chars;
mod svg;
pub mod tiles;

pub use chars::{
    generate_chars, generate_grid, generate_range_grid, generate_svg_string, grid_svg, scalar_count,
    GridData, GridDimensions,
};
pub use svg::FONT_FAMILY;
pub use tiles::{
    generate_script_tiles_svg, generate_tile_data, quartile_codepoints, sample_quartiles, TileChar,
    TileData,
};
