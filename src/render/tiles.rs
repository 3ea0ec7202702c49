//! Script tiles: four sample characters per block, laid out as a mosaic

use serde::Serialize;

use super::svg;
use crate::config::validate_tile_config;
use crate::core::category::push_escaped;
use crate::core::{
    escape_markup, get_category, get_quartile_chars, BlockCatalog, UnicodeBlock, UnicodeBlockData,
};
use crate::errors::{PaletteError, Result};
use crate::types::{SamplingPolicy, TileConfig};

/// Gap between tiles, in pixels
pub const TILE_PADDING: u32 = 4;

/// Height reserved for the block label under each tile
pub const LABEL_HEIGHT: u32 = 12;

/// One sampled character of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileChar {
    pub codepoint: u32,
    /// `None` for surrogates, which have no scalar value
    #[serde(rename = "char")]
    pub ch: Option<char>,
    pub printable: bool,
}

/// A block and its four quartile samples
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileData {
    pub block: UnicodeBlock,
    pub chars: [TileChar; 4],
}

/// Quartile samples from a block's assigned codepoints
///
/// With `n` assigned codepoints and `q = n / 4`, picks indices
/// `0, q, 2q, 3q` (clamped to `n - 1`). A block with nothing assigned
/// yields its start four times.
pub fn sample_quartiles(data: &UnicodeBlockData) -> [u32; 4] {
    let n: u32 = data.ranges.iter().map(|r| r.len()).sum();
    if n == 0 {
        return [data.block_start; 4];
    }
    let q = n / 4;
    [0, 1, 2, 3].map(|k| {
        data.nth_defined((q * k).min(n - 1))
            .unwrap_or(data.block_start)
    })
}

/// Quartile codepoints for `block` under `policy`
///
/// Defined sampling needs the block's range data; blocks the catalog does
/// not know (or knows with different bounds) use span quartiles instead.
pub fn quartile_codepoints(
    catalog: &BlockCatalog,
    block: &UnicodeBlock,
    policy: SamplingPolicy,
) -> [u32; 4] {
    if policy == SamplingPolicy::Span {
        return get_quartile_chars(block);
    }
    match catalog.get_block_data_by_name(&block.name) {
        Some(data) if data.block_start == block.start && data.block_end == block.end => {
            sample_quartiles(data)
        }
        _ => {
            tracing::warn!(
                "No range data for block {}, falling back to span quartiles",
                block.name
            );
            get_quartile_chars(block)
        }
    }
}

/// Sample and classify four characters for every block
pub fn generate_tile_data(
    catalog: &BlockCatalog,
    blocks: &[UnicodeBlock],
    policy: SamplingPolicy,
) -> Result<Vec<TileData>> {
    blocks
        .iter()
        .map(|block| {
            let codepoints = quartile_codepoints(catalog, block, policy);
            let mut chars = [TileChar {
                codepoint: 0,
                ch: None,
                printable: false,
            }; 4];
            for (slot, codepoint) in chars.iter_mut().zip(codepoints) {
                *slot = TileChar {
                    codepoint,
                    ch: char::from_u32(codepoint),
                    printable: get_category(catalog, codepoint)?.is_printable(),
                };
            }
            Ok(TileData {
                block: block.clone(),
                chars,
            })
        })
        .collect()
}

/// Render one tile per block as an SVG mosaic
///
/// Tiles flow left to right, `cols` per row. Each tile shows its four
/// samples side by side (hex codepoints for non-printable ones) with the
/// block's display name centred underneath.
pub fn generate_script_tiles_svg(
    catalog: &BlockCatalog,
    blocks: &[UnicodeBlock],
    config: &TileConfig,
) -> Result<String> {
    validate_tile_config(config)?;
    let tiles = generate_tile_data(catalog, blocks, config.sampling)?;

    let cell_size = config.cell_size;
    let cell = f64::from(cell_size);
    let tile_width = cell_size * 4;
    let tile_height = cell_size;
    let total_tile_height = tile_height + LABEL_HEIGHT + TILE_PADDING;

    let rows = (tiles.len() as u32).div_ceil(config.cols);
    let width = config.cols * (tile_width + TILE_PADDING);
    let height = rows
        .checked_mul(total_tile_height)
        .ok_or_else(|| PaletteError::param("cellSize", "mosaic height overflows"))?;

    let mut body = Vec::with_capacity(tiles.len() * 6);
    for (index, tile) in tiles.iter().enumerate() {
        let col = index as u32 % config.cols;
        let row = index as u32 / config.cols;
        let x = col * (tile_width + TILE_PADDING);
        let y = row * total_tile_height;

        body.push(format!(
            "<rect x=\"{x}\" y=\"{y}\" width=\"{tile_width}\" height=\"{tile_height}\" fill=\"#f0f0f0\" stroke=\"#ccc\" stroke-width=\"0.5\"/>"
        ));

        for (i, sample) in tile.chars.iter().enumerate() {
            let cx = f64::from(x) + i as f64 * cell + cell / 2.0;
            let cy = f64::from(y) + cell * 0.75;
            match sample.ch {
                Some(ch) if sample.printable => {
                    let mut glyph = String::new();
                    push_escaped(&mut glyph, ch);
                    body.push(format!("<text x=\"{cx}\" y=\"{cy}\" class=\"char\">{glyph}</text>"));
                }
                _ => {
                    body.push(format!(
                        "<text x=\"{cx}\" y=\"{cy}\" class=\"hex\">{:04X}</text>",
                        sample.codepoint
                    ));
                }
            }
        }

        let label_y = y + tile_height + LABEL_HEIGHT - 2;
        body.push(format!(
            "<text x=\"{}\" y=\"{label_y}\" class=\"label\">{}</text>",
            x + tile_width / 2,
            escape_markup(&tile.block.display_name)
        ));
    }

    tracing::debug!("Laid out {} tiles in {} rows", tiles.len(), rows);

    let styles = format!(
        "    .char {{
      font-family: '{family}', monospace;
      font-size: {char_size}px;
      text-anchor: middle;
    }}
    .hex {{
      font-family: monospace;
      font-size: {hex_size}px;
      text-anchor: middle;
      fill: #999;
    }}
    .label {{
      font-family: sans-serif;
      font-size: 8px;
      text-anchor: middle;
      fill: #666;
    }}
",
        family = svg::FONT_FAMILY,
        char_size = cell_size * 7 / 10,
        hex_size = cell_size / 4,
    );

    Ok(svg::document(width, height, &config.font_path, &styles, &body))
}
