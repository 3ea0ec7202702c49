//! Sequential character grids and their SVG rendering

use serde::Serialize;

use super::svg;
use crate::config::validate_grid_config;
use crate::core::category::push_escaped;
use crate::core::{category_color_css, char_category, skip_surrogate, BlockCatalog};
use crate::errors::{PaletteError, Result};
use crate::types::{CharInfo, GridConfig, RenderCategory, MAX_CODEPOINT, SURROGATE_END, SURROGATE_START};

/// Resolved geometry of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDimensions {
    pub cols: u32,
    pub rows: u32,
    pub cell_size: u32,
    pub width: u32,
    pub height: u32,
}

impl From<&GridConfig> for GridDimensions {
    fn from(config: &GridConfig) -> Self {
        Self {
            cols: config.cols,
            rows: config.rows,
            cell_size: config.cell_size,
            width: config.width(),
            height: config.height(),
        }
    }
}

/// Characters arranged as `[rows][cols]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridData {
    pub chars: Vec<Vec<CharInfo>>,
    pub config: GridDimensions,
}

/// Last codepoint a sequence of `total` cells from `start` reaches,
/// accounting for the single jump over the surrogate block
fn last_codepoint(start: u32, total: usize) -> u64 {
    let first = u64::from(skip_surrogate(start));
    let mut last = first + total as u64 - 1;
    if first < u64::from(SURROGATE_START) && last >= u64::from(SURROGATE_START) {
        last += u64::from(SURROGATE_END - SURROGATE_START + 1);
    }
    last
}

/// Number of scalar values in `[start, end]`, the cells sequential
/// generation visits for that range
pub fn scalar_count(start: u32, end: u32) -> u32 {
    if start > end {
        return 0;
    }
    let surrogate_start = start.max(SURROGATE_START);
    let surrogate_end = end.min(SURROGATE_END);
    let surrogates = if surrogate_start <= surrogate_end {
        surrogate_end - surrogate_start + 1
    } else {
        0
    };
    (end - start).saturating_add(1) - surrogates
}

/// Classify `count` consecutive scalar values from `start`; the caller has
/// checked that the sequence stays below U+10FFFF
fn classify_sequence(catalog: &BlockCatalog, start: u32, count: usize) -> Result<Vec<CharInfo>> {
    let mut chars = Vec::with_capacity(count);
    let mut codepoint = start;
    for _ in 0..count {
        codepoint = skip_surrogate(codepoint);
        let ch = char::from_u32(codepoint).ok_or(PaletteError::CodepointOverflow { codepoint })?;
        chars.push(CharInfo {
            codepoint,
            ch,
            category: char_category(catalog, ch),
        });
        codepoint += 1;
    }

    if let Some(last) = chars.last() {
        tracing::debug!(
            "Generated {} chars from U+{:04X} to U+{:04X}",
            chars.len(),
            start,
            last.codepoint
        );
    }
    Ok(chars)
}

fn rows_of(chars: &[CharInfo], config: &GridConfig) -> GridData {
    GridData {
        chars: chars
            .chunks(config.cols as usize)
            .map(<[CharInfo]>::to_vec)
            .collect(),
        config: GridDimensions::from(config),
    }
}

/// Classify `cols * rows` consecutive codepoints starting at the configured
/// codepoint, skipping the surrogate block
pub fn generate_chars(catalog: &BlockCatalog, config: &GridConfig) -> Result<Vec<CharInfo>> {
    validate_grid_config(config)?;

    let total = config.total();
    if last_codepoint(config.start_codepoint, total) > u64::from(MAX_CODEPOINT) {
        return Err(PaletteError::CodepointOverflow {
            codepoint: MAX_CODEPOINT + 1,
        });
    }
    classify_sequence(catalog, config.start_codepoint, total)
}

/// Generate characters and arrange them row-major into the grid
pub fn generate_grid(catalog: &BlockCatalog, config: &GridConfig) -> Result<GridData> {
    let chars = generate_chars(catalog, config)?;
    Ok(rows_of(&chars, config))
}

/// Like [`generate_grid`], but stops after `end`
///
/// Cells past `end` are left out rather than generated, so the last row may
/// be short. A range ending at U+10FFFF therefore never overflows, whatever
/// the column count.
pub fn generate_range_grid(
    catalog: &BlockCatalog,
    config: &GridConfig,
    end: u32,
) -> Result<GridData> {
    validate_grid_config(config)?;
    if end > MAX_CODEPOINT {
        return Err(PaletteError::InvalidCodepoint(end));
    }
    let count = config
        .total()
        .min(scalar_count(config.start_codepoint, end) as usize);
    let chars = classify_sequence(catalog, config.start_codepoint, count)?;
    Ok(rows_of(&chars, config))
}

/// Render the grid as SVG, one `<text>` element per row
///
/// Non-printable cells become spaces so columns stay aligned. With
/// `show_background` each non-printable cell also gets a category-coloured
/// rectangle.
pub fn generate_svg_string(catalog: &BlockCatalog, config: &GridConfig) -> Result<String> {
    let grid = generate_grid(catalog, config)?;
    Ok(grid_svg(&grid, config))
}

/// Render already generated grid data as SVG
///
/// Rows may be shorter than `cols`; the document keeps the configured size.
pub fn grid_svg(grid: &GridData, config: &GridConfig) -> String {
    let cell = f64::from(config.cell_size);

    let mut body = Vec::new();

    if config.show_background {
        for (row, row_chars) in grid.chars.iter().enumerate() {
            for (col, info) in row_chars.iter().enumerate() {
                if info.category.is_printable() {
                    continue;
                }
                body.push(format!(
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
                    col as u32 * config.cell_size,
                    row as u32 * config.cell_size,
                    config.cell_size,
                    config.cell_size,
                    category_color_css(RenderCategory::from(info.category))
                ));
            }
        }
    }

    for (row, row_chars) in grid.chars.iter().enumerate() {
        if !row_chars.iter().any(|info| info.category.is_printable()) {
            continue;
        }

        let x_positions = (0..row_chars.len())
            .map(|col| (col as f64 * cell + cell / 2.0).to_string())
            .collect::<Vec<_>>()
            .join(" ");

        let mut line = String::with_capacity(row_chars.len());
        for info in row_chars {
            if info.category.is_printable() {
                push_escaped(&mut line, info.ch);
            } else {
                line.push(' ');
            }
        }

        let y = row as f64 * cell + cell * 0.8;
        body.push(format!("<text x=\"{x_positions}\" y=\"{y}\">{line}</text>"));
    }

    let styles = format!(
        "    text {{\n      font-family: '{}', monospace;\n      font-size: {}px;\n      text-anchor: middle;\n    }}\n",
        svg::FONT_FAMILY,
        config.cell_size * 3 / 4
    );

    svg::document(
        grid.config.width,
        grid.config.height,
        &config.font_path,
        &styles,
        &body,
    )
}
