//! `print`: a codepoint range on the console or as SVG / PNG

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;

use super::args::resolve_range;
use crate::canvas::{GridRasterizer, RenderStats};
use crate::config::{resolve_config, PaletteConfig};
use crate::core::{BlockCatalog, CodepointRange};
use crate::errors::PaletteError;
use crate::output::write_output;
use crate::render::{generate_range_grid, grid_svg, scalar_count};
use crate::types::{CharInfo, GridConfig, GridOptions};

/// Range printed when none is given
pub const DEFAULT_RANGE: &str = "0000-00FF";

#[derive(Args, Debug, Clone, Default)]
pub struct PrintArgs {
    /// Range (HEX-HEX, e.g. 0000-00FF) or block name
    pub range: Option<String>,

    /// Output file (.png rasterises, anything else writes SVG)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of columns [default: 16]
    #[arg(short, long)]
    pub cols: Option<u32>,

    /// Cell size in pixels for file output [default: 16]
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Show category colours as cell backgrounds
    #[arg(short, long)]
    pub background: bool,

    /// List available block names
    #[arg(short, long)]
    pub list: bool,
}

/// Grid configuration covering `range`, layered as print defaults, then the
/// config file, then flags
pub fn grid_config(
    args: &PrintArgs,
    config: &PaletteConfig,
    range: CodepointRange,
) -> crate::Result<GridConfig> {
    let defaults = GridOptions {
        cols: Some(16),
        cell_size: Some(16),
        ..GridOptions::default()
    };
    let flags = GridOptions {
        cols: args.cols,
        cell_size: args.cell_size,
        show_background: args.background.then_some(true),
        ..GridOptions::default()
    };
    let mut options = defaults.merge(config.grid.clone()).merge(flags);

    let cols = options
        .cols
        .filter(|c| *c > 0)
        .ok_or_else(|| PaletteError::param("cols", "must be greater than 0"))?;
    options.start_codepoint = Some(range.start);
    options.rows = Some(scalar_count(range.start, range.end).div_ceil(cols).max(1));
    resolve_config(&options)
}

/// Console rendering: `cols` characters per line, non-printable as spaces,
/// stopping after `end`
pub fn console_lines(chars: &[CharInfo], end: u32, cols: usize) -> Vec<String> {
    let visible: Vec<char> = chars
        .iter()
        .take_while(|info| info.codepoint <= end)
        .map(|info| if info.category.is_printable() { info.ch } else { ' ' })
        .collect();
    visible
        .chunks(cols.max(1))
        .map(|line| line.iter().collect())
        .collect()
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

pub fn run(
    args: &PrintArgs,
    catalog: &BlockCatalog,
    config: &PaletteConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if args.list {
        writeln!(out, "Available blocks:")?;
        for block in catalog.blocks() {
            writeln!(out, "  {} (U+{:04X}-U+{:04X})", block.name, block.start, block.end)?;
        }
        return Ok(());
    }

    let range = resolve_range(catalog, args.range.as_deref().unwrap_or(DEFAULT_RANGE))?;
    let grid_config = grid_config(args, config, range)?;
    let grid = generate_range_grid(catalog, &grid_config, range.end)?;

    let Some(path) = &args.output else {
        let chars: Vec<CharInfo> = grid.chars.into_iter().flatten().collect();
        for line in console_lines(&chars, range.end, grid_config.cols as usize) {
            writeln!(out, "{line}")?;
        }
        return Ok(());
    };

    let stats = if is_png(path) {
        let raster = GridRasterizer::new().rasterize(&grid, true)?;
        write_output(path, &raster.canvas.encode_png()?)?;
        raster.stats
    } else {
        let svg = grid_svg(&grid, &grid_config);
        write_output(path, svg.as_bytes())?;
        RenderStats::from_grid(&grid)
    };

    writeln!(out, "Generated: {}", path.display())?;
    writeln!(
        out,
        "  Size: {}x{} ({}x{} cells)",
        grid_config.width(),
        grid_config.height(),
        grid_config.cols,
        grid_config.rows
    )?;
    writeln!(out, "  Range: U+{:04X}-U+{:04X}", range.start, range.end)?;
    writeln!(out, "  Stats: {stats}")?;
    Ok(())
}
