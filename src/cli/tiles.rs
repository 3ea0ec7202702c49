//! `tiles`: the script-tile mosaic as SVG

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::config::{resolve_tile_config, PaletteConfig};
use crate::core::BlockCatalog;
use crate::output::write_output;
use crate::render::generate_script_tiles_svg;
use crate::types::{SamplingPolicy, TileConfig, TileOptions};

#[derive(Args, Debug, Clone, Default)]
pub struct TilesArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Tiles per row [default: 8]
    #[arg(short, long)]
    pub cols: Option<u32>,

    /// Cell size in pixels [default: 32]
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Include every block, not only the Basic Multilingual Plane
    #[arg(long)]
    pub all: bool,

    /// Sample quartiles of the raw block span instead of assigned codepoints
    #[arg(long)]
    pub span_sampling: bool,
}

pub fn tile_config(args: &TilesArgs, config: &PaletteConfig) -> crate::Result<TileConfig> {
    let flags = TileOptions {
        cols: args.cols,
        cell_size: args.cell_size,
        sampling: args.span_sampling.then_some(SamplingPolicy::Span),
        ..TileOptions::default()
    };
    resolve_tile_config(&config.tiles.clone().merge(flags))
}

pub fn run(
    args: &TilesArgs,
    catalog: &BlockCatalog,
    config: &PaletteConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let tile_config = tile_config(args, config)?;
    let blocks = if args.all {
        catalog.blocks()
    } else {
        catalog.bmp_blocks()
    };

    let svg = generate_script_tiles_svg(catalog, blocks, &tile_config)?;
    write_output(&args.output, svg.as_bytes())?;

    writeln!(out, "Generated: {}", args.output.display())?;
    writeln!(out, "  Tiles: {} blocks, {} per row", blocks.len(), tile_config.cols)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_sampling_is_overridden_by_flag() {
        let config = PaletteConfig {
            tiles: TileOptions {
                cols: Some(4),
                sampling: Some(SamplingPolicy::Defined),
                ..TileOptions::default()
            },
            ..PaletteConfig::default()
        };
        let args = TilesArgs {
            span_sampling: true,
            ..TilesArgs::default()
        };
        let resolved = tile_config(&args, &config).unwrap();
        assert_eq!(resolved.cols, 4);
        assert_eq!(resolved.cell_size, 32);
        assert_eq!(resolved.sampling, SamplingPolicy::Span);
    }

    #[test]
    fn test_writes_bmp_tiles_by_default() {
        let dir = TempDir::new().unwrap();
        let args = TilesArgs {
            output: dir.path().join("tiles.svg"),
            ..TilesArgs::default()
        };
        let mut out = Vec::new();
        run(&args, BlockCatalog::embedded().unwrap(), &PaletteConfig::default(), &mut out).unwrap();

        let svg = std::fs::read_to_string(&args.output).unwrap();
        assert_eq!(svg.matches("class=\"label\"").count(), 164);
        assert!(String::from_utf8(out).unwrap().contains("164 blocks"));
    }
}
