//! Command-line interface for unicode-palette
//!
//! Each subcommand writes its report to the writer it is given, so the
//! binary passes stdout and tests pass a buffer.

pub mod args;
pub mod catalog;
pub mod print;
pub mod random;
pub mod tiles;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::load_config;
use crate::core::BlockCatalog;

/// unicode-palette - Unicode character grids and script tiles
#[derive(Parser, Debug)]
#[command(name = "unicode-palette")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log progress at info level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log at debug level
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config file (TOML, or JSON for any other extension)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print Unicode characters to the console or to a file
    Print(print::PrintArgs),

    /// Print random assigned Unicode characters
    Random(random::RandomArgs),

    /// Generate Unicode script tiles as SVG
    Tiles(tiles::TilesArgs),

    /// Export the block catalog
    Catalog(catalog::CatalogArgs),
}

impl Cli {
    /// Maximum log level implied by the flags
    pub fn log_level(&self) -> tracing::Level {
        if self.debug {
            tracing::Level::DEBUG
        } else if self.verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}

/// Load configuration and the catalog, then dispatch the subcommand
pub fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let blocks = BlockCatalog::embedded().context("Failed to load the block catalog")?;

    match &cli.command {
        Command::Print(args) => print::run(args, blocks, &config, out),
        Command::Random(args) => random::run(args, blocks, out),
        Command::Tiles(args) => tiles::run(args, blocks, &config, out),
        Command::Catalog(args) => catalog::run(args, blocks, out),
    }
}
