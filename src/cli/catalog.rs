//! `catalog`: export the block catalog as JSON or CSV

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::core::BlockCatalog;
use crate::output::write_output;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CatalogFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Export format
    #[arg(long, value_enum, default_value_t = CatalogFormat::Json)]
    pub format: CatalogFormat,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn export(catalog: &BlockCatalog, format: CatalogFormat) -> crate::Result<String> {
    let data = catalog.to_data();
    match format {
        CatalogFormat::Json => data.to_json_pretty(),
        CatalogFormat::Csv => Ok(data.to_csv()),
    }
}

pub fn run(args: &CatalogArgs, catalog: &BlockCatalog, out: &mut impl Write) -> anyhow::Result<()> {
    let text = export(catalog, args.format)?;
    match &args.output {
        Some(path) => {
            write_output(path, text.as_bytes())?;
            writeln!(out, "Generated: {}", path.display())?;
        }
        None => {
            out.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                writeln!(out)?;
            }
        }
    }
    Ok(())
}
