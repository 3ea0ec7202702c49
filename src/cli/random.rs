//! `random`: a grid of randomly chosen assigned characters

use std::io::Write;

use clap::Args;
use rand::seq::SliceRandom;
use rand::Rng;

use super::args::{parse_size, resolve_range};
use crate::core::BlockCatalog;

/// Range sampled when none is given (the BMP)
pub const DEFAULT_RANGE: &str = "0000-FFFF";

#[derive(Args, Debug, Clone)]
pub struct RandomArgs {
    /// Range (HEX-HEX) or block name [default: 0000-FFFF]
    pub range: Option<String>,

    /// Grid size as COLSxROWS
    #[arg(short, long, default_value = "16x10")]
    pub size: String,
}

/// `cols * rows` characters drawn without replacement from the assigned
/// codepoints of `[start, end]`, padded with spaces when the range is small
///
/// Surrogates are assigned but have no scalar value, so they are never drawn.
pub fn random_lines<R: Rng + ?Sized>(
    catalog: &BlockCatalog,
    start: u32,
    end: u32,
    cols: u32,
    rows: u32,
    rng: &mut R,
) -> Vec<String> {
    let mut pool: Vec<char> = catalog
        .defined_codepoints(start, end)
        .into_iter()
        .filter_map(char::from_u32)
        .collect();
    pool.shuffle(rng);

    let total = cols as usize * rows as usize;
    tracing::debug!("Sampling {} of {} assigned characters", total.min(pool.len()), pool.len());
    pool.truncate(total);
    pool.resize(total, ' ');

    pool.chunks(cols.max(1) as usize)
        .map(|line| line.iter().collect())
        .collect()
}

pub fn run(args: &RandomArgs, catalog: &BlockCatalog, out: &mut impl Write) -> anyhow::Result<()> {
    let (cols, rows) = parse_size(&args.size)?;
    let range = resolve_range(catalog, args.range.as_deref().unwrap_or(DEFAULT_RANGE))?;

    let mut rng = rand::rng();
    for line in random_lines(catalog, range.start, range.end, cols, rows, &mut rng) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
