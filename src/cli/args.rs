//! Parsing of range and size arguments

use crate::core::{BlockCatalog, CodepointRange};
use crate::errors::{PaletteError, Result};
use crate::types::MAX_CODEPOINT;

/// Most cells a `COLSxROWS` size may ask for: one per codepoint
pub const MAX_GRID_CELLS: u64 = MAX_CODEPOINT as u64 + 1;

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parse `HEX-HEX` (e.g. `0000-00FF`)
///
/// Returns `Ok(None)` when `s` does not have that shape at all, so the
/// caller can try it as a block name instead.
pub fn parse_range(s: &str) -> Result<Option<CodepointRange>> {
    let Some((start, end)) = s.split_once('-') else {
        return Ok(None);
    };
    if !is_hex(start) || !is_hex(end) {
        return Ok(None);
    }

    let parse = |part: &str| {
        u32::from_str_radix(part, 16)
            .ok()
            .filter(|cp| *cp <= MAX_CODEPOINT)
            .ok_or_else(|| PaletteError::param("range", format!("{part} exceeds U+10FFFF")))
    };
    let range = CodepointRange {
        start: parse(start)?,
        end: parse(end)?,
    };
    if range.start > range.end {
        return Err(PaletteError::param(
            "range",
            format!("start U+{:04X} is after end U+{:04X}", range.start, range.end),
        ));
    }
    Ok(Some(range))
}

/// Resolve a `HEX-HEX` range or a block name / display name
pub fn resolve_range(catalog: &BlockCatalog, s: &str) -> Result<CodepointRange> {
    if let Some(range) = parse_range(s)? {
        return Ok(range);
    }
    catalog
        .find_block(s)
        .map(|block| CodepointRange {
            start: block.start,
            end: block.end,
        })
        .ok_or_else(|| {
            PaletteError::ConfigurationError(format!(
                "Invalid range or block name: {s} (use --list to see available block names)"
            ))
        })
}

/// Parse `COLSxROWS` (e.g. `16x10`)
pub fn parse_size(s: &str) -> Result<(u32, u32)> {
    let invalid = || {
        PaletteError::ConfigurationError(format!(
            "Invalid size format: {s} (use COLSxROWS, e.g. 16x10)"
        ))
    };
    let (cols, rows) = s.split_once('x').ok_or_else(invalid)?;
    let number = |part: &str| {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        part.parse::<u32>().map_err(|_| invalid())
    };
    let (cols, rows) = (number(cols)?, number(rows)?);
    if cols == 0 || rows == 0 {
        return Err(PaletteError::param("size", "cols and rows must be greater than 0"));
    }
    if u64::from(cols) * u64::from(rows) > MAX_GRID_CELLS {
        return Err(PaletteError::param(
            "size",
            format!("{cols}x{rows} exceeds {MAX_GRID_CELLS} cells"),
        ));
    }
    Ok((cols, rows))
}
