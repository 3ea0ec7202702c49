//! Serde model and validation for the block catalog data file

use serde::{Deserialize, Serialize};

use crate::errors::{PaletteError, Result};
use crate::types::{BMP_END, MAX_CODEPOINT};

/// Inclusive run of consecutive assigned codepoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodepointRange {
    pub start: u32,
    pub end: u32,
}

impl CodepointRange {
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        (self.start..=self.end).contains(&codepoint)
    }
}

/// A Unicode block together with the ranges of its assigned codepoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnicodeBlockData {
    pub name: String,
    pub display_name: String,
    pub block_start: u32,
    pub block_end: u32,
    pub defined_count: u32,
    pub unassigned_count: u32,
    pub ranges: Vec<CodepointRange>,
}

impl UnicodeBlockData {
    /// Whether `codepoint` is one of the block's assigned codepoints
    pub fn is_defined(&self, codepoint: u32) -> bool {
        let idx = self.ranges.partition_point(|r| r.end < codepoint);
        self.ranges
            .get(idx)
            .is_some_and(|range| range.contains(codepoint))
    }

    /// The `n`-th assigned codepoint in ascending order
    pub fn nth_defined(&self, mut n: u32) -> Option<u32> {
        for range in &self.ranges {
            if n < range.len() {
                return Some(range.start + n);
            }
            n -= range.len();
        }
        None
    }

    /// All assigned codepoints in ascending order
    pub fn defined_codepoints(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges.iter().flat_map(|r| r.start..=r.end)
    }

    fn validate(&self) -> Result<()> {
        let fail = |msg: String| {
            Err(PaletteError::CatalogValidation(format!(
                "{}: {msg}",
                self.name
            )))
        };

        if self.name.is_empty() {
            return Err(PaletteError::CatalogValidation(
                "block with empty name".to_string(),
            ));
        }
        if self.block_start > self.block_end {
            return fail(format!(
                "blockStart {:#X} is after blockEnd {:#X}",
                self.block_start, self.block_end
            ));
        }
        if self.block_end > MAX_CODEPOINT {
            return fail(format!("blockEnd {:#X} exceeds U+10FFFF", self.block_end));
        }

        let mut defined: u32 = 0;
        let mut prev_end: Option<u32> = None;
        for range in &self.ranges {
            if range.start > range.end {
                return fail(format!("range {:#X}-{:#X} is reversed", range.start, range.end));
            }
            if range.start < self.block_start || range.end > self.block_end {
                return fail(format!(
                    "range {:#X}-{:#X} lies outside the block",
                    range.start, range.end
                ));
            }
            if prev_end.is_some_and(|end| range.start <= end) {
                return fail(format!(
                    "range {:#X}-{:#X} overlaps or precedes the previous range",
                    range.start, range.end
                ));
            }
            prev_end = Some(range.end);
            defined += range.len();
        }

        if defined != self.defined_count {
            return fail(format!(
                "definedCount is {} but ranges cover {defined} codepoints",
                self.defined_count
            ));
        }
        let size = self.block_end - self.block_start + 1;
        if self.defined_count.checked_add(self.unassigned_count) != Some(size) {
            return fail(format!(
                "definedCount {} + unassignedCount {} != block size {size}",
                self.defined_count, self.unassigned_count
            ));
        }
        Ok(())
    }
}

/// Top-level shape of `unicode-blocks.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnicodeBlocksData {
    pub version: String,
    pub generated_at: String,
    pub total_blocks: usize,
    pub bmp_blocks: usize,
    pub blocks: Vec<UnicodeBlockData>,
}

impl UnicodeBlocksData {
    /// Check every block and the header counts
    pub fn validate(&self) -> Result<()> {
        for block in &self.blocks {
            block.validate()?;
        }
        if self.total_blocks != self.blocks.len() {
            return Err(PaletteError::CatalogValidation(format!(
                "totalBlocks is {} but {} blocks are listed",
                self.total_blocks,
                self.blocks.len()
            )));
        }
        let bmp = self
            .blocks
            .iter()
            .filter(|b| b.block_start <= BMP_END)
            .count();
        if self.bmp_blocks != bmp {
            return Err(PaletteError::CatalogValidation(format!(
                "bmpBlocks is {} but {bmp} blocks start in the BMP",
                self.bmp_blocks
            )));
        }
        Ok(())
    }

    /// Render as CSV, one block per line
    ///
    /// Ranges are written as `start-end` pairs separated by commas; the field
    /// is quoted when it holds more than one pair.
    pub fn to_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.blocks.len() + 1);
        lines.push(
            "name,displayName,blockStart,blockEnd,definedCount,unassignedCount,ranges".to_string(),
        );
        for b in &self.blocks {
            let ranges = b
                .ranges
                .iter()
                .map(|r| format!("{}-{}", r.start, r.end))
                .collect::<Vec<_>>()
                .join(",");
            let ranges = if ranges.contains(',') {
                format!("\"{ranges}\"")
            } else {
                ranges
            };
            lines.push(format!(
                "{},{},{},{},{},{},{}",
                b.name,
                b.display_name,
                b.block_start,
                b.block_end,
                b.defined_count,
                b.unassigned_count,
                ranges
            ));
        }
        lines.join("\n")
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| PaletteError::CatalogParse(e.to_string()))
    }
}

/// Parse and validate catalog JSON
pub fn parse_unicode_blocks_data(json: &str) -> Result<UnicodeBlocksData> {
    let data: UnicodeBlocksData =
        serde_json::from_str(json).map_err(|e| PaletteError::CatalogParse(e.to_string()))?;
    data.validate()?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greek_like() -> UnicodeBlockData {
        UnicodeBlockData {
            name: "Test_Block".to_string(),
            display_name: "Test Block".to_string(),
            block_start: 0x10,
            block_end: 0x1F,
            defined_count: 7,
            unassigned_count: 9,
            ranges: vec![
                CodepointRange { start: 0x10, end: 0x13 },
                CodepointRange { start: 0x18, end: 0x19 },
                CodepointRange { start: 0x1F, end: 0x1F },
            ],
        }
    }

    fn wrap(block: UnicodeBlockData) -> UnicodeBlocksData {
        UnicodeBlocksData {
            version: "test".to_string(),
            generated_at: String::new(),
            total_blocks: 1,
            bmp_blocks: 1,
            blocks: vec![block],
        }
    }

    #[test]
    fn test_nth_defined_walks_ranges() {
        let block = greek_like();
        assert_eq!(block.nth_defined(0), Some(0x10));
        assert_eq!(block.nth_defined(3), Some(0x13));
        assert_eq!(block.nth_defined(4), Some(0x18));
        assert_eq!(block.nth_defined(6), Some(0x1F));
        assert_eq!(block.nth_defined(7), None);
    }

    #[test]
    fn test_is_defined() {
        let block = greek_like();
        assert!(block.is_defined(0x12));
        assert!(!block.is_defined(0x14));
        assert!(block.is_defined(0x1F));
        assert!(!block.is_defined(0x0F));
        assert_eq!(block.defined_codepoints().count(), 7);
    }

    #[test]
    fn test_valid_block_passes() {
        assert!(wrap(greek_like()).validate().is_ok());
    }

    #[test]
    fn test_defined_count_mismatch_fails() {
        let mut block = greek_like();
        block.defined_count = 8;
        let err = wrap(block).validate().unwrap_err();
        assert!(matches!(err, PaletteError::CatalogValidation(_)));
    }

    #[test]
    fn test_overlapping_ranges_fail() {
        let mut block = greek_like();
        block.ranges[1] = CodepointRange { start: 0x13, end: 0x14 };
        assert!(wrap(block).validate().is_err());
    }

    #[test]
    fn test_range_outside_block_fails() {
        let mut block = greek_like();
        block.ranges[2] = CodepointRange { start: 0x20, end: 0x20 };
        assert!(wrap(block).validate().is_err());
    }

    #[test]
    fn test_header_count_mismatch_fails() {
        let mut data = wrap(greek_like());
        data.total_blocks = 2;
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let json = r#"{"version": "x", "generatedAt": "", "totalBlocks": 0, "blocks": []}"#;
        let err = parse_unicode_blocks_data(json).unwrap_err();
        assert!(matches!(err, PaletteError::CatalogParse(_)));
    }

    #[test]
    fn test_negative_codepoint_is_parse_error() {
        let json = r#"{"version": "x", "generatedAt": "", "totalBlocks": 1, "bmpBlocks": 1,
            "blocks": [{"name": "A", "displayName": "A", "blockStart": -1, "blockEnd": 2,
            "definedCount": 0, "unassignedCount": 4, "ranges": []}]}"#;
        assert!(matches!(
            parse_unicode_blocks_data(json),
            Err(PaletteError::CatalogParse(_))
        ));
    }

    #[test]
    fn test_to_csv_quotes_multiple_ranges() {
        let mut data = wrap(greek_like());
        data.blocks.push(UnicodeBlockData {
            name: "Single".to_string(),
            display_name: "Single".to_string(),
            block_start: 0x20,
            block_end: 0x21,
            defined_count: 2,
            unassigned_count: 0,
            ranges: vec![CodepointRange { start: 0x20, end: 0x21 }],
        });
        let csv = data.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "name,displayName,blockStart,blockEnd,definedCount,unassignedCount,ranges"
        );
        assert_eq!(lines[1], "Test_Block,Test Block,16,31,7,9,\"16-19,24-25,31-31\"");
        assert_eq!(lines[2], "Single,Single,32,33,2,0,32-33");
    }
}
