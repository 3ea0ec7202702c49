//! Unicode block catalog and lookups

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::schema::{parse_unicode_blocks_data, UnicodeBlockData, UnicodeBlocksData};
use crate::errors::Result;
use crate::types::BMP_END;

/// Block catalog compiled into the binary (Unicode 14.0.0)
const EMBEDDED_JSON: &str = include_str!("../../data/unicode-blocks.json");

lazy_static! {
    static ref EMBEDDED: Result<BlockCatalog> = BlockCatalog::from_json(EMBEDDED_JSON);
}

/// Summary view of a block used by the renderers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnicodeBlock {
    pub name: String,
    pub display_name: String,
    pub start: u32,
    pub end: u32,
}

impl From<&UnicodeBlockData> for UnicodeBlock {
    fn from(data: &UnicodeBlockData) -> Self {
        Self {
            name: data.name.clone(),
            display_name: data.display_name.clone(),
            start: data.block_start,
            end: data.block_end,
        }
    }
}

/// Number of codepoints in a block, assigned or not
///
/// A hand-built block with `start > end` has size 0.
pub fn get_block_size(block: &UnicodeBlock) -> u32 {
    if block.start > block.end {
        return 0;
    }
    (block.end - block.start).saturating_add(1)
}

/// Arithmetic quartiles of the block span
///
/// Ignores assignment gaps, so samples may land on unassigned codepoints.
/// Used when no range data exists for a block.
pub fn get_quartile_chars(block: &UnicodeBlock) -> [u32; 4] {
    let quartile = get_block_size(block) / 4;
    [0, 1, 2, 3].map(|k| block.start.saturating_add(quartile * k))
}

/// Immutable table of Unicode blocks, sorted by start codepoint
#[derive(Debug, Clone)]
pub struct BlockCatalog {
    version: String,
    generated_at: String,
    data: Vec<UnicodeBlockData>,
    blocks: Vec<UnicodeBlock>,
}

impl BlockCatalog {
    /// Build a catalog from validated data
    pub fn new(data: UnicodeBlocksData) -> Result<Self> {
        data.validate()?;

        let UnicodeBlocksData {
            version,
            generated_at,
            blocks: mut data,
            ..
        } = data;
        data.sort_by_key(|b| b.block_start);
        let blocks = data.iter().map(UnicodeBlock::from).collect();

        tracing::info!(
            "Loaded Unicode {} block catalog with {} blocks",
            version,
            data.len()
        );

        Ok(Self {
            version,
            generated_at,
            data,
            blocks,
        })
    }

    /// Parse, validate and index catalog JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(parse_unicode_blocks_data(json)?)
    }

    /// The catalog bundled with the crate, parsed on first use
    pub fn embedded() -> Result<&'static BlockCatalog> {
        EMBEDDED.as_ref().map_err(Clone::clone)
    }

    /// Unicode version of the source data
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All blocks in ascending start order
    pub fn blocks(&self) -> &[UnicodeBlock] {
        &self.blocks
    }

    /// Blocks starting inside the Basic Multilingual Plane
    pub fn bmp_blocks(&self) -> &[UnicodeBlock] {
        let count = self.blocks.partition_point(|b| b.start <= BMP_END);
        &self.blocks[..count]
    }

    /// Full block records including defined ranges
    pub fn block_data(&self) -> &[UnicodeBlockData] {
        &self.data
    }

    /// Rebuild the serializable form of the catalog
    pub fn to_data(&self) -> UnicodeBlocksData {
        UnicodeBlocksData {
            version: self.version.clone(),
            generated_at: self.generated_at.clone(),
            total_blocks: self.data.len(),
            bmp_blocks: self.bmp_blocks().len(),
            blocks: self.data.clone(),
        }
    }

    fn index_of(&self, codepoint: u32) -> Option<usize> {
        let idx = self.data.partition_point(|b| b.block_start <= codepoint);
        let idx = idx.checked_sub(1)?;
        (codepoint <= self.data[idx].block_end).then_some(idx)
    }

    /// Block containing `codepoint`, if any
    pub fn get_block_by_codepoint(&self, codepoint: u32) -> Option<&UnicodeBlock> {
        self.index_of(codepoint).map(|idx| &self.blocks[idx])
    }

    /// Block data by exact identifier (e.g. `Basic_Latin`)
    pub fn get_block_data_by_name(&self, name: &str) -> Option<&UnicodeBlockData> {
        self.data.iter().find(|b| b.name == name)
    }

    /// Block by identifier or display name, ignoring ASCII case
    pub fn find_block(&self, name: &str) -> Option<&UnicodeBlock> {
        self.blocks.iter().find(|b| {
            b.name.eq_ignore_ascii_case(name) || b.display_name.eq_ignore_ascii_case(name)
        })
    }

    /// Whether `codepoint` is assigned (general category other than Cn)
    pub fn is_assigned(&self, codepoint: u32) -> bool {
        self.index_of(codepoint)
            .is_some_and(|idx| self.data[idx].is_defined(codepoint))
    }

    /// Assigned codepoints within `[start, end]`, ascending
    pub fn defined_codepoints(&self, start: u32, end: u32) -> Vec<u32> {
        self.data
            .iter()
            .filter(|b| b.block_end >= start && b.block_start <= end)
            .flat_map(|b| b.ranges.iter())
            .flat_map(|r| r.start.max(start)..=r.end.min(end))
            .collect()
    }
}
