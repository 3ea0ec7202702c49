//! Block catalog and codepoint classification
//!
//! Everything here is pure: the catalog is built once from validated data
//! and every lookup or classification is a read over it.

pub mod blocks;
pub mod category;
pub mod schema;

pub use blocks::{get_block_size, get_quartile_chars, BlockCatalog, UnicodeBlock};
pub use category::{
    category_color, category_color_css, char_category, escape_markup, escape_xml, get_category,
    skip_surrogate,
};
pub use schema::{parse_unicode_blocks_data, CodepointRange, UnicodeBlockData, UnicodeBlocksData};
