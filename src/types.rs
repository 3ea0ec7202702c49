use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest Unicode codepoint
pub const MAX_CODEPOINT: u32 = 0x10_FFFF;

/// First codepoint of the surrogate range
pub const SURROGATE_START: u32 = 0xD800;

/// Last codepoint of the surrogate range
pub const SURROGATE_END: u32 = 0xDFFF;

/// Last codepoint of the Basic Multilingual Plane
pub const BMP_END: u32 = 0xFFFF;

/// Font referenced by generated markup unless overridden
pub const DEFAULT_FONT_PATH: &str = "./fonts/unifont.otf";

/// Classification of a single codepoint as seen by the core
///
/// Mirrors the Unicode general-category groupings the renderer cares about.
/// Anything that is not control, surrogate, unassigned or private-use is
/// treated as printable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CharCategory {
    Printable,
    Control,
    Surrogate,
    Unassigned,
    Private,
}

impl CharCategory {
    pub fn as_str(self) -> &'static str {
        RenderCategory::from(self).as_str()
    }

    pub fn is_printable(self) -> bool {
        self == Self::Printable
    }
}

impl fmt::Display for CharCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category set used by the rendering layer
///
/// Extends [`CharCategory`] with `NoGlyph`, which only a font-aware renderer
/// can determine: a printable codepoint the active font cannot draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderCategory {
    Printable,
    Control,
    Surrogate,
    Unassigned,
    Private,
    NoGlyph,
}

impl RenderCategory {
    pub const ALL: [Self; 6] = [
        Self::Printable,
        Self::Control,
        Self::Surrogate,
        Self::Unassigned,
        Self::Private,
        Self::NoGlyph,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Printable => "printable",
            Self::Control => "control",
            Self::Surrogate => "surrogate",
            Self::Unassigned => "unassigned",
            Self::Private => "private",
            Self::NoGlyph => "noGlyph",
        }
    }
}

impl From<CharCategory> for RenderCategory {
    fn from(category: CharCategory) -> Self {
        match category {
            CharCategory::Printable => Self::Printable,
            CharCategory::Control => Self::Control,
            CharCategory::Surrogate => Self::Surrogate,
            CharCategory::Unassigned => Self::Unassigned,
            CharCategory::Private => Self::Private,
        }
    }
}

impl fmt::Display for RenderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified character produced by the grid generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharInfo {
    pub codepoint: u32,
    #[serde(rename = "char")]
    pub ch: char,
    pub category: CharCategory,
}

/// User-supplied grid options; unset fields fall back to [`GridConfig::default`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub cols: Option<u32>,
    pub rows: Option<u32>,
    pub cell_size: Option<u32>,
    pub start_codepoint: Option<u32>,
    pub font_path: Option<String>,
    pub show_background: Option<bool>,
}

impl GridOptions {
    /// Layer `overrides` on top of `self`; set fields in `overrides` win
    #[must_use]
    pub fn merge(self, overrides: GridOptions) -> GridOptions {
        GridOptions {
            cols: overrides.cols.or(self.cols),
            rows: overrides.rows.or(self.rows),
            cell_size: overrides.cell_size.or(self.cell_size),
            start_codepoint: overrides.start_codepoint.or(self.start_codepoint),
            font_path: overrides.font_path.or(self.font_path),
            show_background: overrides.show_background.or(self.show_background),
        }
    }
}

/// Fully resolved grid configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub cols: u32,
    pub rows: u32,
    pub cell_size: u32,
    pub start_codepoint: u32,
    pub font_path: String,
    pub show_background: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: 64,
            rows: 104,
            cell_size: 16,
            start_codepoint: 0x0000,
            font_path: DEFAULT_FONT_PATH.to_string(),
            show_background: false,
        }
    }
}

impl GridConfig {
    /// Pixel width of the rendered grid
    pub fn width(&self) -> u32 {
        self.cols * self.cell_size
    }

    /// Pixel height of the rendered grid
    pub fn height(&self) -> u32 {
        self.rows * self.cell_size
    }

    /// Number of cells in the grid
    pub fn total(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

/// How the tile sampler picks its four codepoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingPolicy {
    /// Quartiles of the block's assigned codepoints
    #[default]
    Defined,
    /// Quartiles of the raw `[start, end]` span, ignoring assignment gaps
    Span,
}

// Accept a few spellings from config files
impl<'de> Deserialize<'de> for SamplingPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_ascii_lowercase().as_str() {
            "defined" | "assigned" => Ok(SamplingPolicy::Defined),
            "span" | "arithmetic" | "range" => Ok(SamplingPolicy::Span),
            _ => Err(serde::de::Error::custom(format!(
                "Unknown sampling policy: {s}"
            ))),
        }
    }
}

/// User-supplied tile options; unset fields fall back to [`TileConfig::default`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileOptions {
    pub cell_size: Option<u32>,
    /// Tiles per row
    pub cols: Option<u32>,
    pub font_path: Option<String>,
    pub sampling: Option<SamplingPolicy>,
}

impl TileOptions {
    #[must_use]
    pub fn merge(self, overrides: TileOptions) -> TileOptions {
        TileOptions {
            cell_size: overrides.cell_size.or(self.cell_size),
            cols: overrides.cols.or(self.cols),
            font_path: overrides.font_path.or(self.font_path),
            sampling: overrides.sampling.or(self.sampling),
        }
    }
}

/// Fully resolved tile mosaic configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileConfig {
    pub cell_size: u32,
    pub cols: u32,
    pub font_path: String,
    pub sampling: SamplingPolicy,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            cell_size: 32,
            cols: 8,
            font_path: DEFAULT_FONT_PATH.to_string(),
            sampling: SamplingPolicy::Defined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names() {
        assert_eq!(CharCategory::Private.to_string(), "private");
        assert_eq!(RenderCategory::NoGlyph.to_string(), "noGlyph");
        assert_eq!(
            RenderCategory::from(CharCategory::Unassigned),
            RenderCategory::Unassigned
        );
    }

    #[test]
    fn test_grid_options_merge() {
        let base = GridOptions {
            cols: Some(32),
            rows: Some(8),
            ..Default::default()
        };
        let merged = base.merge(GridOptions {
            rows: Some(4),
            show_background: Some(true),
            ..Default::default()
        });
        assert_eq!(merged.cols, Some(32));
        assert_eq!(merged.rows, Some(4));
        assert_eq!(merged.show_background, Some(true));
        assert_eq!(merged.font_path, None);
    }

    #[test]
    fn test_sampling_policy_aliases() {
        let policy: SamplingPolicy = serde_json::from_str("\"arithmetic\"").unwrap();
        assert_eq!(policy, SamplingPolicy::Span);
        let policy: SamplingPolicy = serde_json::from_str("\"Defined\"").unwrap();
        assert_eq!(policy, SamplingPolicy::Defined);
        assert!(serde_json::from_str::<SamplingPolicy>("\"random\"").is_err());
    }

    #[test]
    fn test_grid_options_from_json() {
        let options: GridOptions =
            serde_json::from_str(r#"{"cols": 8, "cellSize": 24, "showBackground": true}"#)
                .unwrap();
        assert_eq!(options.cols, Some(8));
        assert_eq!(options.cell_size, Some(24));
        assert_eq!(options.show_background, Some(true));
        assert_eq!(options.rows, None);
    }
}
