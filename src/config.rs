//! Configuration resolution and config-file loading
//!
//! Precedence is defaults, then the config file, then command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::{PaletteError, Result};
use crate::render::tiles::{LABEL_HEIGHT, TILE_PADDING};
use crate::types::{GridConfig, GridOptions, TileConfig, TileOptions, MAX_CODEPOINT};

/// Contents of a palette config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteConfig {
    #[serde(default)]
    pub grid: GridOptions,
    #[serde(default)]
    pub tiles: TileOptions,
}

impl PaletteConfig {
    /// Configuration directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "unicode-palette", "unicode-palette")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Path of the default config file
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }
}

fn positive(field: &str, value: u32) -> Result<u32> {
    if value == 0 {
        return Err(PaletteError::param(field, "must be greater than 0"));
    }
    Ok(value)
}

/// Fill unset grid options with defaults and validate the result
pub fn resolve_config(options: &GridOptions) -> Result<GridConfig> {
    let defaults = GridConfig::default();
    let config = GridConfig {
        cols: options.cols.unwrap_or(defaults.cols),
        rows: options.rows.unwrap_or(defaults.rows),
        cell_size: options.cell_size.unwrap_or(defaults.cell_size),
        start_codepoint: options.start_codepoint.unwrap_or(defaults.start_codepoint),
        font_path: options.font_path.clone().unwrap_or(defaults.font_path),
        show_background: options.show_background.unwrap_or(defaults.show_background),
    };
    validate_grid_config(&config)?;
    Ok(config)
}

/// Check the invariants of a grid configuration
pub fn validate_grid_config(config: &GridConfig) -> Result<()> {
    positive("cols", config.cols)?;
    positive("rows", config.rows)?;
    positive("cellSize", config.cell_size)?;
    if config.start_codepoint > MAX_CODEPOINT {
        return Err(PaletteError::param(
            "startCodepoint",
            format!("{:#X} exceeds U+10FFFF", config.start_codepoint),
        ));
    }
    if config.cols.checked_mul(config.cell_size).is_none()
        || config.rows.checked_mul(config.cell_size).is_none()
    {
        return Err(PaletteError::param("cellSize", "grid dimensions overflow"));
    }
    Ok(())
}

/// Fill unset tile options with defaults and validate the result
pub fn resolve_tile_config(options: &TileOptions) -> Result<TileConfig> {
    let defaults = TileConfig::default();
    let config = TileConfig {
        cell_size: options.cell_size.unwrap_or(defaults.cell_size),
        cols: options.cols.unwrap_or(defaults.cols),
        font_path: options.font_path.clone().unwrap_or(defaults.font_path),
        sampling: options.sampling.unwrap_or(defaults.sampling),
    };
    validate_tile_config(&config)?;
    Ok(config)
}

pub fn validate_tile_config(config: &TileConfig) -> Result<()> {
    positive("cellSize", config.cell_size)?;
    positive("cols", config.cols)?;
    let row_width = config
        .cell_size
        .checked_mul(4)
        .and_then(|w| w.checked_add(TILE_PADDING))
        .and_then(|w| w.checked_mul(config.cols));
    let tile_height = config.cell_size.checked_add(LABEL_HEIGHT + TILE_PADDING);
    if row_width.is_none() || tile_height.is_none() {
        return Err(PaletteError::param("cellSize", "tile dimensions overflow"));
    }
    Ok(())
}

/// Parse config text; TOML when `is_toml`, JSON otherwise
pub fn parse_config(content: &str, is_toml: bool) -> Result<PaletteConfig> {
    if is_toml {
        toml::from_str(content)
            .map_err(|e| PaletteError::ConfigurationError(format!("Invalid TOML config: {e}")))
    } else {
        serde_json::from_str(content)
            .map_err(|e| PaletteError::ConfigurationError(format!("Invalid JSON config: {e}")))
    }
}

/// Load configuration
///
/// An explicit `path` must exist. Without one, the default config file is
/// read if present, otherwise an empty configuration is returned.
pub fn load_config(path: Option<&Path>) -> Result<PaletteConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match PaletteConfig::config_path() {
            Some(default) if default.exists() => default,
            _ => return Ok(PaletteConfig::default()),
        },
    };

    let content = fs::read_to_string(&path).map_err(|e| {
        PaletteError::ConfigurationError(format!("Failed to read config {}: {e}", path.display()))
    })?;
    tracing::debug!("Loaded config from {}", path.display());

    parse_config(&content, path.extension().is_some_and(|e| e == "toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SamplingPolicy;

    #[test]
    fn test_default_config() {
        let config = resolve_config(&GridOptions::default()).unwrap();
        assert_eq!(config.cols, 64);
        assert_eq!(config.rows, 104);
        assert_eq!(config.cell_size, 16);
        assert_eq!(config.start_codepoint, 0);
        assert_eq!(config.font_path, "./fonts/unifont.otf");
        assert!(!config.show_background);
    }

    #[test]
    fn test_partial_override() {
        let config = resolve_config(&GridOptions {
            cols: Some(32),
            rows: Some(16),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(config.cols, 32);
        assert_eq!(config.rows, 16);
        assert_eq!(config.cell_size, 16);
    }

    #[test]
    fn test_zero_values_rejected() {
        for options in [
            GridOptions { cols: Some(0), ..Default::default() },
            GridOptions { rows: Some(0), ..Default::default() },
            GridOptions { cell_size: Some(0), ..Default::default() },
        ] {
            let err = resolve_config(&options).unwrap_err();
            assert!(err.is_config_error());
        }
    }

    #[test]
    fn test_start_out_of_range_rejected() {
        let err = resolve_config(&GridOptions {
            start_codepoint: Some(0x11_0000),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, PaletteError::InvalidConfig { .. }));
    }

    #[test]
    fn test_tile_defaults() {
        let config = resolve_tile_config(&TileOptions::default()).unwrap();
        assert_eq!(config.cell_size, 32);
        assert_eq!(config.cols, 8);
        assert_eq!(config.sampling, SamplingPolicy::Defined);
        assert!(resolve_tile_config(&TileOptions {
            cols: Some(0),
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn test_tile_dimension_overflow_rejected() {
        for options in [
            TileOptions { cell_size: Some(0x4000_0000), ..Default::default() },
            TileOptions { cell_size: Some(u32::MAX - 8), cols: Some(1), ..Default::default() },
            TileOptions { cols: Some(0x1000_0000), ..Default::default() },
        ] {
            let err = resolve_tile_config(&options).unwrap_err();
            assert!(err.is_config_error(), "{options:?}");
        }
    }

    #[test]
    fn test_parse_toml_config() {
        let config = parse_config(
            "[grid]\ncols = 16\nshowBackground = true\n\n[tiles]\nsampling = \"span\"\n",
            true,
        )
        .unwrap();
        assert_eq!(config.grid.cols, Some(16));
        assert_eq!(config.grid.show_background, Some(true));
        assert_eq!(config.tiles.sampling, Some(SamplingPolicy::Span));
    }

    #[test]
    fn test_parse_json_config_without_tiles() {
        let config = parse_config(r#"{"grid": {"cellSize": 24}}"#, false).unwrap();
        assert_eq!(config.grid.cell_size, Some(24));
        assert_eq!(config.tiles, TileOptions::default());
    }

    #[test]
    fn test_invalid_config_text() {
        let err = parse_config("[grid\ncols = ", true).unwrap_err();
        assert!(matches!(err, PaletteError::ConfigurationError(_)));
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let err = load_config(Some(Path::new("/nonexistent/palette.toml"))).unwrap_err();
        assert!(matches!(err, PaletteError::ConfigurationError(_)));
    }
}
