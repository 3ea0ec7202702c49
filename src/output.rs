//! Writing rendered artifacts to disk

use std::fs;
use std::path::Path;

use crate::errors::{PaletteError, Result};

/// Write `bytes` to `path`, creating parent directories as needed
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PaletteError::FileWriteError {
            path: path.to_path_buf(),
            message: format!("Failed to create parent directory: {e}"),
        })?;
    }

    fs::write(path, bytes).map_err(|e| PaletteError::FileWriteError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/out.svg");
        write_output(&path, b"<svg/>").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
    }

    #[test]
    fn test_unwritable_path_is_file_write_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();
        // parent is a regular file
        let err = write_output(&blocker.join("out.svg"), b"").unwrap_err();
        assert!(matches!(err, PaletteError::FileWriteError { .. }));
        assert!(!err.is_config_error());
    }
}
