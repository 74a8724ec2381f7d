//! Filesystem checks run before any image is touched.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Fail with [`Error::PathNotFound`] unless `path` can be accessed.
///
/// # Errors
///
/// Returns [`Error::PathNotFound`] if the path does not exist or cannot be read.
pub fn path_exists(path: &Path) -> Result<()> {
    fs::metadata(path)
        .map(|_| ())
        .map_err(|_| Error::PathNotFound {
            path: path.to_path_buf(),
        })
}

/// Create `path` as a directory if it cannot be accessed.
///
/// Only the last component is created; a missing parent is an error.
///
/// # Errors
///
/// Returns [`Error::CreateDir`] if the directory cannot be created.
pub fn path_if_not_exists(path: &Path) -> Result<()> {
    if fs::metadata(path).is_ok() {
        return Ok(());
    }
    tracing::debug!("creating directory {}", path.display());
    fs::create_dir(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
