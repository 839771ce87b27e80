//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Canonicalize a path, but don't fail if it doesn't exist yet.
/// Returns the path as-is if canonicalization fails.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Resolve a document reference relative to the document that made it.
///
/// Absolute references are returned unchanged; relative ones are joined
/// onto the referring document's parent directory.
pub fn resolve_relative(referrer: &Path, reference: &Path) -> PathBuf {
    if reference.is_absolute() {
        return normalize_path(reference);
    }
    let base = referrer.parent().unwrap_or(Path::new("."));
    normalize_path(&base.join(reference))
}
