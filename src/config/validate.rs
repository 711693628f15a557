//! Directory validation logic.
//! Verifies the source exists and is readable, prepares the destination, and
//! refuses a copy whose source and destination are the same directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::errors::HashCopyError;

/// Source directory: must exist, be a directory, and be listable.
pub fn ensure_source_dir(path: &Path) -> Result<()> {
    ensure_dir_exists_and_is_dir(path, "source")?;
    fs::read_dir(path).with_context(|| {
        format!("Cannot read source directory '{}'; check permissions", path.display())
    })?;
    debug!("source readable: {}", path.display());
    Ok(())
}

/// Destination directory: created when missing (unless `dry_run`), must be a directory,
/// and must not resolve to the same place as `source`.
pub fn ensure_destination_dir(source: &Path, dest: &Path, dry_run: bool) -> Result<()> {
    if dest.exists() {
        if !dest.is_dir() {
            error!("destination exists but isn't a directory: {}", dest.display());
            return Err(HashCopyError::NotADirectory(dest.to_path_buf()).into());
        }
    } else if dry_run {
        info!(path = %dest.display(), "dry-run: would create destination directory");
        return Ok(());
    } else {
        fs::create_dir_all(dest).with_context(|| {
            format!("Failed to create destination directory '{}'", dest.display())
        })?;
        info!("Created destination directory: {}", dest.display());
    }

    let src_real = dunce::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());
    let dst_real = dunce::canonicalize(dest).unwrap_or_else(|_| dest.to_path_buf());
    if src_real == dst_real {
        error!("source and destination resolve to the same path: {}", src_real.display());
        return Err(HashCopyError::SameDirectory(src_real).into());
    }
    Ok(())
}

/// Ensure path exists and is a directory; emit clear errors with path context.
fn ensure_dir_exists_and_is_dir(path: &Path, name: &str) -> Result<()> {
    if !path.exists() {
        error!("{name} does not exist: {}", path.display());
        return Err(HashCopyError::DirectoryNotFound(path.to_path_buf()).into());
    }
    if !path.is_dir() {
        error!("{name} is not a directory: {}", path.display());
        return Err(HashCopyError::NotADirectory(path.to_path_buf()).into());
    }
    Ok(())
}
