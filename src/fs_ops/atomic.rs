//! Rename helpers.
//! - `replace_file`: rename over an existing destination (copy finalization).
//! - `rename_no_clobber`: rename only if the target name is free (in-place rename).
//! - On Unix, best-effort fsync of the destination directory after the rename.

use anyhow::Result;
use std::fs;
use std::path::Path;

use super::helpers::io_error_with_help;
use crate::errors::HashCopyError;
use crate::platform::fsync_dir;

/// Rename `src` onto `dst`, replacing `dst` if it exists.
pub fn replace_file(src: &Path, dst: &Path) -> Result<()> {
    // Windows: rename doesn't overwrite there.
    #[cfg(windows)]
    {
        if dst.exists() {
            if let Err(e) = fs::remove_file(dst) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    return Err(io_error_with_help("remove existing destination", dst)(e));
                }
            }
        }
    }

    fs::rename(src, dst).map_err(io_error_with_help("rename into place", dst))?;
    sync_parent(dst);
    Ok(())
}

/// Rename `src` to `dst`, failing with a typed collision if `dst` already exists.
pub fn rename_no_clobber(src: &Path, dst: &Path) -> Result<()> {
    if fs::symlink_metadata(dst).is_ok() {
        return Err(HashCopyError::NameCollision {
            from: src.to_path_buf(),
            to: dst.to_path_buf(),
        }
        .into());
    }
    fs::rename(src, dst).map_err(io_error_with_help("rename", src))?;
    sync_parent(dst);
    Ok(())
}

// Ignore fsync errors so a successful rename never turns into a failure.
fn sync_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = fsync_dir(parent);
    }
}
