//! Modification-time reconciliation for content that is already present.

use anyhow::Result;
use filetime::{FileTime, set_file_mtime};
use std::fs;

use super::helpers::io_error_with_help;
use super::listing::FileRecord;

/// What happened to an existing destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchOutcome {
    /// Destination was older; its mtime now equals the source's.
    Touched,
    /// Destination was already as new or newer.
    UpToDate,
}

/// Advance `dest`'s mtime to `source_mtime` if `dest` is older. Access time is left alone.
///
/// The comparison uses the file's current mtime, not the listing snapshot: an
/// earlier source in the same run may already have moved it forward.
pub(super) fn touch_if_older(
    dest: &FileRecord,
    source_mtime: FileTime,
    dry_run: bool,
) -> Result<TouchOutcome> {
    let meta = fs::metadata(&dest.path).map_err(io_error_with_help("stat", &dest.path))?;
    let current = FileTime::from_last_modification_time(&meta);
    if current >= source_mtime {
        return Ok(TouchOutcome::UpToDate);
    }
    if !dry_run {
        set_file_mtime(&dest.path, source_mtime)
            .map_err(io_error_with_help("set modification time", &dest.path))?;
    }
    Ok(TouchOutcome::Touched)
}
