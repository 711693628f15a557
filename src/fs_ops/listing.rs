//! Directory snapshots.
//!
//! Only the immediate regular files of a directory are File Records. Subdirectories
//! and symlinks are skipped; entries are sorted by file name so runs are
//! reproducible. The listing is taken once and never refreshed.

use anyhow::{Context, Result};
use filetime::FileTime;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// A regular file observed in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// File name including extension.
    pub name: OsString,
    /// Full path (directory joined with name).
    pub path: PathBuf,
    /// Last-modified time at listing.
    pub modified: FileTime,
}

impl FileRecord {
    /// UTF-8 view of the name, if it has one.
    pub fn name_str(&self) -> Option<&str> {
        self.name.to_str()
    }
}

/// List the immediate regular files of `dir`, sorted by name.
pub fn list_files(dir: &Path) -> Result<Vec<FileRecord>> {
    let mut records = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("list directory '{}'", dir.display()))?;
        if !entry.file_type().is_file() {
            trace!(path = %entry.path().display(), "skipping non-regular entry");
            continue;
        }
        let meta = entry
            .metadata()
            .with_context(|| format!("stat '{}'", entry.path().display()))?;
        records.push(FileRecord {
            name: entry.file_name().to_os_string(),
            modified: FileTime::from_last_modification_time(&meta),
            path: entry.into_path(),
        });
    }

    Ok(records)
}
