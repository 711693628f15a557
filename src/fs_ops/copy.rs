//! Copy workflow.
//!
//! For each regular file of the source directory:
//! - hash it through a single read handle;
//! - if a destination file already holds that hash, only bring its mtime forward;
//! - otherwise stream the (rewound) handle into a temp file in the destination,
//!   then rename it onto the hashed name, replacing any file of that name.
//!
//! Notes:
//! - The destination is listed once, before the first source file. Files created
//!   by this run are not looked up again, matching a snapshot-then-scan policy.
//! - The temp-then-rename step means an interrupted copy never leaves a partial
//!   file under a valid hashed name.
//! - Source files are never modified.

use anyhow::Result;
use std::fmt;
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info, warn};

use super::atomic::replace_file;
use super::helpers::io_error_with_help;
use super::index::DestinationIndex;
use super::io_copy::copy_to_new_file;
use super::listing::{FileRecord, list_files};
use super::touch::{TouchOutcome, touch_if_older};
use crate::config::Config;
use crate::hash::{ContentHash, compute_hash};
use crate::naming::derive_hashed_name;
use crate::platform::temp::tmp_name_in;

/// Counters for one copy run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// New files written to the destination.
    pub copied: usize,
    /// Existing copies whose mtime was brought forward.
    pub touched: usize,
    /// Existing copies already as new as their source.
    pub up_to_date: usize,
    /// Files skipped because their name is not valid UTF-8.
    pub skipped: usize,
    /// Total bytes written by `copied`.
    pub bytes_copied: u64,
}

impl fmt::Display for CopyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "copied {} ({} bytes), touched {}, up to date {}, skipped {}",
            self.copied, self.bytes_copied, self.touched, self.up_to_date, self.skipped
        )
    }
}

/// Copy every file of `from` into `to` under its hashed name, skipping content
/// `to` already holds.
///
/// Fails fast: the first unreadable source or failed write aborts the run.
pub fn copy_files(config: &Config, from: &Path, to: &Path) -> Result<CopyReport> {
    // A destination that dry-run declined to create is simply empty.
    let existing = if config.dry_run && !to.exists() {
        Vec::new()
    } else {
        list_files(to)?
    };
    let index = DestinationIndex::build(existing);
    let sources = list_files(from)?;
    debug!(
        from = %from.display(),
        to = %to.display(),
        sources = sources.len(),
        existing = index.len(),
        "copy: snapshots taken"
    );

    let mut report = CopyReport::default();
    for record in &sources {
        copy_one(config, record, to, &index, &mut report)?;
    }
    Ok(report)
}

fn copy_one(
    config: &Config,
    record: &FileRecord,
    to: &Path,
    index: &DestinationIndex,
    report: &mut CopyReport,
) -> Result<()> {
    let Some(name) = record.name_str() else {
        warn!(path = %record.path.display(), "skipping file with non UTF-8 name");
        report.skipped += 1;
        return Ok(());
    };

    // One handle for hash and copy; dropped when this function returns, on every path.
    let mut file =
        File::open(&record.path).map_err(io_error_with_help("open for hashing", &record.path))?;
    let hash = compute_hash(&mut file).map_err(io_error_with_help("hash", &record.path))?;

    if let Some(existing) = index.lookup(&hash) {
        match touch_if_older(existing, record.modified, config.dry_run)? {
            TouchOutcome::Touched => {
                info!(
                    src = %record.path.display(),
                    dest = %existing.path.display(),
                    %hash,
                    dry_run = config.dry_run,
                    "Content present; modification time brought forward"
                );
                report.touched += 1;
            }
            TouchOutcome::UpToDate => {
                debug!(src = %record.path.display(), dest = %existing.path.display(), %hash, "Content present and up to date");
                report.up_to_date += 1;
            }
        }
        return Ok(());
    }

    let dest = to.join(derive_hashed_name(name, hash.as_str()));
    if config.dry_run {
        info!(src = %record.path.display(), dest = %dest.display(), %hash, "dry-run: would copy");
        report.copied += 1;
        return Ok(());
    }

    let bytes = write_copy(config, &mut file, to, &dest, &hash)?;
    info!(src = %record.path.display(), dest = %dest.display(), %hash, bytes, "Copied");
    report.copied += 1;
    report.bytes_copied += bytes;
    Ok(())
}

/// Stream `src` into a temp file in `dir`, then rename it onto `dest`.
fn write_copy(
    config: &Config,
    src: &mut File,
    dir: &Path,
    dest: &Path,
    hash: &ContentHash,
) -> Result<u64> {
    let tmp = tmp_name_in(dir, "copy");
    let res = match copy_to_new_file(src, &tmp, config.durability) {
        Ok(res) => res,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(io_error_with_help("copy to temporary file", &tmp)(e));
        }
    };

    if let Err(e) = replace_file(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    debug!(dest = %dest.display(), %hash, mode = %res.mode, "copy finalized");
    Ok(res.bytes)
}
