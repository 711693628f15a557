//! In-place rename workflow.
//! Each regular file in a directory is hashed and renamed to carry its hash,
//! unless its name already does. Content and timestamps are never changed.

use anyhow::Result;
use std::fmt;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

use super::atomic::rename_no_clobber;
use super::helpers::io_error_with_help;
use super::listing::list_files;
use crate::config::Config;
use crate::hash::compute_hash;
use crate::naming::derive_hashed_name;

/// Counters for one rename run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameReport {
    /// Files renamed (or that would be, in dry-run).
    pub renamed: usize,
    /// Files whose name already carried their hash.
    pub unchanged: usize,
    /// Files skipped because their name is not valid UTF-8.
    pub skipped: usize,
}

impl fmt::Display for RenameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "renamed {}, already hashed {}, skipped {}",
            self.renamed, self.unchanged, self.skipped
        )
    }
}

/// Rename every file in `dir` to its hashed name.
///
/// Fails fast: the first file that cannot be read or renamed aborts the run.
pub fn rename_files(config: &Config, dir: &Path) -> Result<RenameReport> {
    let mut report = RenameReport::default();
    let files = list_files(dir)?;
    debug!(dir = %dir.display(), files = files.len(), "rename: listed directory");

    for record in files {
        let Some(name) = record.name_str() else {
            warn!(path = %record.path.display(), "skipping file with non UTF-8 name");
            report.skipped += 1;
            continue;
        };

        // Handle is scoped to this block; it is closed before any rename.
        let hash = {
            let mut file =
                File::open(&record.path).map_err(io_error_with_help("open for hashing", &record.path))?;
            compute_hash(&mut file).map_err(io_error_with_help("hash", &record.path))?
        };

        let new_name = derive_hashed_name(name, hash.as_str());
        if new_name == name {
            debug!(file = name, %hash, "already hashed");
            report.unchanged += 1;
            continue;
        }

        let target = dir.join(&new_name);
        if config.dry_run {
            info!(src = %record.path.display(), dest = %target.display(), %hash, "dry-run: would rename");
        } else {
            rename_no_clobber(&record.path, &target)?;
            info!(src = %record.path.display(), dest = %target.display(), %hash, "Renamed");
        }
        report.renamed += 1;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const H: &str = "6f8db599de986fab7a21625b7916589c";

    fn names(dir: &Path) -> Vec<String> {
        let mut v: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        v.sort();
        v
    }

    #[test]
    fn renames_and_is_idempotent() {
        let td = tempfile::tempdir().unwrap();
        fs::write(td.path().join("note.txt"), "test string").unwrap();

        let first = rename_files(&Config::default(), td.path()).unwrap();
        assert_eq!(first.renamed, 1);
        assert_eq!(names(td.path()), vec![format!("note.{H}.txt")]);

        let second = rename_files(&Config::default(), td.path()).unwrap();
        assert_eq!(second, RenameReport { renamed: 0, unchanged: 1, skipped: 0 });
        assert_eq!(names(td.path()), vec![format!("note.{H}.txt")]);
    }

    #[test]
    fn dry_run_leaves_names() {
        let td = tempfile::tempdir().unwrap();
        fs::write(td.path().join("note.txt"), "test string").unwrap();
        let report = rename_files(&Config::dry_run(), td.path()).unwrap();
        assert_eq!(report.renamed, 1);
        assert_eq!(names(td.path()), vec!["note.txt".to_string()]);
    }
}
