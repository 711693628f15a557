//! Argument-count dispatch.
//! One directory renames in place; two directories copy from the first into the
//! second. Anything else is a usage error handled by the caller.

use anyhow::Result;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

use crate::config::{Config, ensure_destination_dir, ensure_source_dir};
use crate::fs_ops::{CopyReport, RenameReport, copy_files, rename_files};

/// Usage line printed for a wrong number of directories.
pub const USAGE: &str = "Usage: copy_with_hash <fromDirectory> [toDirectory]";

/// Exit status for usage errors (same as clap's own usage errors).
pub const USAGE_EXIT_CODE: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Rename files of `dir` in place.
    Rename { dir: PathBuf },
    /// Copy files of `from` into `to`.
    Copy { from: PathBuf, to: PathBuf },
}

impl Mode {
    /// Pick the mode from the number of directory arguments.
    pub fn from_paths(paths: &[PathBuf]) -> Option<Self> {
        match paths {
            [dir] => Some(Mode::Rename { dir: dir.clone() }),
            [from, to] => Some(Mode::Copy {
                from: from.clone(),
                to: to.clone(),
            }),
            _ => None,
        }
    }
}

/// Outcome of a dispatched run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Rename(RenameReport),
    Copy(CopyReport),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Rename(r) => r.fmt(f),
            Report::Copy(r) => r.fmt(f),
        }
    }
}

/// Validate the directories for `mode`, then run the matching workflow.
pub fn run(config: &Config, mode: &Mode) -> Result<Report> {
    debug!(?mode, dry_run = config.dry_run, "dispatch");
    match mode {
        Mode::Rename { dir } => {
            ensure_source_dir(dir)?;
            rename_files(config, dir).map(Report::Rename)
        }
        Mode::Copy { from, to } => {
            ensure_source_dir(from)?;
            ensure_destination_dir(from, to, config.dry_run)?;
            copy_files(config, from, to).map(Report::Copy)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_selects_mode() {
        let a = PathBuf::from("a");
        let b = PathBuf::from("b");
        assert_eq!(Mode::from_paths(&[]), None);
        assert_eq!(Mode::from_paths(&[a.clone()]), Some(Mode::Rename { dir: a.clone() }));
        assert_eq!(
            Mode::from_paths(&[a.clone(), b.clone()]),
            Some(Mode::Copy { from: a.clone(), to: b.clone() })
        );
        assert_eq!(Mode::from_paths(&[a.clone(), b, a]), None);
    }
}
