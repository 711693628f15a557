//! Typed error definitions for copy_with_hash.
//! Provides a small set of well-known failure modes for better logs and tests.
//! Everything else travels as `anyhow::Error` with path context attached.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashCopyError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Source and destination resolve to the same directory: {0}")]
    SameDirectory(PathBuf),

    #[error("Cannot rename {from} -> {to}: target name already exists")]
    NameCollision { from: PathBuf, to: PathBuf },

    #[error("Invalid content hash '{0}': expected 32 lowercase hex characters")]
    InvalidHash(String),

    #[error("Invalid durability mode '{0}': expected 'data' or 'full'")]
    InvalidDurability(String),
}

impl HashCopyError {
    /// Stable numeric code for log fields and scripts.
    pub fn code(&self) -> u16 {
        match self {
            HashCopyError::DirectoryNotFound(_) => 10,
            HashCopyError::NotADirectory(_) => 11,
            HashCopyError::SameDirectory(_) => 12,
            HashCopyError::NameCollision { .. } => 20,
            HashCopyError::InvalidHash(_) => 30,
            HashCopyError::InvalidDurability(_) => 31,
        }
    }

    /// Short machine-friendly kind, used as the `kind` field in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            HashCopyError::DirectoryNotFound(_) => "directory_not_found",
            HashCopyError::NotADirectory(_) => "not_a_directory",
            HashCopyError::SameDirectory(_) => "same_directory",
            HashCopyError::NameCollision { .. } => "name_collision",
            HashCopyError::InvalidHash(_) => "invalid_hash",
            HashCopyError::InvalidDurability(_) => "invalid_durability",
        }
    }
}
