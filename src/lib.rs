//! Core library for `copy_with_hash`.
//!
//! Files are identified by the MD5 of their content, and that hash is written
//! into their names: `photo.jpg` becomes `photo.<hash>.jpg`. Two workflows use it:
//! - rename a directory's files in place ([`rename_files`]);
//! - copy a directory into another, skipping content the destination already
//!   holds and only refreshing its modification time ([`copy_files`]).
//!
//! Both are synchronous, process one file at a time, and stop at the first error.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod hash;
pub mod mode;
pub mod naming;
pub mod output;
pub mod platform;

pub use config::{
    Config, LogLevel, default_config_path, load_config, load_config_from_xml_path,
    path_has_symlink_ancestor,
};
pub use errors::HashCopyError;
pub use fs_ops::{CopyReport, DurabilityMode, RenameReport, copy_files, rename_files};
pub use hash::{ContentHash, compute_hash, hash_file};
pub use mode::{Mode, Report, run};
pub use naming::derive_hashed_name;

/// Convenience re-exports for callers embedding the workflows.
pub mod prelude {
    pub use crate::config::{Config, LogLevel};
    pub use crate::errors::HashCopyError as Error;
    pub use crate::fs_ops::{CopyReport, DurabilityMode, RenameReport, copy_files, rename_files};
    pub use crate::hash::{ContentHash, compute_hash};
    pub use crate::mode::{Mode, Report, run};
    pub use crate::naming::derive_hashed_name;
    pub type Result<T> = anyhow::Result<T>;
}
