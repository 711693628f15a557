//! Filesystem operations: directory snapshots, the two workflows, and the
//! copy/rename/touch primitives they are built from.

mod atomic;
mod copy;
mod helpers;
mod index;
mod io_copy;
mod listing;
mod rename;
mod touch;

pub use copy::{CopyReport, copy_files};
pub use io_copy::DurabilityMode;
pub use listing::{FileRecord, list_files};
pub use rename::{RenameReport, rename_files};
