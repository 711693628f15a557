//! Platform-specific helpers.
//! This module hides OS differences (Unix/Windows) behind a uniform API so
//! the rest of the codebase can remain platform-agnostic.

pub mod temp;
#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{
    fsync_dir, open_log_file_secure_append, set_dir_mode_0700, write_config_secure_new_0600,
};

#[cfg(not(unix))]
pub use windows::{
    fsync_dir, open_log_file_secure_append, set_dir_mode_0700, write_config_secure_new_0600,
};
