//! Default path helpers and symlink checks.
//! Determines the config file location (env override or OS default) and detects
//! symlinked ancestors before anything is written next to them.

use anyhow::{Result, anyhow};
use dirs::config_dir;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{APP_DIR_NAME, CONFIG_ENV_VAR, CONFIG_FILE_NAME};

/// Explicit config path from the environment, if set and non-empty.
pub fn config_path_override() -> Option<PathBuf> {
    env::var_os(CONFIG_ENV_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Config path: `$COPY_WITH_HASH_CONFIG` if set, else the OS config dir.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = config_path_override() {
        return Ok(p);
    }
    if let Some(mut base) = config_dir() {
        base.push(APP_DIR_NAME);
        base.push(CONFIG_FILE_NAME);
        return Ok(base);
    }
    env::var_os("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join(APP_DIR_NAME)
                .join(CONFIG_FILE_NAME)
        })
        .ok_or_else(|| anyhow!("cannot determine a config directory (no config dir and no HOME)"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
