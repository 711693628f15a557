//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Directories are positional; their count picks the mode (see `mode`).
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};
use crate::fs_ops::DurabilityMode;
use crate::mode::Mode;

/// Rename files to include their content hash, or copy them to another
/// directory under hashed names, skipping content already there.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Copy or rename files so each name carries its content hash"
)]
pub struct Args {
    /// FROM_DIR renames in place; FROM_DIR TO_DIR copies into TO_DIR.
    #[arg(value_name = "DIRECTORY", value_hint = ValueHint::DirPath)]
    pub paths: Vec<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, value_hint = ValueHint::FilePath, help = "Also write logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Dry-run: hash and decide, but do not modify the filesystem.
    #[arg(
        long,
        help = "Show what would be done, but do not rename, copy or touch files"
    )]
    pub dry_run: bool,

    /// Durability of each copy: full (fsync) or data (flush only).
    #[arg(long, value_parser = parse_durability, help = "Copy durability: full (fsync) or data (flush only)")]
    pub durability: Option<DurabilityMode>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where the config file is looked up, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,

    /// Write a template config file at the default location, then exit.
    #[arg(long, help = "Write a template config file and exit")]
    pub init_config: bool,
}

fn parse_durability(s: &str) -> Result<DurabilityMode, String> {
    s.parse().map_err(|e: crate::errors::HashCopyError| e.to_string())
}

impl Args {
    /// Directories after stripping stray shell quoting.
    pub fn resolved_paths(&self) -> Vec<PathBuf> {
        self.paths.iter().map(|p| Self::sanitize_path(p)).collect()
    }

    /// Mode selected by the number of directories, or None for a usage error.
    pub fn mode(&self) -> Option<Mode> {
        Mode::from_paths(&self.resolved_paths())
    }

    #[inline]
    fn sanitize_path(p: &std::path::Path) -> PathBuf {
        Self::sanitize_str(&p.to_string_lossy())
    }

    #[inline]
    fn sanitize_str(s: &str) -> PathBuf {
        // Trim surrounding quotes left by PowerShell/CMD, or an unmatched one from an escaping slip.
        let trimmed = s.trim();
        let mut inner = if trimmed.len() >= 2
            && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
                || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
        {
            trimmed[1..trimmed.len() - 1].to_string()
        } else {
            trimmed.trim_matches(|c| c == '\'' || c == '"').to_string()
        };

        // PowerShell tends to leave a trailing backslash inside quotes; drop one separator,
        // but never reduce a root like "/" to nothing.
        if (inner.ends_with('\\') || inner.ends_with('/')) && inner.len() > 1 {
            inner.pop();
        }

        PathBuf::from(inner)
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if let Some(d) = self.durability {
            cfg.durability = d;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
