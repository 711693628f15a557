//! Unique hidden temporary names for write-then-rename operations.
//! Pattern: .copy_with_hash.<tag>.<pid>.<nanos>.<seq>.tmp
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix shared by every temp file this tool creates.
pub const TEMP_PREFIX: &str = ".copy_with_hash.";

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temp path inside `dir`, unique within this process and very likely across processes.
pub fn tmp_name_in(dir: &Path, tag: &str) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    dir.join(format!("{TEMP_PREFIX}{tag}.{pid}.{nanos}.{seq}.tmp"))
}

/// Temp sibling of `target` (same directory, so a rename stays on one filesystem).
pub fn tmp_sibling_name(target: &Path, tag: &str) -> PathBuf {
    tmp_name_in(target.parent().unwrap_or_else(|| Path::new(".")), tag)
}

/// True for names produced by [`tmp_name_in`].
pub fn is_temp_name(name: &str) -> bool {
    name.starts_with(TEMP_PREFIX) && name.ends_with(".tmp")
}
