//! Streaming copy with selectable durability.
//!
//! Features:
//! - Copies from an already-open source handle at its current position (the
//!   caller hashed it first and rewound it; the file is opened only once).
//! - Writes to a newly created destination (O_EXCL semantics; never clobbers).
//! - Linux: in-kernel copy_file_range fast path, falling back to buffered I/O.
//! - Buffered I/O with large (1 MiB) buffers to reduce syscall count.
//!
//! Snapshot semantics: the source is read once to EOF; bytes appended
//! concurrently after EOF was observed are not included.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::errors::HashCopyError;

const BUF_SIZE: usize = 1024 * 1024; // 1 MiB buffers

/// Durability mode controlling post-write flush behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DurabilityMode {
    /// Ensure written data reaches the OS page cache (`flush`), but do not force
    /// a disk barrier. Fastest; may lose data on sudden power loss.
    Data,
    /// Force data and metadata to stable storage (`sync_all`).
    #[default]
    Full,
}

impl fmt::Display for DurabilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DurabilityMode::Data => "data",
            DurabilityMode::Full => "full",
        })
    }
}

impl FromStr for DurabilityMode {
    type Err = HashCopyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "data" | "flush" => Ok(DurabilityMode::Data),
            "full" | "sync" => Ok(DurabilityMode::Full),
            _ => Err(HashCopyError::InvalidDurability(s.to_string())),
        }
    }
}

/// Result of a streaming copy operation.
#[derive(Debug, Clone, Copy)]
pub struct CopyResult {
    /// Total bytes copied from source to destination.
    pub bytes: u64,
    /// Durability mode applied.
    pub mode: DurabilityMode,
}

/// Copy the rest of `src` into a new file at `dst`.
pub(super) fn copy_to_new_file(
    src: &mut File,
    dst: &Path,
    mode: DurabilityMode,
) -> io::Result<CopyResult> {
    let mut opts = OpenOptions::new();
    opts.write(true).create_new(true);

    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        if matches!(mode, DurabilityMode::Full) {
            const FILE_FLAG_WRITE_THROUGH: u32 = 0x8000_0000;
            opts.custom_flags(FILE_FLAG_WRITE_THROUGH);
        }
    }

    let dst_f = opts.open(dst)?;

    #[cfg(target_os = "linux")]
    if let Some(bytes) = try_copy_file_range(src, &dst_f)? {
        if matches!(mode, DurabilityMode::Full) {
            dst_f.sync_all()?;
        }
        return Ok(CopyResult { bytes, mode });
    }

    let mut reader = BufReader::with_capacity(BUF_SIZE, src);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;

    if matches!(mode, DurabilityMode::Full) {
        writer.get_ref().sync_all()?;
    }

    Ok(CopyResult { bytes, mode })
}

/// In-kernel copy from the current offsets of both files.
/// Ok(None) means "unsupported here, nothing written; use the buffered path".
#[cfg(target_os = "linux")]
fn try_copy_file_range(src: &File, dst: &File) -> io::Result<Option<u64>> {
    use std::os::unix::io::AsRawFd;

    const CHUNK: usize = 16 * 1024 * 1024;
    let mut total: u64 = 0;
    loop {
        // SAFETY: both descriptors are open for the duration of the call and null
        // offset pointers make the kernel use (and advance) the file positions.
        let rc = unsafe {
            libc::copy_file_range(
                src.as_raw_fd(),
                std::ptr::null_mut(),
                dst.as_raw_fd(),
                std::ptr::null_mut(),
                CHUNK,
                0,
            )
        };
        if rc > 0 {
            total += rc as u64;
            continue;
        }
        if rc == 0 {
            return Ok(Some(total));
        }
        let err = io::Error::last_os_error();
        if total == 0
            && matches!(
                err.raw_os_error(),
                Some(libc::EXDEV | libc::ENOSYS | libc::EINVAL | libc::EPERM | libc::EOPNOTSUPP)
            )
        {
            return Ok(None);
        }
        return Err(err);
    }
}
