//! Content hashing.
//!
//! A file's identity is the MD5 digest of its full byte content, rendered as
//! 32 lowercase hex characters. MD5 is used for duplicate detection only and
//! keeps names compatible with files hashed by earlier tooling.

use md5::{Digest, Md5};
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::str::FromStr;

use crate::errors::HashCopyError;

/// Length of a rendered hash in characters.
pub const HASH_LEN: usize = 32;

const BUF_SIZE: usize = 64 * 1024;

/// 128-bit content digest as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if `s` has the exact shape of a rendered hash.
    pub fn is_hash_shaped(s: &str) -> bool {
        s.len() == HASH_LEN && s.bytes().all(is_lower_hex)
    }
}

#[inline]
pub(crate) fn is_lower_hex(b: u8) -> bool {
    b.is_ascii_digit() || (b'a'..=b'f').contains(&b)
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ContentHash {
    type Err = HashCopyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_hash_shaped(s) {
            Ok(ContentHash(s.to_string()))
        } else {
            Err(HashCopyError::InvalidHash(s.to_string()))
        }
    }
}

/// Hash `stream` from its current position to EOF, then rewind it to offset 0.
///
/// The rewind lets callers hand the same handle to a copy afterwards. The
/// stream is borrowed, never closed.
pub fn compute_hash<R: Read + Seek>(stream: &mut R) -> io::Result<ContentHash> {
    let mut hasher = Md5::new();
    let mut buffer = vec![0u8; BUF_SIZE];

    loop {
        let n = match stream.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..n]);
    }

    stream.seek(SeekFrom::Start(0))?;
    Ok(ContentHash(format!("{:x}", hasher.finalize())))
}

/// Open `path` for reading and hash its whole content.
pub fn hash_file(path: &Path) -> io::Result<ContentHash> {
    let mut file = File::open(path)?;
    compute_hash(&mut file)
}
