//! Hash lookup over a destination snapshot.
//!
//! A destination file "holds" a hash when the hash occurs anywhere in its name.
//! Every 32-character lowercase-hex window of every name is indexed, so a lookup
//! answers exactly what a linear substring scan would, in O(1). When several
//! files hold the same hash the first one in listing order wins.

use std::collections::HashMap;

use super::listing::FileRecord;
use crate::hash::{ContentHash, HASH_LEN, is_lower_hex};

#[derive(Debug, Default)]
pub struct DestinationIndex {
    records: Vec<FileRecord>,
    by_hash: HashMap<String, usize>,
}

impl DestinationIndex {
    pub fn build(records: Vec<FileRecord>) -> Self {
        let mut by_hash = HashMap::new();
        for (i, rec) in records.iter().enumerate() {
            // Lossy is safe: U+FFFD is never hex, so replacement cannot create or split a window.
            let name = rec.name.to_string_lossy();
            for window in hex_windows(&name) {
                by_hash.entry(window.to_string()).or_insert(i);
            }
        }
        Self { records, by_hash }
    }

    /// First destination file whose name contains `hash`.
    pub fn lookup(&self, hash: &ContentHash) -> Option<&FileRecord> {
        self.by_hash.get(hash.as_str()).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// All HASH_LEN-long windows inside runs of lowercase hex characters.
fn hex_windows(name: &str) -> Vec<&str> {
    let bytes = name.as_bytes();
    let mut out = Vec::new();
    let mut run_start = 0;

    for i in 0..=bytes.len() {
        if i < bytes.len() && is_lower_hex(bytes[i]) {
            continue;
        }
        // Run of hex is bytes[run_start..i]; hex bytes are ASCII so slicing is safe.
        if i - run_start >= HASH_LEN {
            for s in run_start..=(i - HASH_LEN) {
                out.push(&name[s..s + HASH_LEN]);
            }
        }
        run_start = i + 1;
    }
    out
}
