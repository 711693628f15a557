//! Hash-aware file naming.
//!
//! Policy:
//! - The hash goes in front of the final extension: "file.ext" -> "file.<hash>.ext".
//! - No extension, or only a leading dot (".env"): the hash becomes a trailing segment.
//! - A name that already contains the hash anywhere is returned unchanged.
//!
//! Notes:
//! - The "already contains" check is plain substring containment, not a parse of
//!   a hash segment. A name that happens to embed another file's 32-hex run is
//!   therefore treated as already hashed for that content.

/// Insert `hash` before the last extension of `original`.
pub fn derive_hashed_name(original: &str, hash: &str) -> String {
    if original.contains(hash) {
        return original.to_string();
    }

    let pos = match original.rfind('.') {
        None | Some(0) => original.len(),
        Some(p) => p,
    };

    let mut out = String::with_capacity(original.len() + hash.len() + 1);
    out.push_str(&original[..pos]);
    out.push('.');
    out.push_str(hash);
    out.push_str(&original[pos..]);
    out
}
