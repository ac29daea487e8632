//! Blake2b hashing and text fingerprints.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use newsproof_types::ContentHash;

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Trim, lowercase and collapse every whitespace run to a single space.
pub fn normalize_content(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fingerprint a piece of text as it would be submitted to the ledger.
pub fn fingerprint_text(text: &str) -> ContentHash {
    ContentHash::new(blake2b_256(normalize_content(text).as_bytes()))
}
