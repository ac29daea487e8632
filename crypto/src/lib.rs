//! Content fingerprinting for the newsproof ledger.
//!
//! Submitters identify an information item by a 32-byte fingerprint of its
//! text. Text is normalized first (trimmed, lowercased, whitespace runs
//! collapsed) so trivially reformatted copies share one fingerprint.

pub mod hash;

pub use hash::{blake2b_256, fingerprint_text, normalize_content};
