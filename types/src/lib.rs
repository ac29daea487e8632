//! Fundamental types for the newsproof ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! caller identities, content fingerprints, reliability scores, timestamps,
//! information records and the role layout.

pub mod error;
pub mod hash;
pub mod identity;
pub mod record;
pub mod role;
pub mod score;
pub mod time;

pub use error::TypesError;
pub use hash::ContentHash;
pub use identity::Identity;
pub use record::{InformationRecord, MlScoring, Validation};
pub use role::{Role, RoleSet};
pub use score::ReliabilityScore;
pub use time::{Clock, SystemClock, Timestamp};
