//! LMDB storage backend for the newsproof ledger.
//!
//! Implements all storage traits from `newsproof-store` using the `heed` LMDB
//! bindings. Each logical store maps to one named LMDB database within a
//! single environment:
//!
//! - `records`: big-endian `u64` index -> bincode [`InformationRecord`]
//! - `roles`: the single key `roles` -> bincode [`RoleSet`]
//! - `meta`: string key -> raw bytes (schema version)
//!
//! [`InformationRecord`]: newsproof_types::InformationRecord
//! [`RoleSet`]: newsproof_types::RoleSet

pub mod environment;
pub mod error;
pub mod meta;
pub mod record;
pub mod role;

pub use environment::{LmdbEnvironment, CURRENT_SCHEMA_VERSION};
pub use error::LmdbError;
