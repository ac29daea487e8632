//! Abstract storage traits for the newsproof ledger.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The ledger depends only on the traits.

pub mod error;
pub mod record;
pub mod role;

pub use error::StoreError;
pub use record::RecordStore;
pub use role::RoleStore;
