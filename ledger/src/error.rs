use newsproof_store::StoreError;
use newsproof_types::{Identity, Role};
use thiserror::Error;

/// A rejected ledger operation. No variant leaves partial state behind.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{caller} does not hold the {role} role")]
    Unauthorized { caller: Identity, role: Role },

    #[error("content hash must not be zero")]
    InvalidHash,

    #[error("score {0} is outside the range 0..=100")]
    ScoreOutOfRange(i64),

    #[error("invalid index {index} (count {count})")]
    InvalidIndex { index: u64, count: u64 },

    #[error("record {0} is already validated")]
    AlreadyValidated(u64),

    #[error("record {0} is already scored")]
    AlreadyScored(u64),

    #[error("ledger is already initialized")]
    AlreadyInitialized,

    #[error("ledger has not been initialized")]
    NotInitialized,

    #[error("mutating call made from inside an event handler")]
    Reentrant,

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
