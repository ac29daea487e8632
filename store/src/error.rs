use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("key not found: {0}")]
    NotFound(String),

    #[error("index {index} out of range (count {count})")]
    IndexOutOfRange { index: u64, count: u64 },

    #[error("duplicate key: {0}")]
    Duplicate(String),

    #[error("conflicting write: {0}")]
    Conflict(String),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("database is corrupted: {0}")]
    Corruption(String),
}
