use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(String),

    #[error("key not found: {0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported schema version {found} (this build understands up to {supported})")]
    SchemaTooNew { found: u32, supported: u32 },
}

impl From<heed::Error> for LmdbError {
    fn from(e: heed::Error) -> Self {
        LmdbError::Heed(e.to_string())
    }
}

impl From<bincode::Error> for LmdbError {
    fn from(e: bincode::Error) -> Self {
        LmdbError::Serialization(e.to_string())
    }
}

impl From<LmdbError> for newsproof_store::StoreError {
    fn from(e: LmdbError) -> Self {
        use newsproof_store::StoreError;
        match e {
            LmdbError::NotFound(key) => StoreError::NotFound(key),
            LmdbError::Serialization(msg) => StoreError::Serialization(msg),
            LmdbError::SchemaTooNew { .. } => StoreError::Corruption(e.to_string()),
            other => StoreError::Backend(other.to_string()),
        }
    }
}
