//! Parse and range errors for the fundamental types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("identity must not be empty")]
    EmptyIdentity,

    #[error("invalid content hash: {0}")]
    InvalidHash(String),

    #[error("score {0} is outside the range 0..=100")]
    ScoreOutOfRange(i64),
}
