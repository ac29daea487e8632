//! Shared utilities for the newsproof ledger.

pub mod logging;

pub use logging::{init_logging, LogFormat};
