//! Command line front end for the newsproof ledger.
//!
//! The binary is a thin wrapper: [`config`] resolves a [`LedgerConfig`], and
//! [`commands::run`] opens the LMDB store, executes one [`Command`] and
//! returns its JSON result together with the notifications it emitted.

pub mod commands;
pub mod config;

pub use commands::{execute, run, Command, CommandOutput};
pub use config::{ConfigError, LedgerConfig};
