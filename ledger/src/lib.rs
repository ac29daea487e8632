//! Authorization-gated record ledger.
//!
//! Anyone may submit a claim about an information item; only privileged
//! roles may attest to it. The ledger is a single authoritative state
//! machine made of four parts:
//!
//! - [`RoleRegistry`]: the fixed owner, the owner-managed moderator set and
//!   the fixed oracle set.
//! - A [`RecordStore`](newsproof_store::RecordStore): append-only records
//!   indexed by creation order.
//! - [`Ledger`]: validates inputs, checks roles, applies the monotonic
//!   field transitions and publishes notifications.
//! - [`EventNotifier`]: synchronous fan-out to subscribed observers.

pub mod error;
pub mod events;
pub mod genesis;
pub mod ledger;
pub mod roles;

pub use error::LedgerError;
pub use events::{EventKind, EventNotifier, LedgerEvent, NotifierError, Subscription};
pub use genesis::GenesisConfig;
pub use ledger::{Ledger, LedgerSummary};
pub use roles::{RoleRegistry, RoleSummary};
