//! Genesis configuration: the roles a fresh ledger starts with.
//!
//! The owner named here is fixed for the lifetime of the ledger, and so is
//! the oracle set. Moderators can later be added or removed by the owner.

use newsproof_types::{Identity, RoleSet};
use serde::{Deserialize, Serialize};

/// Initial role assignment for a new ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    pub owner: Identity,
    #[serde(default)]
    pub moderators: Vec<Identity>,
    #[serde(default)]
    pub oracles: Vec<Identity>,
}

impl GenesisConfig {
    pub fn new(owner: Identity) -> Self {
        Self {
            owner,
            moderators: Vec::new(),
            oracles: Vec::new(),
        }
    }

    pub fn with_moderator(mut self, moderator: Identity) -> Self {
        self.moderators.push(moderator);
        self
    }

    pub fn with_oracle(mut self, oracle: Identity) -> Self {
        self.oracles.push(oracle);
        self
    }

    /// The role layout to persist. Duplicates collapse.
    pub fn role_set(&self) -> RoleSet {
        RoleSet {
            owner: self.owner.clone(),
            moderators: self.moderators.iter().cloned().collect(),
            oracles: self.oracles.iter().cloned().collect(),
        }
    }
}
