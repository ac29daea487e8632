//! Roles and the persisted role layout.

use crate::Identity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A named capability an identity may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Owner,
    Moderator,
    Oracle,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Moderator => "moderator",
            Role::Oracle => "oracle",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owner, moderator set and oracle set, as persisted.
///
/// Membership is independent: the owner is not implicitly a moderator or an
/// oracle, and one identity may sit in both sets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet {
    pub owner: Identity,
    pub moderators: BTreeSet<Identity>,
    pub oracles: BTreeSet<Identity>,
}

impl RoleSet {
    pub fn new(owner: Identity) -> Self {
        Self {
            owner,
            moderators: BTreeSet::new(),
            oracles: BTreeSet::new(),
        }
    }
}
