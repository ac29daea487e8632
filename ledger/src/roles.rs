//! Role registry: who may attest.

use crate::LedgerError;
use newsproof_types::{Identity, Role, RoleSet};
use serde::Serialize;
use std::collections::BTreeSet;

/// The owner, moderator set and oracle set, with capability queries.
///
/// The owner and the oracle set are fixed at construction. Only the owner
/// may change the moderator set.
#[derive(Clone, Debug)]
pub struct RoleRegistry {
    roles: RoleSet,
}

/// What one identity is allowed to do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoleSummary {
    pub account: Identity,
    pub is_owner: bool,
    pub is_moderator: bool,
    pub is_oracle: bool,
}

impl RoleSummary {
    /// Display label, highest role first.
    pub fn label(&self) -> &'static str {
        if self.is_owner {
            "Owner"
        } else if self.is_moderator {
            "Moderator"
        } else if self.is_oracle {
            "Oracle"
        } else {
            "User"
        }
    }
}

impl RoleRegistry {
    pub fn new(roles: RoleSet) -> Self {
        Self { roles }
    }

    pub fn owner(&self) -> &Identity {
        &self.roles.owner
    }

    pub fn moderators(&self) -> &BTreeSet<Identity> {
        &self.roles.moderators
    }

    pub fn oracles(&self) -> &BTreeSet<Identity> {
        &self.roles.oracles
    }

    /// The registry as persisted.
    pub fn role_set(&self) -> &RoleSet {
        &self.roles
    }

    pub fn is_owner(&self, identity: &Identity) -> bool {
        self.roles.owner == *identity
    }

    pub fn is_moderator(&self, identity: &Identity) -> bool {
        self.roles.moderators.contains(identity)
    }

    pub fn is_oracle(&self, identity: &Identity) -> bool {
        self.roles.oracles.contains(identity)
    }

    pub fn has_role(&self, identity: &Identity, role: Role) -> bool {
        match role {
            Role::Owner => self.is_owner(identity),
            Role::Moderator => self.is_moderator(identity),
            Role::Oracle => self.is_oracle(identity),
        }
    }

    /// Fail with [`LedgerError::Unauthorized`] unless `caller` holds `role`.
    pub fn authorize(&self, caller: &Identity, role: Role) -> Result<(), LedgerError> {
        if self.has_role(caller, role) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized {
                caller: caller.clone(),
                role,
            })
        }
    }

    pub fn summary_for(&self, identity: &Identity) -> RoleSummary {
        RoleSummary {
            account: identity.clone(),
            is_owner: self.is_owner(identity),
            is_moderator: self.is_moderator(identity),
            is_oracle: self.is_oracle(identity),
        }
    }

    /// Add or remove a moderator on behalf of `caller`, who must be the owner.
    ///
    /// Returns whether membership actually changed.
    pub fn set_moderator(
        &mut self,
        caller: &Identity,
        identity: &Identity,
        enabled: bool,
    ) -> Result<bool, LedgerError> {
        self.authorize(caller, Role::Owner)?;
        Ok(self.apply_moderator(identity, enabled))
    }

    fn apply_moderator(&mut self, identity: &Identity, enabled: bool) -> bool {
        if enabled {
            self.roles.moderators.insert(identity.clone())
        } else {
            self.roles.moderators.remove(identity)
        }
    }
}
