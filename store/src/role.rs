//! Role storage trait.

use crate::StoreError;
use newsproof_types::{Identity, RoleSet};

/// Durable home of the owner, moderator set and oracle set.
pub trait RoleStore: Send + Sync {
    /// The persisted roles, or `None` if the store was never initialized.
    fn get_roles(&self) -> Result<Option<RoleSet>, StoreError>;

    /// Persist the initial roles.
    ///
    /// Fails with [`StoreError::Duplicate`] if roles already exist; the owner
    /// is fixed once written.
    fn init_roles(&self, roles: &RoleSet) -> Result<(), StoreError>;

    /// Add (`enabled = true`) or remove a moderator.
    fn set_moderator(&self, identity: &Identity, enabled: bool) -> Result<(), StoreError>;
}
