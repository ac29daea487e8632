//! LMDB implementation of RoleStore.

use newsproof_store::role::RoleStore;
use newsproof_store::StoreError;
use newsproof_types::{Identity, RoleSet};

use crate::{LmdbEnvironment, LmdbError};

const ROLES_KEY: &str = "roles";

impl RoleStore for LmdbEnvironment {
    fn get_roles(&self) -> Result<Option<RoleSet>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self.roles_db.get(&rtxn, ROLES_KEY).map_err(LmdbError::from)? {
            Some(bytes) => Ok(Some(bincode::deserialize(bytes).map_err(LmdbError::from)?)),
            None => Ok(None),
        }
    }

    fn init_roles(&self, roles: &RoleSet) -> Result<(), StoreError> {
        let encoded = bincode::serialize(roles).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        if self
            .roles_db
            .get(&wtxn, ROLES_KEY)
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(StoreError::Duplicate("roles already initialized".into()));
        }
        self.roles_db
            .put(&mut wtxn, ROLES_KEY, &encoded)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        tracing::info!(owner = %roles.owner, "initialized role registry");
        Ok(())
    }

    fn set_moderator(&self, identity: &Identity, enabled: bool) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let bytes = self
            .roles_db
            .get(&wtxn, ROLES_KEY)
            .map_err(LmdbError::from)?
            .ok_or_else(|| LmdbError::NotFound(ROLES_KEY.into()))?;
        let mut roles: RoleSet = bincode::deserialize(bytes).map_err(LmdbError::from)?;
        if enabled {
            roles.moderators.insert(identity.clone());
        } else {
            roles.moderators.remove(identity);
        }
        let encoded = bincode::serialize(&roles).map_err(LmdbError::from)?;
        self.roles_db
            .put(&mut wtxn, ROLES_KEY, &encoded)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
