//! Nullable store: thread-safe in-memory storage for testing.

use newsproof_store::record::RecordStore;
use newsproof_store::role::RoleStore;
use newsproof_store::StoreError;
use newsproof_types::{Identity, InformationRecord, MlScoring, RoleSet, Validation};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// An in-memory record + role store for testing.
///
/// Follows the same error contract as the LMDB backend.
pub struct NullStore {
    records: RwLock<Vec<InformationRecord>>,
    roles: RwLock<Option<RoleSet>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            roles: RwLock::new(None),
        }
    }

    /// A store whose roles are already initialized.
    pub fn with_roles(roles: RoleSet) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            roles: RwLock::new(Some(roles)),
        }
    }

    fn records(&self) -> RwLockReadGuard<'_, Vec<InformationRecord>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn records_mut(&self) -> RwLockWriteGuard<'_, Vec<InformationRecord>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }

    fn with_record<F>(&self, index: u64, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut InformationRecord) -> Result<(), StoreError>,
    {
        let mut records = self.records_mut();
        let count = records.len() as u64;
        let record = usize::try_from(index)
            .ok()
            .and_then(|i| records.get_mut(i))
            .ok_or(StoreError::IndexOutOfRange { index, count })?;
        apply(record)
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for NullStore {
    fn append_record(&self, record: &InformationRecord) -> Result<u64, StoreError> {
        let mut records = self.records_mut();
        records.push(record.clone());
        Ok(records.len() as u64 - 1)
    }

    fn get_record(&self, index: u64) -> Result<InformationRecord, StoreError> {
        let records = self.records();
        usize::try_from(index)
            .ok()
            .and_then(|i| records.get(i))
            .cloned()
            .ok_or(StoreError::IndexOutOfRange {
                index,
                count: records.len() as u64,
            })
    }

    fn record_count(&self) -> Result<u64, StoreError> {
        Ok(self.records().len() as u64)
    }

    fn put_validation(&self, index: u64, validation: &Validation) -> Result<(), StoreError> {
        self.with_record(index, |record| {
            if record.validation.is_some() {
                return Err(StoreError::Conflict(format!("record {index} already validated")));
            }
            record.validation = Some(validation.clone());
            Ok(())
        })
    }

    fn put_scoring(&self, index: u64, scoring: &MlScoring) -> Result<(), StoreError> {
        self.with_record(index, |record| {
            if record.scoring.is_some() {
                return Err(StoreError::Conflict(format!("record {index} already scored")));
            }
            record.scoring = Some(scoring.clone());
            Ok(())
        })
    }

    fn iter_records(&self) -> Result<Vec<InformationRecord>, StoreError> {
        Ok(self.records().clone())
    }
}

impl RoleStore for NullStore {
    fn get_roles(&self) -> Result<Option<RoleSet>, StoreError> {
        Ok(self.roles.read().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn init_roles(&self, roles: &RoleSet) -> Result<(), StoreError> {
        let mut slot = self.roles.write().unwrap_or_else(|e| e.into_inner());
        if slot.is_some() {
            return Err(StoreError::Duplicate("roles already initialized".into()));
        }
        *slot = Some(roles.clone());
        Ok(())
    }

    fn set_moderator(&self, identity: &Identity, enabled: bool) -> Result<(), StoreError> {
        let mut slot = self.roles.write().unwrap_or_else(|e| e.into_inner());
        let roles = slot
            .as_mut()
            .ok_or_else(|| StoreError::NotFound("roles".into()))?;
        if enabled {
            roles.moderators.insert(identity.clone());
        } else {
            roles.moderators.remove(identity);
        }
        Ok(())
    }
}
