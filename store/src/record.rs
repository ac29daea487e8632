//! Record storage trait.

use crate::StoreError;
use newsproof_types::{InformationRecord, MlScoring, Validation};

/// Append-only, position-indexed sequence of information records.
///
/// Indices are assigned in creation order starting at 0 and are never reused.
/// There is no general update or delete: an existing record only changes by
/// moving one attestation axis from unset to set.
pub trait RecordStore: Send + Sync {
    /// Append a record and return its index (the previous count).
    fn append_record(&self, record: &InformationRecord) -> Result<u64, StoreError>;

    /// Fetch a record by index.
    ///
    /// Fails with [`StoreError::IndexOutOfRange`] when `index >= count`.
    fn get_record(&self, index: u64) -> Result<InformationRecord, StoreError>;

    /// Number of records stored.
    fn record_count(&self) -> Result<u64, StoreError>;

    /// Attach a validation to a record that has none.
    ///
    /// Fails with [`StoreError::Conflict`] if the record is already validated.
    fn put_validation(&self, index: u64, validation: &Validation) -> Result<(), StoreError>;

    /// Attach an ML scoring to a record that has none.
    ///
    /// Fails with [`StoreError::Conflict`] if the record is already scored.
    fn put_scoring(&self, index: u64, scoring: &MlScoring) -> Result<(), StoreError>;

    /// All records in creation order.
    fn iter_records(&self) -> Result<Vec<InformationRecord>, StoreError> {
        let count = self.record_count()?;
        (0..count).map(|i| self.get_record(i)).collect()
    }
}
