//! LMDB implementation of RecordStore.

use heed::RwTxn;

use newsproof_store::record::RecordStore;
use newsproof_store::StoreError;
use newsproof_types::{InformationRecord, MlScoring, Validation};

use crate::{LmdbEnvironment, LmdbError};

impl LmdbEnvironment {
    /// Read, modify and rewrite one record inside an open write transaction.
    fn update_record<F>(&self, wtxn: &mut RwTxn<'_>, index: u64, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut InformationRecord) -> Result<(), StoreError>,
    {
        let count = self.records_db.len(wtxn).map_err(LmdbError::from)?;
        let bytes = self
            .records_db
            .get(wtxn, &index)
            .map_err(LmdbError::from)?
            .ok_or(StoreError::IndexOutOfRange { index, count })?;
        let mut record: InformationRecord =
            bincode::deserialize(bytes).map_err(LmdbError::from)?;
        apply(&mut record)?;
        let encoded = bincode::serialize(&record).map_err(LmdbError::from)?;
        self.records_db
            .put(wtxn, &index, &encoded)
            .map_err(LmdbError::from)?;
        Ok(())
    }
}

impl RecordStore for LmdbEnvironment {
    fn append_record(&self, record: &InformationRecord) -> Result<u64, StoreError> {
        let encoded = bincode::serialize(record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let index = self.records_db.len(&wtxn).map_err(LmdbError::from)?;
        self.records_db
            .put(&mut wtxn, &index, &encoded)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        tracing::debug!(index, "appended record");
        Ok(index)
    }

    fn get_record(&self, index: u64) -> Result<InformationRecord, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self.records_db.get(&rtxn, &index).map_err(LmdbError::from)? {
            Some(bytes) => Ok(bincode::deserialize(bytes).map_err(LmdbError::from)?),
            None => {
                let count = self.records_db.len(&rtxn).map_err(LmdbError::from)?;
                Err(StoreError::IndexOutOfRange { index, count })
            }
        }
    }

    fn record_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.records_db.len(&rtxn).map_err(LmdbError::from)?)
    }

    fn put_validation(&self, index: u64, validation: &Validation) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.update_record(&mut wtxn, index, |record| {
            if record.validation.is_some() {
                return Err(StoreError::Conflict(format!("record {index} already validated")));
            }
            record.validation = Some(validation.clone());
            Ok(())
        })?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn put_scoring(&self, index: u64, scoring: &MlScoring) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.update_record(&mut wtxn, index, |record| {
            if record.scoring.is_some() {
                return Err(StoreError::Conflict(format!("record {index} already scored")));
            }
            record.scoring = Some(scoring.clone());
            Ok(())
        })?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn iter_records(&self) -> Result<Vec<InformationRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let mut records = Vec::new();
        for entry in self.records_db.iter(&rtxn).map_err(LmdbError::from)? {
            let (_, bytes) = entry.map_err(LmdbError::from)?;
            records.push(bincode::deserialize(bytes).map_err(LmdbError::from)?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsproof_types::{ContentHash, Identity, ReliabilityScore, Timestamp};

    fn temp_env() -> (tempfile::TempDir, LmdbEnvironment) {
        let dir = tempfile::tempdir().expect("temp dir");
        let env = LmdbEnvironment::open(dir.path(), 16 * 1024 * 1024).expect("open env");
        (dir, env)
    }

    fn record(seed: u8) -> InformationRecord {
        InformationRecord::new(
            ContentHash::new([seed; 32]),
            format!("https://source-{seed}.com"),
            ReliabilityScore::new(i64::from(seed % 101)).unwrap(),
            Identity::parse("user1").unwrap(),
            Timestamp::new(1_000 + u64::from(seed)),
        )
    }

    #[test]
    fn append_assigns_contiguous_indices() {
        let (_dir, env) = temp_env();
        assert_eq!(env.record_count().unwrap(), 0);
        for i in 0..5u8 {
            assert_eq!(env.append_record(&record(i + 1)).unwrap(), u64::from(i));
        }
        assert_eq!(env.record_count().unwrap(), 5);
        assert_eq!(env.get_record(3).unwrap(), record(4));
    }

    #[test]
    fn get_past_end_is_out_of_range() {
        let (_dir, env) = temp_env();
        env.append_record(&record(1)).unwrap();
        assert!(matches!(
            env.get_record(1),
            Err(StoreError::IndexOutOfRange { index: 1, count: 1 })
        ));
    }

    #[test]
    fn validation_is_written_once() {
        let (_dir, env) = temp_env();
        env.append_record(&record(1)).unwrap();
        let v = Validation {
            validator: Identity::parse("mod").unwrap(),
            validated_at: Timestamp::new(5),
        };
        env.put_validation(0, &v).unwrap();
        assert_eq!(env.get_record(0).unwrap().validation, Some(v.clone()));
        assert!(matches!(
            env.put_validation(0, &v),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn scoring_out_of_range_index() {
        let (_dir, env) = temp_env();
        let s = MlScoring {
            score: 80,
            label: true,
            model_version: "v1".into(),
            oracle: Identity::parse("oracle").unwrap(),
            scored_at: Timestamp::new(5),
        };
        assert!(matches!(
            env.put_scoring(0, &s),
            Err(StoreError::IndexOutOfRange { index: 0, count: 0 })
        ));
    }

    #[test]
    fn iter_records_in_creation_order() {
        let (_dir, env) = temp_env();
        for i in 1..=3u8 {
            env.append_record(&record(i)).unwrap();
        }
        let all = env.iter_records().unwrap();
        assert_eq!(all, vec![record(1), record(2), record(3)]);
    }
}
