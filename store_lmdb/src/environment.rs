//! LMDB environment setup.

use std::path::Path;

use heed::byteorder::BigEndian;
use heed::types::{Bytes, Str, U64};
use heed::{Database, Env, EnvOpenOptions};

use crate::LmdbError;

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

const MAX_DBS: u32 = 4;

/// Wraps the LMDB environment and all database handles.
///
/// The environment is the single backing store for records, roles and
/// metadata. LMDB allows one writer at a time and gives readers a consistent
/// snapshot, so every trait method is atomic on its own.
pub struct LmdbEnvironment {
    pub(crate) env: Env,
    pub(crate) records_db: Database<U64<BigEndian>, Bytes>,
    pub(crate) roles_db: Database<Str, Bytes>,
    pub(crate) meta_db: Database<Str, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given directory.
    ///
    /// A fresh environment is stamped with [`CURRENT_SCHEMA_VERSION`]; an
    /// environment written by a newer build is refused.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process for this path and
        // never memory-mapped elsewhere while in use.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let records_db = env.create_database(&mut wtxn, Some("records"))?;
        let roles_db = env.create_database(&mut wtxn, Some("roles"))?;
        let meta_db = env.create_database(&mut wtxn, Some("meta"))?;
        wtxn.commit()?;

        let lmdb = Self {
            env,
            records_db,
            roles_db,
            meta_db,
        };
        lmdb.check_schema()?;

        tracing::info!(path = %path.display(), map_size, "opened LMDB environment");
        Ok(lmdb)
    }

    fn check_schema(&self) -> Result<(), LmdbError> {
        let found = self.read_schema_version()?;
        if found > CURRENT_SCHEMA_VERSION {
            return Err(LmdbError::SchemaTooNew {
                found,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        if found < CURRENT_SCHEMA_VERSION {
            tracing::debug!(from = found, to = CURRENT_SCHEMA_VERSION, "stamping schema version");
            self.write_schema_version(CURRENT_SCHEMA_VERSION)?;
        }
        Ok(())
    }
}
