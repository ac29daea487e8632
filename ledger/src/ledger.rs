//! The ledger service: role-gated, monotonic state transitions.
//!
//! Per record the state starts Unvalidated+Unscored. Validation and scoring
//! are independent axes; each moves from unset to set at most once. Every
//! mutating call runs under one writer lock covering check, write and
//! notification, so calls never interleave and a rejected call changes
//! nothing and publishes nothing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, ThreadId};

use newsproof_store::{RecordStore, RoleStore, StoreError};
use newsproof_types::{
    Clock, ContentHash, Identity, InformationRecord, MlScoring, ReliabilityScore, Role, RoleSet,
    Validation,
};
use serde::Serialize;

use crate::events::{EventNotifier, LedgerEvent};
use crate::genesis::GenesisConfig;
use crate::roles::{RoleRegistry, RoleSummary};
use crate::LedgerError;

/// The authoritative ledger over a storage backend `S`.
pub struct Ledger<S> {
    store: S,
    roles: RwLock<RoleRegistry>,
    notifier: EventNotifier,
    clock: Arc<dyn Clock>,
    writer: Mutex<()>,
    writer_thread: Mutex<Option<ThreadId>>,
}

/// Held for the duration of one mutating call.
struct WriterGuard<'a> {
    _gate: MutexGuard<'a, ()>,
    holder: &'a Mutex<Option<ThreadId>>,
}

impl Drop for WriterGuard<'_> {
    fn drop(&mut self) {
        *self.holder.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Summary statistics for the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub records: u64,
    pub validated: u64,
    pub scored: u64,
    pub moderators: u64,
    pub oracles: u64,
}

impl<S: RecordStore + RoleStore> Ledger<S> {
    /// Initialize a fresh store with the genesis roles.
    ///
    /// Fails with [`LedgerError::AlreadyInitialized`] if the store already
    /// holds roles.
    pub fn create(
        store: S,
        genesis: &GenesisConfig,
        notifier: EventNotifier,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, LedgerError> {
        if store.get_roles()?.is_some() {
            return Err(LedgerError::AlreadyInitialized);
        }
        let roles = genesis.role_set();
        store.init_roles(&roles)?;
        tracing::info!(
            owner = %roles.owner,
            moderators = roles.moderators.len(),
            oracles = roles.oracles.len(),
            "created ledger"
        );
        Ok(Self::assemble(store, roles, notifier, clock))
    }

    /// Reopen a previously initialized store.
    pub fn load(
        store: S,
        notifier: EventNotifier,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, LedgerError> {
        let roles = store.get_roles()?.ok_or(LedgerError::NotInitialized)?;
        tracing::info!(
            owner = %roles.owner,
            records = store.record_count()?,
            "loaded ledger"
        );
        Ok(Self::assemble(store, roles, notifier, clock))
    }

    /// Load the store if initialized, otherwise create it from `genesis`.
    ///
    /// Persisted roles always win over `genesis` for an existing store.
    pub fn open(
        store: S,
        genesis: &GenesisConfig,
        notifier: EventNotifier,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, LedgerError> {
        match store.get_roles()? {
            Some(roles) => {
                if roles.owner != genesis.owner {
                    tracing::warn!(
                        stored = %roles.owner,
                        configured = %genesis.owner,
                        "configured owner differs from the persisted owner; keeping persisted"
                    );
                }
                Self::load(store, notifier, clock)
            }
            None => Self::create(store, genesis, notifier, clock),
        }
    }

    fn assemble(
        store: S,
        roles: RoleSet,
        notifier: EventNotifier,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            roles: RwLock::new(RoleRegistry::new(roles)),
            notifier,
            clock,
            writer: Mutex::new(()),
            writer_thread: Mutex::new(None),
        }
    }

    pub fn notifier(&self) -> &EventNotifier {
        &self.notifier
    }

    // ── Mutating operations ─────────────────────────────────────────────

    /// Register a claim. Open to every identity.
    pub fn submit(
        &self,
        caller: &Identity,
        content_hash: ContentHash,
        source: &str,
        score: i64,
    ) -> Result<u64, LedgerError> {
        let _writer = self.lock_writer()?;
        if content_hash.is_zero() {
            tracing::debug!(%caller, "rejected submission with zero content hash");
            return Err(LedgerError::InvalidHash);
        }
        let reliability_score =
            ReliabilityScore::new(score).map_err(|_| LedgerError::ScoreOutOfRange(score))?;

        let record = InformationRecord::new(
            content_hash,
            source,
            reliability_score,
            caller.clone(),
            self.clock.now(),
        );
        let index = self.store.append_record(&record)?;
        tracing::info!(index, author = %caller, %content_hash, score, "information submitted");

        self.notifier.publish(&LedgerEvent::InformationSubmitted {
            index,
            author: caller.clone(),
            content_hash,
            source: record.source,
            reliability_score,
        });
        Ok(index)
    }

    /// Validate a record with no role restriction.
    ///
    /// This open path is part of the trust model ("anyone may co-sign"):
    /// observers read `validator` to decide whose attestation they accept.
    /// Use [`Ledger::moderator_validate`] for a role-gated attestation.
    pub fn validate(&self, caller: &Identity, index: u64) -> Result<(), LedgerError> {
        let _writer = self.lock_writer()?;
        self.apply_validation(caller, index)
    }

    /// Validate a record as a moderator.
    pub fn moderator_validate(&self, caller: &Identity, index: u64) -> Result<(), LedgerError> {
        let _writer = self.lock_writer()?;
        self.authorize(caller, Role::Moderator)?;
        self.apply_validation(caller, index)
    }

    /// Attach an ML score and label to a record. Oracles only.
    pub fn set_ml_result(
        &self,
        caller: &Identity,
        index: u64,
        score: i64,
        label: bool,
        model_version: &str,
    ) -> Result<(), LedgerError> {
        let _writer = self.lock_writer()?;
        self.authorize(caller, Role::Oracle)?;
        let record = self.existing_record(index)?;
        let score = ReliabilityScore::new(score)
            .map_err(|_| LedgerError::ScoreOutOfRange(score))?
            .value();
        if record.is_scored() {
            tracing::debug!(index, oracle = %caller, "rejected re-scoring");
            return Err(LedgerError::AlreadyScored(index));
        }

        let scoring = MlScoring {
            score,
            label,
            model_version: model_version.to_string(),
            oracle: caller.clone(),
            scored_at: self.clock.now(),
        };
        self.store
            .put_scoring(index, &scoring)
            .map_err(|e| Self::conflict_as(e, LedgerError::AlreadyScored(index)))?;
        tracing::info!(index, oracle = %caller, score, label, model_version, "information scored");

        self.notifier.publish(&LedgerEvent::InformationScored {
            index,
            score,
            label,
            model_version: scoring.model_version,
            oracle: caller.clone(),
        });
        Ok(())
    }

    /// Add or remove a moderator. Owner only.
    pub fn set_moderator(
        &self,
        caller: &Identity,
        identity: &Identity,
        enabled: bool,
    ) -> Result<(), LedgerError> {
        let _writer = self.lock_writer()?;
        self.authorize(caller, Role::Owner)?;
        self.store.set_moderator(identity, enabled)?;
        let changed = self.registry_mut().set_moderator(caller, identity, enabled)?;
        tracing::info!(moderator = %identity, enabled, changed, "moderator updated");

        self.notifier.publish(&LedgerEvent::ModeratorUpdated {
            moderator: identity.clone(),
            enabled,
        });
        Ok(())
    }

    // ── Read operations ─────────────────────────────────────────────────

    /// Fetch a record by index.
    pub fn get(&self, index: u64) -> Result<InformationRecord, LedgerError> {
        self.store.get_record(index).map_err(|e| match e {
            StoreError::IndexOutOfRange { index, count } => {
                LedgerError::InvalidIndex { index, count }
            }
            other => LedgerError::Storage(other),
        })
    }

    pub fn count(&self) -> Result<u64, LedgerError> {
        Ok(self.store.record_count()?)
    }

    /// Every record with its index, in creation order.
    pub fn list(&self) -> Result<Vec<(u64, InformationRecord)>, LedgerError> {
        Ok((0u64..).zip(self.store.iter_records()?).collect())
    }

    pub fn is_owner(&self, identity: &Identity) -> bool {
        self.registry().is_owner(identity)
    }

    pub fn is_moderator(&self, identity: &Identity) -> bool {
        self.registry().is_moderator(identity)
    }

    pub fn is_oracle(&self, identity: &Identity) -> bool {
        self.registry().is_oracle(identity)
    }

    pub fn owner(&self) -> Identity {
        self.registry().owner().clone()
    }

    pub fn role_of(&self, identity: &Identity) -> RoleSummary {
        self.registry().summary_for(identity)
    }

    /// A consistent copy of the current roles.
    pub fn roles(&self) -> RoleSet {
        self.registry().role_set().clone()
    }

    pub fn summary(&self) -> Result<LedgerSummary, LedgerError> {
        let records = self.store.iter_records()?;
        let registry = self.registry();
        Ok(LedgerSummary {
            records: records.len() as u64,
            validated: records.iter().filter(|r| r.validated()).count() as u64,
            scored: records.iter().filter(|r| r.is_scored()).count() as u64,
            moderators: registry.moderators().len() as u64,
            oracles: registry.oracles().len() as u64,
        })
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn authorize(&self, caller: &Identity, role: Role) -> Result<(), LedgerError> {
        self.registry().authorize(caller, role).map_err(|e| {
            tracing::debug!(%caller, %role, "unauthorized");
            e
        })
    }

    fn existing_record(&self, index: u64) -> Result<InformationRecord, LedgerError> {
        let count = self.store.record_count()?;
        if index >= count {
            tracing::debug!(index, count, "rejected out-of-range index");
            return Err(LedgerError::InvalidIndex { index, count });
        }
        self.get(index)
    }

    /// Shared by both validation entry points; the writer lock is held.
    fn apply_validation(&self, caller: &Identity, index: u64) -> Result<(), LedgerError> {
        let record = self.existing_record(index)?;
        if record.validated() {
            tracing::debug!(index, validator = %caller, "rejected re-validation");
            return Err(LedgerError::AlreadyValidated(index));
        }

        let validation = Validation {
            validator: caller.clone(),
            validated_at: self.clock.now(),
        };
        self.store
            .put_validation(index, &validation)
            .map_err(|e| Self::conflict_as(e, LedgerError::AlreadyValidated(index)))?;
        tracing::info!(index, validator = %caller, "information validated");

        self.notifier.publish(&LedgerEvent::InformationValidated {
            index,
            validator: caller.clone(),
        });
        Ok(())
    }

    fn conflict_as(e: StoreError, conflict: LedgerError) -> LedgerError {
        match e {
            StoreError::Conflict(_) => conflict,
            other => LedgerError::Storage(other),
        }
    }

    /// Acquire the writer gate, refusing a nested call from the thread that
    /// already holds it (an event handler calling back into the ledger).
    fn lock_writer(&self) -> Result<WriterGuard<'_>, LedgerError> {
        let current = thread::current().id();
        if *self.holder() == Some(current) {
            tracing::debug!("rejected re-entrant mutation from an event handler");
            return Err(LedgerError::Reentrant);
        }
        let gate = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        *self.holder() = Some(current);
        Ok(WriterGuard {
            _gate: gate,
            holder: &self.writer_thread,
        })
    }

    fn holder(&self) -> MutexGuard<'_, Option<ThreadId>> {
        self.writer_thread
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn registry(&self) -> RwLockReadGuard<'_, RoleRegistry> {
        self.roles.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn registry_mut(&self) -> RwLockWriteGuard<'_, RoleRegistry> {
        self.roles.write().unwrap_or_else(PoisonError::into_inner)
    }
}
