//! Subcommands and their execution against a persisted ledger.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{anyhow, bail, Context};
use clap::{ArgAction, Subcommand};
use newsproof_crypto::fingerprint_text;
use newsproof_ledger::{EventNotifier, GenesisConfig, Ledger, LedgerEvent, Subscription};
use newsproof_store::{RecordStore, RoleStore};
use newsproof_store_lmdb::LmdbEnvironment;
use newsproof_types::{ContentHash, Identity, InformationRecord, ReliabilityScore, SystemClock};
use serde::Serialize;
use serde_json::{json, Value};

use crate::LedgerConfig;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Initialize a new ledger with its genesis roles.
    ///
    /// Roles given as flags take precedence over the `[genesis]` config table.
    Init {
        /// Owner identity.
        #[arg(long)]
        owner: Option<String>,
        /// Initial moderator (repeatable).
        #[arg(long = "moderator")]
        moderators: Vec<String>,
        /// Oracle identity (repeatable).
        #[arg(long = "oracle")]
        oracles: Vec<String>,
    },
    /// Submit a claim about an information item.
    Submit {
        /// Content hash (64 hex digits, optional 0x prefix).
        #[arg(long, conflicts_with = "text", required_unless_present = "text")]
        hash: Option<String>,
        /// Fingerprint this text instead of passing a hash.
        #[arg(long)]
        text: Option<String>,
        /// Where the item was found.
        #[arg(long, default_value = "")]
        source: String,
        /// Submitter's reliability estimate, 0 to 100.
        #[arg(long, allow_negative_numbers = true)]
        score: i64,
        /// Clamp the score into 0..=100 instead of rejecting it.
        #[arg(long)]
        clamp: bool,
    },
    /// Validate a record (open to everyone).
    Validate { index: u64 },
    /// Validate a record as a moderator.
    ModeratorValidate { index: u64 },
    /// Attach an ML result to a record (oracles only).
    Score {
        index: u64,
        #[arg(long, allow_negative_numbers = true)]
        score: i64,
        /// Classifier verdict.
        #[arg(long, action = ArgAction::Set)]
        label: bool,
        #[arg(long)]
        model_version: String,
    },
    /// Add or remove a moderator (owner only).
    SetModerator {
        identity: String,
        #[arg(long, action = ArgAction::Set, default_value_t = true)]
        enabled: bool,
    },
    /// Show one record.
    Show { index: u64 },
    /// List every record.
    List {
        #[arg(long)]
        newest_first: bool,
    },
    /// Number of records.
    Count,
    /// Roles held by an identity (defaults to the acting identity).
    Role { identity: Option<String> },
    /// Record and role counts.
    Summary,
}

/// Result of one command plus the notifications it produced.
#[derive(Debug, Serialize)]
pub struct CommandOutput {
    pub result: Value,
    pub events: Vec<LedgerEvent>,
}

#[derive(Serialize)]
struct IndexedRecord<'a> {
    index: u64,
    #[serde(flatten)]
    record: &'a InformationRecord,
}

/// Collects every event published while it is attached.
struct EventLog {
    events: Arc<Mutex<Vec<LedgerEvent>>>,
    subscriptions: Vec<Subscription>,
}

impl EventLog {
    fn attach(notifier: &EventNotifier) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let subscriptions = notifier.subscribe_all(move |event: &LedgerEvent| {
            tracing::info!(event = %event.kind(), payload = %event.to_json(), "ledger event");
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event.clone());
        });
        Self {
            events,
            subscriptions,
        }
    }

    fn finish(self) -> Vec<LedgerEvent> {
        for subscription in &self.subscriptions {
            subscription.unsubscribe();
        }
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *events)
    }
}

/// Open the store described by `config` and execute `command` as `caller`.
pub fn run(
    config: &LedgerConfig,
    caller: Option<&str>,
    command: &Command,
) -> anyhow::Result<CommandOutput> {
    let env = LmdbEnvironment::open(&config.data_dir, config.map_size_bytes()?)
        .with_context(|| format!("opening ledger at {}", config.data_dir.display()))?;
    let notifier = EventNotifier::new();
    let log = EventLog::attach(&notifier);
    let clock = Arc::new(SystemClock);

    let result = match command {
        Command::Init {
            owner,
            moderators,
            oracles,
        } => {
            let genesis = resolve_genesis(config, owner.as_deref(), moderators, oracles)?;
            let ledger = Ledger::create(env, &genesis, notifier, clock)?;
            json!({
                "owner": ledger.owner(),
                "roles": ledger.roles(),
                "data_dir": config.data_dir.display().to_string(),
            })
        }
        other => {
            let ledger = match &config.genesis {
                Some(genesis) => Ledger::open(env, genesis, notifier, clock)?,
                None => Ledger::load(env, notifier, clock)
                    .context("ledger is not initialized; run `newsproof init` first")?,
            };
            let caller = caller.map(Identity::parse).transpose()?;
            execute(&ledger, caller.as_ref(), other)?
        }
    };

    Ok(CommandOutput {
        result,
        events: log.finish(),
    })
}

fn resolve_genesis(
    config: &LedgerConfig,
    owner: Option<&str>,
    moderators: &[String],
    oracles: &[String],
) -> anyhow::Result<GenesisConfig> {
    let Some(owner) = owner else {
        return config
            .genesis
            .clone()
            .ok_or_else(|| anyhow!("no owner given: pass --owner or add a [genesis] table"));
    };
    let mut genesis = GenesisConfig::new(Identity::parse(owner)?);
    for moderator in moderators {
        genesis = genesis.with_moderator(Identity::parse(moderator)?);
    }
    for oracle in oracles {
        genesis = genesis.with_oracle(Identity::parse(oracle)?);
    }
    Ok(genesis)
}

fn require(caller: Option<&Identity>) -> anyhow::Result<&Identity> {
    caller.ok_or_else(|| anyhow!("this command needs an acting identity (--as)"))
}

/// Execute a non-init command against an open ledger.
pub fn execute<S: RecordStore + RoleStore>(
    ledger: &Ledger<S>,
    caller: Option<&Identity>,
    command: &Command,
) -> anyhow::Result<Value> {
    let value = match command {
        Command::Init { .. } => bail!("ledger is already open"),
        Command::Submit {
            hash,
            text,
            source,
            score,
            clamp,
        } => {
            let content_hash = match (hash, text) {
                (Some(hash), _) => ContentHash::from_hex(hash)?,
                (None, Some(text)) => fingerprint_text(text),
                (None, None) => bail!("pass --hash or --text"),
            };
            let score = if *clamp {
                i64::from(ReliabilityScore::saturating(*score).value())
            } else {
                *score
            };
            let index = ledger.submit(require(caller)?, content_hash, source, score)?;
            json!({ "index": index, "content_hash": content_hash })
        }
        Command::Validate { index } => {
            ledger.validate(require(caller)?, *index)?;
            record_json(*index, &ledger.get(*index)?)?
        }
        Command::ModeratorValidate { index } => {
            ledger.moderator_validate(require(caller)?, *index)?;
            record_json(*index, &ledger.get(*index)?)?
        }
        Command::Score {
            index,
            score,
            label,
            model_version,
        } => {
            ledger.set_ml_result(require(caller)?, *index, *score, *label, model_version)?;
            record_json(*index, &ledger.get(*index)?)?
        }
        Command::SetModerator { identity, enabled } => {
            let identity = Identity::parse(identity)?;
            ledger.set_moderator(require(caller)?, &identity, *enabled)?;
            serde_json::to_value(ledger.role_of(&identity))?
        }
        Command::Show { index } => record_json(*index, &ledger.get(*index)?)?,
        Command::List { newest_first } => {
            let mut records = ledger.list()?;
            if *newest_first {
                records.reverse();
            }
            let entries = records
                .iter()
                .map(|(index, record)| IndexedRecord {
                    index: *index,
                    record,
                })
                .collect::<Vec<_>>();
            serde_json::to_value(entries)?
        }
        Command::Count => json!({ "count": ledger.count()? }),
        Command::Role { identity } => {
            let identity = match identity {
                Some(raw) => Identity::parse(raw)?,
                None => require(caller)?.clone(),
            };
            let summary = ledger.role_of(&identity);
            json!({
                "account": summary.account,
                "label": summary.label(),
                "is_owner": summary.is_owner,
                "is_moderator": summary.is_moderator,
                "is_oracle": summary.is_oracle,
            })
        }
        Command::Summary => serde_json::to_value(ledger.summary()?)?,
    };
    Ok(value)
}

fn record_json(index: u64, record: &InformationRecord) -> anyhow::Result<Value> {
    Ok(serde_json::to_value(IndexedRecord { index, record })?)
}
