//! Notifications published on every ledger state transition.

use newsproof_types::{ContentHash, Identity, ReliabilityScore};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};
use thiserror::Error;

/// Ledger-level events that observers can subscribe to via the [`EventNotifier`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event")]
pub enum LedgerEvent {
    /// A new record was appended.
    InformationSubmitted {
        index: u64,
        author: Identity,
        content_hash: ContentHash,
        source: String,
        reliability_score: ReliabilityScore,
    },
    /// A record was validated.
    InformationValidated { index: u64, validator: Identity },
    /// An oracle attached an ML score to a record.
    InformationScored {
        index: u64,
        score: u8,
        label: bool,
        model_version: String,
        oracle: Identity,
    },
    /// The owner added or removed a moderator.
    ModeratorUpdated { moderator: Identity, enabled: bool },
}

impl LedgerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            LedgerEvent::InformationSubmitted { .. } => EventKind::InformationSubmitted,
            LedgerEvent::InformationValidated { .. } => EventKind::InformationValidated,
            LedgerEvent::InformationScored { .. } => EventKind::InformationScored,
            LedgerEvent::ModeratorUpdated { .. } => EventKind::ModeratorUpdated,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// The four notification kinds, by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    InformationSubmitted,
    InformationValidated,
    InformationScored,
    ModeratorUpdated,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::InformationSubmitted,
        EventKind::InformationValidated,
        EventKind::InformationScored,
        EventKind::ModeratorUpdated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::InformationSubmitted => "InformationSubmitted",
            EventKind::InformationValidated => "InformationValidated",
            EventKind::InformationScored => "InformationScored",
            EventKind::ModeratorUpdated => "ModeratorUpdated",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = NotifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| NotifierError::UnknownKind(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifierError {
    #[error("unknown event kind: {0}")]
    UnknownKind(String),
}

type Handler = Arc<dyn Fn(&LedgerEvent) + Send + Sync>;

struct Registry {
    next_id: AtomicU64,
    handlers: RwLock<HashMap<EventKind, Vec<(u64, Handler)>>>,
}

impl Registry {
    fn remove(&self, kind: EventKind, id: u64) {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(list) = handlers.get_mut(&kind) {
            list.retain(|(handler_id, _)| *handler_id != id);
        }
    }
}

/// Synchronous fan-out notifier for ledger events.
///
/// Handlers run inline on the publishing thread, in subscription order, while
/// the ledger still holds its writer lock: they may read from the ledger, and
/// a mutating call made from a handler fails with `LedgerError::Reentrant`.
/// Cloning yields another handle to the same subscriber set.
#[derive(Clone)]
pub struct EventNotifier {
    registry: Arc<Registry>,
}

/// Handle returned by [`EventNotifier::subscribe`].
///
/// Dropping it does not unsubscribe; call [`Subscription::unsubscribe`].
pub struct Subscription {
    id: u64,
    kind: EventKind,
    registry: Weak<Registry>,
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Stop delivery to this handler.
    ///
    /// Safe to call repeatedly, and a no-op once the notifier is gone.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.kind, self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

impl EventNotifier {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry {
                next_id: AtomicU64::new(0),
                handlers: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&LedgerEvent) + Send + Sync + 'static,
    {
        self.insert(kind, Arc::new(handler))
    }

    /// Subscribe by event name, failing for names that are not an [`EventKind`].
    pub fn subscribe_named<F>(&self, name: &str, handler: F) -> Result<Subscription, NotifierError>
    where
        F: Fn(&LedgerEvent) + Send + Sync + 'static,
    {
        let kind = name.parse()?;
        Ok(self.subscribe(kind, handler))
    }

    /// Subscribe one handler to every kind.
    pub fn subscribe_all<F>(&self, handler: F) -> Vec<Subscription>
    where
        F: Fn(&LedgerEvent) + Send + Sync + 'static,
    {
        let handler: Handler = Arc::new(handler);
        EventKind::ALL
            .into_iter()
            .map(|kind| self.insert(kind, Arc::clone(&handler)))
            .collect()
    }

    pub fn unsubscribe(&self, subscription: &Subscription) {
        subscription.unsubscribe();
    }

    /// Deliver `event` to every handler subscribed to its kind.
    pub fn publish(&self, event: &LedgerEvent) {
        let targets: Vec<Handler> = {
            let handlers = self
                .registry
                .handlers
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            handlers
                .get(&event.kind())
                .map(|list| list.iter().map(|(_, h)| Arc::clone(h)).collect())
                .unwrap_or_default()
        };
        for handler in targets {
            handler(event);
        }
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.registry
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .map_or(0, Vec::len)
    }

    fn insert(&self, kind: EventKind, handler: Handler) -> Subscription {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(kind)
            .or_default()
            .push((id, handler));
        Subscription {
            id,
            kind,
            registry: Arc::downgrade(&self.registry),
        }
    }
}

impl Default for EventNotifier {
    fn default() -> Self {
        Self::new()
    }
}
