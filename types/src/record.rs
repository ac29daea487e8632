//! Information records and their attestations.

use crate::{ContentHash, Identity, ReliabilityScore, Timestamp};
use serde::{Deserialize, Serialize};

/// One submitted information claim and the attestations it has accumulated.
///
/// The submission fields never change after creation. Each attestation axis
/// is `None` until it is performed and then set exactly once, all of its
/// fields together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InformationRecord {
    pub content_hash: ContentHash,
    pub source: String,
    pub reliability_score: ReliabilityScore,
    pub author: Identity,
    pub timestamp: Timestamp,
    pub validation: Option<Validation>,
    pub scoring: Option<MlScoring>,
}

/// Who validated a record, and when.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub validator: Identity,
    pub validated_at: Timestamp,
}

/// A machine-scored label attached by an oracle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MlScoring {
    pub score: u8,
    pub label: bool,
    pub model_version: String,
    pub oracle: Identity,
    pub scored_at: Timestamp,
}

impl InformationRecord {
    /// A fresh, unattested record.
    pub fn new(
        content_hash: ContentHash,
        source: impl Into<String>,
        reliability_score: ReliabilityScore,
        author: Identity,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            content_hash,
            source: source.into(),
            reliability_score,
            author,
            timestamp,
            validation: None,
            scoring: None,
        }
    }

    pub fn validated(&self) -> bool {
        self.validation.is_some()
    }

    pub fn validator(&self) -> Option<&Identity> {
        self.validation.as_ref().map(|v| &v.validator)
    }

    pub fn validated_at(&self) -> Option<Timestamp> {
        self.validation.as_ref().map(|v| v.validated_at)
    }

    pub fn is_scored(&self) -> bool {
        self.scoring.is_some()
    }

    pub fn ml_score(&self) -> Option<u8> {
        self.scoring.as_ref().map(|s| s.score)
    }

    pub fn ml_label(&self) -> Option<bool> {
        self.scoring.as_ref().map(|s| s.label)
    }

    pub fn model_version(&self) -> Option<&str> {
        self.scoring.as_ref().map(|s| s.model_version.as_str())
    }

    pub fn oracle(&self) -> Option<&Identity> {
        self.scoring.as_ref().map(|s| &s.oracle)
    }

    pub fn scored_at(&self) -> Option<Timestamp> {
        self.scoring.as_ref().map(|s| s.scored_at)
    }
}
