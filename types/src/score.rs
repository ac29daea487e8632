//! Self-declared reliability score.

use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer reliability score in `0..=100` (bounds inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ReliabilityScore(u8);

impl ReliabilityScore {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    /// Create a score, rejecting anything outside `0..=100`.
    pub fn new(value: i64) -> Result<Self, TypesError> {
        if (0..=100).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(TypesError::ScoreOutOfRange(value))
        }
    }

    /// Clamp an arbitrary value into range instead of rejecting it.
    pub fn saturating(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ReliabilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for ReliabilityScore {
    type Error = TypesError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReliabilityScore> for i64 {
    fn from(score: ReliabilityScore) -> Self {
        i64::from(score.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(ReliabilityScore::new(0).unwrap(), ReliabilityScore::MIN);
        assert_eq!(ReliabilityScore::new(100).unwrap(), ReliabilityScore::MAX);
    }

    #[test]
    fn out_of_range_rejected() {
        assert_eq!(
            ReliabilityScore::new(101),
            Err(TypesError::ScoreOutOfRange(101))
        );
        assert_eq!(
            ReliabilityScore::new(-1),
            Err(TypesError::ScoreOutOfRange(-1))
        );
    }

    #[test]
    fn saturating_clamps() {
        assert_eq!(ReliabilityScore::saturating(150).value(), 100);
        assert_eq!(ReliabilityScore::saturating(-20).value(), 0);
        assert_eq!(ReliabilityScore::saturating(42).value(), 42);
    }

    #[test]
    fn deserialization_checks_range() {
        assert!(serde_json::from_str::<ReliabilityScore>("150").is_err());
        let s: ReliabilityScore = serde_json::from_str("75").unwrap();
        assert_eq!(s.value(), 75);
    }
}
