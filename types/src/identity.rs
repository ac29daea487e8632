//! Caller identity.

use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque, comparable token naming a caller (typically an account address).
///
/// The inner string is always normalized: surrounding whitespace is trimmed
/// and ASCII letters are lowercased, so `0xAbC` and ` 0xabc ` are the same
/// identity. The ledger never authenticates an identity; it trusts whatever
/// the identity provider asserts.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Parse and normalize a raw identity string.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(TypesError::EmptyIdentity);
        }
        Ok(Self(normalized))
    }

    /// Return the normalized identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identity {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identity {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Identity> for String {
    fn from(id: Identity) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let a = Identity::parse("  0xAbCdEf  ").unwrap();
        let b = Identity::parse("0xabcdef").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "0xabcdef");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Identity::parse("   "), Err(TypesError::EmptyIdentity));
        assert_eq!(Identity::parse(""), Err(TypesError::EmptyIdentity));
    }

    #[test]
    fn deserialization_normalizes() {
        let id: Identity = serde_json::from_str("\"ALICE\"").unwrap();
        assert_eq!(id.as_str(), "alice");
    }

    #[test]
    fn deserialization_rejects_empty() {
        assert!(serde_json::from_str::<Identity>("\"\"").is_err());
    }
}
