//! Typed ID wrappers for domain entities.

use crate::{CardpackError, CardpackResult};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

/// A strongly-typed wrapper for card IDs. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CardId(u32);

impl CardId {
    /// Creates a card ID, rejecting zero.
    pub fn new(value: u32) -> CardpackResult<Self> {
        if value == 0 {
            return Err(CardpackError::validation("Card id must be a positive integer"));
        }
        Ok(Self(value))
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for CardId {
    type Error = CardpackError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CardId> for u32 {
    fn from(id: CardId) -> Self {
        id.0
    }
}

/// A strongly-typed wrapper for pack IDs. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackId(String);

impl PackId {
    /// Parses a pack ID, trimming surrounding whitespace.
    ///
    /// Every entry point (CLI argument, catalog key, stored row) goes through
    /// here, so `" starter "` and `"starter"` name the same pack.
    pub fn parse(s: &str) -> CardpackResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CardpackError::validation("Pack id must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the pack key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PackId {
    type Error = CardpackError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PackId> for String {
    fn from(id: PackId) -> Self {
        id.0
    }
}

/// A strongly-typed wrapper for draw log IDs.
///
/// Generated before the log is persisted so a repeated write can be
/// recognized as the same draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawLogId(pub Uuid);

impl DrawLogId {
    /// Creates a new time-ordered draw log ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a draw log ID from a UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses a draw log ID from a string.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for DrawLogId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DrawLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for DrawLogId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<DrawLogId> for Uuid {
    fn from(id: DrawLogId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_rejects_zero() {
        assert!(CardId::new(0).is_err());
        assert_eq!(CardId::new(7).unwrap().get(), 7);
    }

    #[test]
    fn test_card_id_deserialize_validates() {
        let id: CardId = serde_json::from_str("12").unwrap();
        assert_eq!(id.get(), 12);
        assert!(serde_json::from_str::<CardId>("0").is_err());
    }

    #[test]
    fn test_pack_id_trims_and_rejects_empty() {
        assert_eq!(PackId::parse("  starter ").unwrap().as_str(), "starter");
        assert!(PackId::parse("").is_err());
        assert!(PackId::parse("   ").is_err());
    }

    #[test]
    fn test_draw_log_id_creation() {
        let id1 = DrawLogId::new();
        let id2 = DrawLogId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_draw_log_id_parsing() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = DrawLogId::parse(uuid_str).unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }
}
