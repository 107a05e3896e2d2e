//! Card rarity value object.

use cardpack_core::{CardpackError, CardpackResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of card rarities, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Returns all rarities in ascending order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Common,
            Self::Uncommon,
            Self::Rare,
            Self::Epic,
            Self::Legendary,
        ]
    }

    /// Returns the lowercase storage name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }

    /// Parses a rarity from a string, ignoring case.
    pub fn parse(s: &str) -> CardpackResult<Self> {
        Self::all()
            .into_iter()
            .find(|rarity| rarity.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CardpackError::validation(format!("Unknown rarity '{}'", s)))
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!(Rarity::parse("LEGENDARY").unwrap(), Rarity::Legendary);
        assert_eq!(Rarity::parse(" rare ").unwrap(), Rarity::Rare);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(Rarity::parse("mythic").is_err());
        assert!(Rarity::parse("").is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(Rarity::Common < Rarity::Legendary);
        assert!(Rarity::Rare < Rarity::Epic);
    }
}
