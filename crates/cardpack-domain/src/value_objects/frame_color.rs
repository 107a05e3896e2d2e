//! Frame color override value object.

use cardpack_core::{CardpackError, CardpackResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `#rrggbb` color that replaces the rarity's default frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FrameColor(String);

impl FrameColor {
    /// Creates a frame color from a `#rrggbb` string, normalized to lowercase.
    pub fn new(value: &str) -> CardpackResult<Self> {
        let value = value.trim().to_ascii_lowercase();
        let hex = value
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()));

        match hex {
            Some(_) => Ok(Self(value)),
            None => Err(CardpackError::validation(format!(
                "Invalid frame color '{}', expected #rrggbb",
                value
            ))),
        }
    }

    /// Parses an optional override; blank input means no override.
    pub fn parse_optional(raw: Option<&str>) -> CardpackResult<Option<Self>> {
        match raw.map(str::trim) {
            Some(value) if !value.is_empty() => Self::new(value).map(Some),
            _ => Ok(None),
        }
    }

    /// Returns the color as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FrameColor {
    type Error = CardpackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<FrameColor> for String {
    fn from(color: FrameColor) -> Self {
        color.0
    }
}
