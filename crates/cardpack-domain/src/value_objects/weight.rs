//! Rate weight value object.

use cardpack_core::{CardpackError, CardpackResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative likelihood of a card within its pack. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Weight(u32);

impl Weight {
    /// Creates a weight, rejecting zero.
    pub fn new(value: u32) -> CardpackResult<Self> {
        if value == 0 {
            return Err(CardpackError::configuration("Rate weight must be at least 1"));
        }
        Ok(Self(value))
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Weight {
    type Error = CardpackError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Weight> for u32 {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}
