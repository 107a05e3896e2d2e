//! Draw-related DTOs.

use super::CardResponse;
use cardpack_core::{DrawLogId, Entity, PackId};
use cardpack_domain::{DrawLog, Pack};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a successful draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawResponse {
    pub log_id: DrawLogId,
    pub pack_id: PackId,
    /// Drawn cards in draw order, duplicates included.
    pub cards: Vec<CardResponse>,
}

/// One past draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawLogResponse {
    pub log_id: DrawLogId,
    pub card_ids: Vec<u32>,
    pub executed_at: DateTime<Utc>,
}

impl From<DrawLog> for DrawLogResponse {
    fn from(log: DrawLog) -> Self {
        Self {
            log_id: *log.id(),
            card_ids: log.card_ids().iter().map(|id| id.get()).collect(),
            executed_at: log.executed_at(),
        }
    }
}

/// Recent draws for a pack, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawHistoryResponse {
    pub pack_id: PackId,
    /// All draws ever recorded for the pack.
    pub total: u64,
    /// Page size actually applied after clamping.
    pub limit: u32,
    pub draws: Vec<DrawLogResponse>,
}

/// Drop chance of one rate row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateOdds {
    pub card_id: u32,
    pub weight: u32,
    pub is_pickup: bool,
    /// Chance of a single slot landing on this row.
    pub probability: f64,
}

/// Published drop rates of a pack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackOddsResponse {
    pub pack_id: PackId,
    pub name: String,
    pub is_active: bool,
    pub cost: i64,
    pub cards_per_pack: u32,
    pub total_weight: u64,
    pub rates: Vec<RateOdds>,
}

impl From<&Pack> for PackOddsResponse {
    fn from(pack: &Pack) -> Self {
        let total_weight = pack.total_weight();
        let rates = pack
            .rates()
            .iter()
            .map(|rate| {
                let weight = rate.weight.get();
                let probability = if total_weight == 0 {
                    0.0
                } else {
                    f64::from(weight) / total_weight as f64
                };
                RateOdds {
                    card_id: rate.card_id.get(),
                    weight,
                    is_pickup: rate.is_pickup,
                    probability,
                }
            })
            .collect();

        Self {
            pack_id: pack.id().clone(),
            name: pack.name().to_string(),
            is_active: pack.is_active(),
            cost: pack.cost(),
            cards_per_pack: pack.cards_per_pack(),
            total_weight,
            rates,
        }
    }
}
