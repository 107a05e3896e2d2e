//! Catalog seed file for the in-memory backend.
//!
//! ```json
//! {
//!   "cards": [{ "id": 1, "name": "Slime", "rarity": "common" }],
//!   "packs": [{
//!     "id": "starter", "name": "Starter Pack", "cost": 100, "cards_per_pack": 5,
//!     "rates": [{ "card_id": 1, "weight": 10 }]
//!   }]
//! }
//! ```
//!
//! Rates inherit their pack id and keep file order as tie-break order.

use cardpack_core::{CardId, CardpackError, CardpackResult, PackId};
use cardpack_domain::{Card, Pack, PackAttributes, Rate, Weight};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Parsed, validated catalog contents.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub cards: Vec<Card>,
    pub packs: Vec<Pack>,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    cards: Vec<Card>,
    #[serde(default)]
    packs: Vec<SeedPack>,
}

#[derive(Debug, Deserialize)]
struct SeedPack {
    id: PackId,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    cost: i64,
    cards_per_pack: u32,
    #[serde(default = "default_active")]
    is_active: bool,
    #[serde(default)]
    rates: Vec<SeedRate>,
}

#[derive(Debug, Deserialize)]
struct SeedRate {
    card_id: CardId,
    weight: Weight,
    #[serde(default)]
    is_pickup: bool,
}

const fn default_active() -> bool {
    true
}

impl SeedPack {
    fn into_pack(self) -> CardpackResult<Pack> {
        let rates = self
            .rates
            .into_iter()
            .map(|rate| Rate {
                pack_id: self.id.clone(),
                card_id: rate.card_id,
                weight: rate.weight,
                is_pickup: rate.is_pickup,
                position: 0,
            })
            .collect();

        Pack::create(PackAttributes {
            id: self.id,
            name: self.name,
            description: self.description,
            cost: self.cost,
            cards_per_pack: self.cards_per_pack,
            is_active: self.is_active,
            rates,
        })
    }
}

impl Catalog {
    /// Parses a catalog from JSON text.
    pub fn from_json(json: &str) -> CardpackResult<Self> {
        let seed: SeedFile = serde_json::from_str(json)
            .map_err(|e| CardpackError::configuration(format!("Invalid catalog file: {}", e)))?;

        let mut seen_cards = HashSet::new();
        for card in &seed.cards {
            if !seen_cards.insert(card.id) {
                return Err(CardpackError::configuration(format!(
                    "Card {} is defined more than once",
                    card.id
                )));
            }
        }

        let mut seen_packs = HashSet::new();
        let mut packs = Vec::with_capacity(seed.packs.len());
        for seed_pack in seed.packs {
            if !seen_packs.insert(seed_pack.id.clone()) {
                return Err(CardpackError::configuration(format!(
                    "Pack {} is defined more than once",
                    seed_pack.id
                )));
            }
            packs.push(seed_pack.into_pack()?);
        }

        let catalog = Self {
            cards: seed.cards,
            packs,
        };
        for (pack_id, card_id) in catalog.dangling_rates() {
            warn!(%pack_id, %card_id, "Rate references a card missing from the catalog");
        }
        Ok(catalog)
    }

    /// Reads and parses a catalog file.
    pub fn load(path: impl AsRef<Path>) -> CardpackResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CardpackError::configuration(format!(
                "Failed to read catalog {}: {}",
                path.display(),
                e
            ))
        })?;

        let catalog = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            cards = catalog.cards.len(),
            packs = catalog.packs.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Rates whose card has no catalog entry. Drawing them fails with `MissingCard`.
    #[must_use]
    pub fn dangling_rates(&self) -> Vec<(PackId, CardId)> {
        let known: HashSet<CardId> = self.cards.iter().map(|card| card.id).collect();
        self.packs
            .iter()
            .flat_map(|pack| pack.rates())
            .filter(|rate| !known.contains(&rate.card_id))
            .map(|rate| (rate.pack_id.clone(), rate.card_id))
            .collect()
    }
}
