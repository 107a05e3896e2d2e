//! Pack aggregate and its rate rows.

use crate::value_objects::Weight;
use cardpack_core::{CardId, CardpackError, CardpackResult, Entity, PackId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One weighted entry in a pack's draw pool.
///
/// The pickup flag is cosmetic and never affects probability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    pub pack_id: PackId,
    pub card_id: CardId,
    pub weight: Weight,
    #[serde(default)]
    pub is_pickup: bool,
    /// Insertion position; fixes iteration order for tie-breaking.
    #[serde(default)]
    pub position: u32,
}

impl Rate {
    /// Creates a non-pickup rate at position 0.
    #[must_use]
    pub fn new(pack_id: PackId, card_id: CardId, weight: Weight) -> Self {
        Self {
            pack_id,
            card_id,
            weight,
            is_pickup: false,
            position: 0,
        }
    }

    /// Marks the rate as a featured pickup.
    #[must_use]
    pub fn pickup(mut self) -> Self {
        self.is_pickup = true;
        self
    }

    /// Sets the insertion position.
    #[must_use]
    pub fn at_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }
}

/// Input for [`Pack::create`] and [`Pack::reconstruct`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackAttributes {
    pub id: PackId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: i64,
    pub cards_per_pack: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub rates: Vec<Rate>,
}

const fn default_active() -> bool {
    true
}

/// A drawable pack configuration.
///
/// Treated as a read-only snapshot by the draw flow. Rates are kept in
/// position order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pack {
    id: PackId,
    name: String,
    description: String,
    cost: i64,
    cards_per_pack: u32,
    is_active: bool,
    rates: Vec<Rate>,
}

impl Pack {
    /// Creates a new pack, validating its configuration.
    ///
    /// Rate positions are reassigned from list order.
    pub fn create(attributes: PackAttributes) -> CardpackResult<Self> {
        if attributes.cost < 0 {
            return Err(CardpackError::configuration(format!(
                "Pack {} cost must be non-negative, got {}",
                attributes.id, attributes.cost
            )));
        }
        if attributes.cards_per_pack == 0 {
            return Err(CardpackError::configuration(format!(
                "Pack {} must draw at least one card",
                attributes.id
            )));
        }
        if attributes.name.trim().is_empty() {
            return Err(CardpackError::configuration(format!(
                "Pack {} must have a name",
                attributes.id
            )));
        }
        if let Some(stray) = attributes.rates.iter().find(|r| r.pack_id != attributes.id) {
            return Err(CardpackError::configuration(format!(
                "Rate for card {} belongs to pack {}, not {}",
                stray.card_id, stray.pack_id, attributes.id
            )));
        }

        let rates = attributes
            .rates
            .into_iter()
            .zip(0u32..)
            .map(|(rate, position)| rate.at_position(position))
            .collect();

        Ok(Self {
            id: attributes.id,
            name: attributes.name,
            description: attributes.description,
            cost: attributes.cost,
            cards_per_pack: attributes.cards_per_pack,
            is_active: attributes.is_active,
            rates,
        })
    }

    /// Rehydrates a pack from storage without validation.
    #[must_use]
    pub fn reconstruct(attributes: PackAttributes) -> Self {
        let mut rates = attributes.rates;
        rates.sort_by_key(|rate| rate.position);

        Self {
            id: attributes.id,
            name: attributes.name,
            description: attributes.description,
            cost: attributes.cost,
            cards_per_pack: attributes.cards_per_pack,
            is_active: attributes.is_active,
            rates,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn cost(&self) -> i64 {
        self.cost
    }

    #[must_use]
    pub const fn cards_per_pack(&self) -> u32 {
        self.cards_per_pack
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Rates in position order.
    #[must_use]
    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    /// Sum of all rate weights. Zero for an empty pool.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.rates.iter().map(|rate| u64::from(rate.weight.get())).sum()
    }

    /// Rates flagged as featured pickups.
    pub fn pickup_rates(&self) -> impl Iterator<Item = &Rate> {
        self.rates.iter().filter(|rate| rate.is_pickup)
    }

    #[must_use]
    pub fn contains_card(&self, card_id: CardId) -> bool {
        self.rates.iter().any(|rate| rate.card_id == card_id)
    }

    /// Distinct card ids in rate order.
    #[must_use]
    pub fn card_ids(&self) -> Vec<CardId> {
        let mut seen = HashSet::new();
        self.rates
            .iter()
            .map(|rate| rate.card_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Chance of a single slot landing on `card_id`.
    #[must_use]
    pub fn probability_of(&self, card_id: CardId) -> f64 {
        let total = self.total_weight();
        if total == 0 {
            return 0.0;
        }
        let weight: u64 = self
            .rates
            .iter()
            .filter(|rate| rate.card_id == card_id)
            .map(|rate| u64::from(rate.weight.get()))
            .sum();
        weight as f64 / total as f64
    }
}

impl Entity<PackId> for Pack {
    fn id(&self) -> &PackId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack_id() -> PackId {
        PackId::parse("starter").unwrap()
    }

    fn rate(card: u32, weight: u32) -> Rate {
        Rate::new(
            pack_id(),
            CardId::new(card).unwrap(),
            Weight::new(weight).unwrap(),
        )
    }

    fn attributes(rates: Vec<Rate>) -> PackAttributes {
        PackAttributes {
            id: pack_id(),
            name: "Starter Pack".to_string(),
            description: String::new(),
            cost: 100,
            cards_per_pack: 5,
            is_active: true,
            rates,
        }
    }

    #[test]
    fn test_create_valid_pack() {
        let pack = Pack::create(attributes(vec![rate(1, 1), rate(2, 3)])).unwrap();
        assert_eq!(pack.id().as_str(), "starter");
        assert_eq!(pack.cards_per_pack(), 5);
        assert_eq!(pack.total_weight(), 4);
    }

    #[test]
    fn test_create_assigns_positions_in_list_order() {
        let pack = Pack::create(attributes(vec![
            rate(3, 1).at_position(9),
            rate(1, 1).at_position(4),
        ]))
        .unwrap();
        let positions: Vec<u32> = pack.rates().iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![0, 1]);
        assert_eq!(pack.rates()[0].card_id.get(), 3);
    }

    #[test]
    fn test_create_rejects_negative_cost() {
        let mut attrs = attributes(vec![rate(1, 1)]);
        attrs.cost = -1;
        let err = Pack::create(attrs).unwrap_err();
        assert!(matches!(err, CardpackError::Configuration(_)));
    }

    #[test]
    fn test_create_accepts_free_pack() {
        let mut attrs = attributes(vec![rate(1, 1)]);
        attrs.cost = 0;
        assert!(Pack::create(attrs).is_ok());
    }

    #[test]
    fn test_create_rejects_zero_cards_per_pack() {
        let mut attrs = attributes(vec![rate(1, 1)]);
        attrs.cards_per_pack = 0;
        let err = Pack::create(attrs).unwrap_err();
        assert!(matches!(err, CardpackError::Configuration(_)));
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let mut attrs = attributes(vec![]);
        attrs.name = "  ".to_string();
        assert!(matches!(
            Pack::create(attrs),
            Err(CardpackError::Configuration(_))
        ));
    }

    #[test]
    fn test_create_rejects_foreign_rate() {
        let foreign = Rate::new(
            PackId::parse("other").unwrap(),
            CardId::new(1).unwrap(),
            Weight::new(1).unwrap(),
        );
        assert!(matches!(
            Pack::create(attributes(vec![foreign])),
            Err(CardpackError::Configuration(_))
        ));
    }

    #[test]
    fn test_reconstruct_skips_validation_and_sorts_by_position() {
        let mut attrs = attributes(vec![rate(2, 1).at_position(1), rate(1, 1).at_position(0)]);
        attrs.cards_per_pack = 0;
        attrs.cost = -5;

        let pack = Pack::reconstruct(attrs);
        assert_eq!(pack.cards_per_pack(), 0);
        assert_eq!(pack.rates()[0].card_id.get(), 1);
        assert_eq!(pack.rates()[1].card_id.get(), 2);
    }

    #[test]
    fn test_total_weight_empty_pool() {
        let pack = Pack::create(attributes(vec![])).unwrap();
        assert_eq!(pack.total_weight(), 0);
        assert_eq!(pack.probability_of(CardId::new(1).unwrap()), 0.0);
    }

    #[test]
    fn test_probability_sums_duplicate_rows() {
        let pack = Pack::create(attributes(vec![rate(1, 1), rate(2, 2), rate(1, 1)])).unwrap();
        assert!((pack.probability_of(CardId::new(1).unwrap()) - 0.5).abs() < f64::EPSILON);
        assert_eq!(pack.card_ids().len(), 2);
        assert!(pack.contains_card(CardId::new(2).unwrap()));
        assert!(!pack.contains_card(CardId::new(3).unwrap()));
    }

    #[test]
    fn test_pickup_rates() {
        let pack = Pack::create(attributes(vec![rate(1, 1).pickup(), rate(2, 1)])).unwrap();
        let pickups: Vec<_> = pack.pickup_rates().collect();
        assert_eq!(pickups.len(), 1);
        assert_eq!(pickups[0].card_id.get(), 1);
    }
}
