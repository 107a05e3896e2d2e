//! Weighted sampling of card ids from a pack.

use super::RandomSource;
use crate::entities::{Pack, Rate};
use cardpack_core::{CardId, CardpackError, CardpackResult, Entity};

/// Draws `cards_per_pack` card ids from `pack`, with replacement.
///
/// Each slot picks the first rate whose cumulative weight strictly exceeds
/// `u = rng.next_unit() * total_weight`. Ties at a cumulative boundary
/// therefore go to the rate earlier in position order. The returned ids
/// are in draw order and may repeat.
///
/// # Errors
///
/// * [`CardpackError::Inactive`] if the pack is disabled.
/// * [`CardpackError::EmptyPool`] if the pack has no rates.
pub fn draw(pack: &Pack, rng: &dyn RandomSource) -> CardpackResult<Vec<CardId>> {
    if !pack.is_active() {
        return Err(CardpackError::Inactive {
            pack_id: pack.id().to_string(),
        });
    }

    let rates = pack.rates();
    if rates.is_empty() {
        return Err(CardpackError::EmptyPool {
            pack_id: pack.id().to_string(),
        });
    }

    let total = pack.total_weight() as f64;
    let mut drawn = Vec::with_capacity(pack.cards_per_pack() as usize);
    for _ in 0..pack.cards_per_pack() {
        let u = rng.next_unit() * total;
        if let Some(rate) = select_rate(rates, u) {
            drawn.push(rate.card_id);
        }
    }

    Ok(drawn)
}

/// Selects the rate covering `u` on the cumulative weight line.
///
/// Falls back to the last rate when rounding leaves `u` at or past the
/// total. Returns `None` only for an empty slice.
#[must_use]
pub fn select_rate(rates: &[Rate], u: f64) -> Option<&Rate> {
    let mut cumulative = 0.0;
    for rate in rates {
        cumulative += f64::from(rate.weight.get());
        if cumulative > u {
            return Some(rate);
        }
    }
    rates.last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PackAttributes;
    use crate::services::{ChaChaRandomSource, FixedRandomSource, MockRandomSource};
    use crate::value_objects::Weight;
    use cardpack_core::PackId;

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

    fn pack(cards_per_pack: u32, is_active: bool, rates: Vec<Rate>) -> Pack {
        Pack::create(PackAttributes {
            id: pack_id(),
            name: "Starter".to_string(),
            description: String::new(),
            cost: 0,
            cards_per_pack,
            is_active,
            rates,
        })
        .unwrap()
    }

    #[test]
    fn test_draw_returns_exact_count() {
        let pack = pack(5, true, vec![rate(1, 2), rate(2, 5), rate(3, 1)]);
        let rng = ChaChaRandomSource::seeded(1);
        for _ in 0..100 {
            assert_eq!(draw(&pack, &rng).unwrap().len(), 5);
        }
    }

    #[test]
    fn test_single_rate_always_drawn() {
        let pack = pack(4, true, vec![rate(7, 1)]);
        let rng = ChaChaRandomSource::seeded(99);
        let drawn = draw(&pack, &rng).unwrap();
        assert_eq!(drawn, vec![CardId::new(7).unwrap(); 4]);
    }

    #[test]
    fn test_weighted_frequency_within_tolerance() {
        let pack = pack(1, true, vec![rate(1, 1), rate(2, 3)]);
        let rng = ChaChaRandomSource::seeded(2024);
        let b = CardId::new(2).unwrap();

        let trials = 100_000;
        let mut hits = 0;
        for _ in 0..trials {
            if draw(&pack, &rng).unwrap()[0] == b {
                hits += 1;
            }
        }

        let frequency = f64::from(hits) / f64::from(trials);
        assert!((frequency - 0.75).abs() < 0.02, "frequency was {frequency}");
    }

    #[test]
    fn test_draw_preserves_order_and_duplicates() {
        // total 4: [0,1) -> 1, [1,4) -> 2
        let pack = pack(4, true, vec![rate(1, 1), rate(2, 3)]);
        let rng = FixedRandomSource::new(vec![0.9, 0.1, 0.0, 0.5]);
        let drawn: Vec<u32> = draw(&pack, &rng).unwrap().into_iter().map(CardId::get).collect();
        assert_eq!(drawn, vec![2, 1, 1, 2]);
    }

    #[test]
    fn test_boundary_falls_back_to_last_rate() {
        let rates = vec![rate(1, 1), rate(2, 3)];
        assert_eq!(select_rate(&rates, 4.0).unwrap().card_id.get(), 2);
        assert_eq!(select_rate(&rates, 4.5).unwrap().card_id.get(), 2);

        let single = vec![rate(7, 1)];
        assert_eq!(select_rate(&single, 1.0).unwrap().card_id.get(), 7);
    }

    #[test]
    fn test_single_rate_unit_upper_bound_uses_fallback() {
        let pack = pack(3, true, vec![rate(7, 1)]);
        let rng = FixedRandomSource::constant(1.0);
        let drawn = draw(&pack, &rng).unwrap();
        assert_eq!(drawn, vec![CardId::new(7).unwrap(); 3]);
    }

    #[test]
    fn test_tie_break_follows_rate_order() {
        // u == 1.0 sits on the boundary between the first and second rate;
        // cumulative must strictly exceed u, so the second rate wins.
        let rates = vec![rate(1, 1), rate(2, 1), rate(3, 1)];
        assert_eq!(select_rate(&rates, 1.0).unwrap().card_id.get(), 2);
        assert_eq!(select_rate(&rates, 0.0).unwrap().card_id.get(), 1);
        assert_eq!(select_rate(&rates, 2.0).unwrap().card_id.get(), 3);
    }

    #[test]
    fn test_tie_break_uses_position_after_reconstruct() {
        let attrs = PackAttributes {
            id: pack_id(),
            name: "Starter".to_string(),
            description: String::new(),
            cost: 0,
            cards_per_pack: 1,
            is_active: true,
            rates: vec![rate(2, 1).at_position(1), rate(1, 1).at_position(0)],
        };
        let pack = Pack::reconstruct(attrs);
        let rng = FixedRandomSource::constant(0.25);
        assert_eq!(draw(&pack, &rng).unwrap(), vec![CardId::new(1).unwrap()]);
    }

    #[test]
    fn test_select_rate_empty() {
        assert!(select_rate(&[], 0.0).is_none());
    }

    #[test]
    fn test_inactive_pack_rejected() {
        let pack = pack(5, false, vec![rate(1, 1)]);
        let mut rng = MockRandomSource::new();
        rng.expect_next_unit().never();

        let err = draw(&pack, &rng).unwrap_err();
        assert!(matches!(err, CardpackError::Inactive { .. }));
    }

    #[test]
    fn test_empty_pool_rejected() {
        let pack = pack(5, true, vec![]);
        let mut rng = MockRandomSource::new();
        rng.expect_next_unit().never();

        let err = draw(&pack, &rng).unwrap_err();
        assert!(matches!(err, CardpackError::EmptyPool { pack_id } if pack_id == "starter"));
    }

    #[test]
    fn test_draw_consumes_one_value_per_slot() {
        let pack = pack(3, true, vec![rate(1, 1), rate(2, 1)]);
        let mut rng = MockRandomSource::new();
        rng.expect_next_unit().times(3).return_const(0.75);

        let drawn = draw(&pack, &rng).unwrap();
        assert_eq!(drawn, vec![CardId::new(2).unwrap(); 3]);
    }
}
