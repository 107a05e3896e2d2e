//! Behavioral tests for the in-memory adapters.

use cardpack_core::{AggregateRoot, CardId, DrawLogId, Entity, PackId};
use cardpack_domain::{Card, DrawLog, Pack, PackAttributes, Rarity, Rate, Weight};
use cardpack_repository::{
    CardRepository, DrawLogRepository, InMemoryCardRepository, InMemoryDrawLogRepository,
    InMemoryPackRepository, PackRepository,
};
use chrono::{Duration, Utc};

fn pack_id(id: &str) -> PackId {
    PackId::parse(id).unwrap()
}

fn card_id(id: u32) -> CardId {
    CardId::new(id).unwrap()
}

fn pack(id: &str) -> Pack {
    Pack::create(PackAttributes {
        id: pack_id(id),
        name: format!("{id} pack"),
        description: String::new(),
        cost: 100,
        cards_per_pack: 3,
        is_active: true,
        rates: vec![
            Rate::new(pack_id(id), card_id(1), Weight::new(1).unwrap()),
            Rate::new(pack_id(id), card_id(2), Weight::new(3).unwrap()).pickup(),
        ],
    })
    .unwrap()
}

fn card(id: u32) -> Card {
    Card::new(card_id(id), format!("Card {id}"), Rarity::Common)
}

// =============================================================================
// PackRepository
// =============================================================================

#[tokio::test]
async fn test_pack_found_with_rates_in_order() {
    let repo = InMemoryPackRepository::with_packs(vec![pack("starter")]);

    let found = repo.find_by_id(&pack_id("starter")).await.unwrap().unwrap();
    assert_eq!(found.rates().len(), 2);
    assert_eq!(found.rates()[0].card_id, card_id(1));
    assert!(found.rates()[1].is_pickup);
}

#[tokio::test]
async fn test_pack_not_found() {
    let repo = InMemoryPackRepository::new();
    assert!(repo.find_by_id(&pack_id("missing")).await.unwrap().is_none());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_pack_upsert_replaces() {
    let repo = InMemoryPackRepository::with_packs(vec![pack("starter")]);
    let renamed = Pack::create(PackAttributes {
        id: pack_id("starter"),
        name: "Renamed".to_string(),
        description: "retired".to_string(),
        cost: 0,
        cards_per_pack: 1,
        is_active: false,
        rates: vec![],
    })
    .unwrap();
    repo.upsert(renamed).await;

    let found = repo.find_by_id(&pack_id("starter")).await.unwrap().unwrap();
    assert_eq!(found.name(), "Renamed");
    assert!(!found.is_active());
    assert_eq!(repo.len().await, 1);
}

// =============================================================================
// CardRepository
// =============================================================================

#[tokio::test]
async fn test_find_by_ids_returns_each_known_card_once() {
    let repo = InMemoryCardRepository::with_cards(vec![card(1), card(2), card(3)]);

    let mut found = repo
        .find_by_ids(&[card_id(2), card_id(2), card_id(1), card_id(99)])
        .await
        .unwrap();
    found.sort_by_key(|c| c.id);

    let ids: Vec<u32> = found.iter().map(|c| c.id.get()).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_find_by_ids_empty_input() {
    let repo = InMemoryCardRepository::with_cards(vec![card(1)]);
    assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_card_remove() {
    let repo = InMemoryCardRepository::with_cards(vec![card(1)]);
    assert!(repo.remove(card_id(1)).await);
    assert!(!repo.remove(card_id(1)).await);
    assert!(repo.find_by_ids(&[card_id(1)]).await.unwrap().is_empty());
}

// =============================================================================
// DrawLogRepository
// =============================================================================

#[tokio::test]
async fn test_save_is_idempotent_on_log_id() {
    let repo = InMemoryDrawLogRepository::new();
    let log = DrawLog::create(pack_id("starter"), vec![card_id(1), card_id(1)]);

    assert!(repo.save(&log).await.unwrap());
    assert!(!repo.save(&log).await.unwrap());
    assert_eq!(repo.len().await, 1);
    assert_eq!(repo.count_by_pack_id(&pack_id("starter")).await.unwrap(), 1);
}

#[tokio::test]
async fn test_saved_log_round_trips_without_events() {
    let repo = InMemoryDrawLogRepository::new();
    let log = DrawLog::create(pack_id("starter"), vec![card_id(2), card_id(1), card_id(2)]);
    repo.save(&log).await.unwrap();

    let stored = repo.find_by_id(log.id()).await.unwrap();
    assert_eq!(stored, log);
    assert!(stored.pending_events().is_empty());
    assert!(repo.find_by_id(&DrawLogId::new()).await.is_none());
}

#[tokio::test]
async fn test_history_newest_first_with_limit() {
    let repo = InMemoryDrawLogRepository::new();
    let now = Utc::now();
    let starter = pack_id("starter");

    let mut ids = Vec::new();
    for minutes in [30, 10, 20] {
        let log = DrawLog::reconstruct(
            DrawLogId::new(),
            starter.clone(),
            vec![card_id(1)],
            now - Duration::minutes(minutes),
        );
        ids.push((minutes, *log.id()));
        repo.save(&log).await.unwrap();
    }
    repo.save(&DrawLog::create(pack_id("other"), vec![card_id(1)]))
        .await
        .unwrap();

    let history = repo.find_by_pack_id(&starter, 2).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].executed_at() > history[1].executed_at());
    assert_eq!(*history[0].id(), ids[1].1);
    assert_eq!(*history[1].id(), ids[2].1);

    assert_eq!(repo.count_by_pack_id(&starter).await.unwrap(), 3);
    assert_eq!(repo.count_by_pack_id(&pack_id("other")).await.unwrap(), 1);
}

#[tokio::test]
async fn test_history_for_unknown_pack_is_empty() {
    let repo = InMemoryDrawLogRepository::new();
    assert!(repo
        .find_by_pack_id(&pack_id("nothing"), 10)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(repo.count_by_pack_id(&pack_id("nothing")).await.unwrap(), 0);
}
