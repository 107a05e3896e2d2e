//! In-memory card catalog.

use crate::traits::CardRepository;
use async_trait::async_trait;
use cardpack_core::{CardId, CardpackResult};
use cardpack_domain::Card;
use shaku::Component;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::debug;

/// Card catalog backed by a map. Lookup results come back in map order.
#[derive(Component, Default)]
#[shaku(interface = CardRepository)]
pub struct InMemoryCardRepository {
    cards: RwLock<HashMap<CardId, Card>>,
}

impl InMemoryCardRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding `cards`.
    #[must_use]
    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: RwLock::new(index(cards)),
        }
    }

    /// Builds the DI parameters for a pre-seeded catalog.
    #[must_use]
    pub fn parameters(cards: Vec<Card>) -> InMemoryCardRepositoryParameters {
        InMemoryCardRepositoryParameters {
            cards: RwLock::new(index(cards)),
        }
    }

    /// Inserts or replaces a card.
    pub async fn upsert(&self, card: Card) {
        self.cards.write().await.insert(card.id, card);
    }

    /// Removes a card, returning whether it existed.
    pub async fn remove(&self, id: CardId) -> bool {
        self.cards.write().await.remove(&id).is_some()
    }
}

fn index(cards: Vec<Card>) -> HashMap<CardId, Card> {
    cards.into_iter().map(|card| (card.id, card)).collect()
}

#[async_trait]
impl CardRepository for InMemoryCardRepository {
    async fn find_by_ids(&self, ids: &[CardId]) -> CardpackResult<Vec<Card>> {
        let wanted: HashSet<CardId> = ids.iter().copied().collect();
        debug!(requested = ids.len(), distinct = wanted.len(), "Finding cards by ids");

        let cards = self.cards.read().await;
        Ok(cards
            .values()
            .filter(|card| wanted.contains(&card.id))
            .cloned()
            .collect())
    }
}
