//! MySQL card catalog implementation.

use crate::{traits::CardRepository, DatabasePoolInterface};
use async_trait::async_trait;
use cardpack_core::{CardId, CardpackError, CardpackResult};
use cardpack_domain::{Card, FrameColor, HoloEffect, Rarity, TextStyle};
use shaku::Component;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::sync::Arc;
use tracing::debug;

/// MySQL card catalog implementation.
#[derive(Component, Clone)]
#[shaku(interface = CardRepository)]
pub struct MySqlCardRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlCardRepository {
    /// Creates a new MySQL card repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a card.
#[derive(Debug, FromRow)]
struct CardRow {
    id: u32,
    name: String,
    rarity: String,
    holo_effect: Option<String>,
    text_style: Option<String>,
    frame_color: Option<String>,
    description: Option<String>,
    icon_url: Option<String>,
}

impl TryFrom<CardRow> for Card {
    type Error = CardpackError;

    fn try_from(row: CardRow) -> Result<Self, Self::Error> {
        let corrupt = |e: CardpackError| {
            CardpackError::Internal(format!("Invalid card {} in database: {}", row.id, e))
        };

        Ok(Card {
            id: CardId::new(row.id).map_err(corrupt)?,
            name: row.name.clone(),
            rarity: Rarity::parse(&row.rarity).map_err(corrupt)?,
            holo_effect: HoloEffect::parse_lenient(row.holo_effect.as_deref()).map_err(corrupt)?,
            text_style: TextStyle::parse_lenient(row.text_style.as_deref()).map_err(corrupt)?,
            frame_color: FrameColor::parse_optional(row.frame_color.as_deref()).map_err(corrupt)?,
            description: row.description.clone().unwrap_or_default(),
            icon_url: row.icon_url.clone().unwrap_or_default(),
        })
    }
}

#[async_trait]
impl CardRepository for MySqlCardRepository {
    async fn find_by_ids(&self, ids: &[CardId]) -> CardpackResult<Vec<Card>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Finding {} cards by ids", ids.len());

        let mut query = QueryBuilder::<MySql>::new(
            "SELECT id, name, rarity, holo_effect, text_style, frame_color, description, icon_url \
             FROM cards WHERE id IN (",
        );
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id.get());
        }
        separated.push_unseparated(")");

        let rows = query
            .build_query_as::<CardRow>()
            .fetch_all(self.pool.inner())
            .await?;

        rows.into_iter().map(Card::try_from).collect()
    }
}
