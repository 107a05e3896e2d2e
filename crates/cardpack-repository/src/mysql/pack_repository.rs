//! MySQL pack repository implementation.

use crate::{traits::PackRepository, DatabasePoolInterface};
use async_trait::async_trait;
use cardpack_core::{CardId, CardpackError, CardpackResult, PackId};
use cardpack_domain::{Pack, PackAttributes, Rate, Weight};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL pack repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = PackRepository)]
pub struct MySqlPackRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlPackRepository {
    /// Creates a new MySQL pack repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a pack.
#[derive(Debug, FromRow)]
struct PackRow {
    id: String,
    name: String,
    description: String,
    cost: i64,
    cards_per_pack: u32,
    is_active: bool,
}

/// Database row representation of a rate.
#[derive(Debug, FromRow)]
struct RateRow {
    card_id: u32,
    weight: u32,
    is_pickup: bool,
}

fn to_rate(pack_id: &PackId, row: RateRow, position: u32) -> CardpackResult<Rate> {
    let card_id = CardId::new(row.card_id)
        .map_err(|e| CardpackError::Internal(format!("Invalid card id in pack_rates: {}", e)))?;
    let weight = Weight::new(row.weight)
        .map_err(|e| CardpackError::Internal(format!("Invalid weight in pack_rates: {}", e)))?;

    let rate = Rate::new(pack_id.clone(), card_id, weight).at_position(position);
    Ok(if row.is_pickup { rate.pickup() } else { rate })
}

#[async_trait]
impl PackRepository for MySqlPackRepository {
    async fn find_by_id(&self, id: &PackId) -> CardpackResult<Option<Pack>> {
        debug!("Finding pack by id: {}", id);

        // One transaction so the pack row and its rates come from the same snapshot.
        let mut tx = self.pool.inner().begin().await?;

        let row = sqlx::query_as::<_, PackRow>(
            r#"
            SELECT id, name, description, cost, cards_per_pack, is_active
            FROM packs
            WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.commit().await?;
            return Ok(None);
        };

        let rate_rows = sqlx::query_as::<_, RateRow>(
            r#"
            SELECT card_id, weight, is_pickup
            FROM pack_rates
            WHERE pack_id = ?
            ORDER BY id
            "#,
        )
        .bind(id.as_str())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let pack_id = PackId::parse(&row.id)
            .map_err(|e| CardpackError::Internal(format!("Invalid pack id in database: {}", e)))?;
        let rates = rate_rows
            .into_iter()
            .zip(0u32..)
            .map(|(rate, position)| to_rate(&pack_id, rate, position))
            .collect::<CardpackResult<Vec<_>>>()?;

        Ok(Some(Pack::reconstruct(PackAttributes {
            id: pack_id,
            name: row.name,
            description: row.description,
            cost: row.cost,
            cards_per_pack: row.cards_per_pack,
            is_active: row.is_active,
            rates,
        })))
    }
}
