//! MySQL draw log repository implementation.

use crate::{traits::DrawLogRepository, DatabasePoolInterface};
use async_trait::async_trait;
use cardpack_core::{CardId, CardpackError, CardpackResult, DrawLogId, Entity, PackId};
use cardpack_domain::DrawLog;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::types::Json;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// MySQL draw log repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = DrawLogRepository)]
pub struct MySqlDrawLogRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlDrawLogRepository {
    /// Creates a new MySQL draw log repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a draw log.
#[derive(Debug, FromRow)]
struct DrawLogRow {
    id: String, // CHAR(36)
    pack_id: String,
    card_ids: Json<Vec<u32>>,
    executed_at: DateTime<Utc>,
}

impl TryFrom<DrawLogRow> for DrawLog {
    type Error = CardpackError;

    fn try_from(row: DrawLogRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| CardpackError::Internal(format!("Invalid UUID in database: {}", e)))?;
        let pack_id = PackId::parse(&row.pack_id)
            .map_err(|e| CardpackError::Internal(format!("Invalid pack id in database: {}", e)))?;
        let card_ids = row
            .card_ids
            .0
            .into_iter()
            .map(CardId::new)
            .collect::<CardpackResult<Vec<_>>>()
            .map_err(|e| CardpackError::Internal(format!("Invalid card id in draw log: {}", e)))?;

        Ok(DrawLog::reconstruct(
            DrawLogId::from_uuid(id),
            pack_id,
            card_ids,
            row.executed_at,
        ))
    }
}

#[async_trait]
impl DrawLogRepository for MySqlDrawLogRepository {
    async fn save(&self, log: &DrawLog) -> CardpackResult<bool> {
        debug!("Saving draw log: {}", log.id());

        let card_ids: Vec<u32> = log.card_ids().iter().map(|id| id.get()).collect();

        // The log id doubles as the idempotency key. Only a conflict on it is a no-op;
        // any other write failure (truncation, bad column value) surfaces as an error.
        let result = sqlx::query(
            r#"
            INSERT INTO draw_logs (id, pack_id, card_ids, executed_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(log.id().into_inner().to_string())
        .bind(log.pack_id().as_str())
        .bind(Json(card_ids))
        .bind(log.executed_at())
        .execute(self.pool.inner())
        .await
        .map(|done| done.rows_affected());

        insert_outcome(result)
    }

    async fn find_by_pack_id(&self, pack_id: &PackId, limit: u32) -> CardpackResult<Vec<DrawLog>> {
        debug!("Finding draw logs for pack: {}, limit: {}", pack_id, limit);

        let rows = sqlx::query_as::<_, DrawLogRow>(
            r#"
            SELECT id, pack_id, card_ids, executed_at
            FROM draw_logs
            WHERE pack_id = ?
            ORDER BY executed_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(pack_id.as_str())
        .bind(limit)
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(DrawLog::try_from).collect()
    }

    async fn count_by_pack_id(&self, pack_id: &PackId) -> CardpackResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM draw_logs WHERE pack_id = ?")
            .bind(pack_id.as_str())
            .fetch_one(self.pool.inner())
            .await?;

        Ok(u64::try_from(total).unwrap_or_default())
    }
}

/// Maps the insert result to `true` (inserted) or `false` (id already stored).
fn insert_outcome(result: Result<u64, sqlx::Error>) -> CardpackResult<bool> {
    match result {
        Ok(rows) => Ok(rows == 1),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Ok(false),
        Err(err) => Err(err.into()),
    }
}
