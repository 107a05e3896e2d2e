//! In-memory draw log repository.

use crate::traits::DrawLogRepository;
use async_trait::async_trait;
use cardpack_core::{AggregateRoot, CardpackResult, DrawLogId, Entity, PackId};
use cardpack_domain::DrawLog;
use shaku::Component;
use std::cmp::Reverse;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Append-only draw log store.
#[derive(Component, Default)]
#[shaku(interface = DrawLogRepository)]
pub struct InMemoryDrawLogRepository {
    #[shaku(default)]
    logs: RwLock<HashMap<DrawLogId, DrawLog>>,
}

impl InMemoryDrawLogRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a log by id.
    pub async fn find_by_id(&self, id: &DrawLogId) -> Option<DrawLog> {
        self.logs.read().await.get(id).cloned()
    }

    /// Total number of stored logs across all packs.
    pub async fn len(&self) -> usize {
        self.logs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.logs.read().await.is_empty()
    }
}

#[async_trait]
impl DrawLogRepository for InMemoryDrawLogRepository {
    async fn save(&self, log: &DrawLog) -> CardpackResult<bool> {
        let mut logs = self.logs.write().await;
        if logs.contains_key(log.id()) {
            debug!(log_id = %log.id(), "Draw log already stored");
            return Ok(false);
        }

        let mut stored = log.clone();
        stored.take_pending_events();
        logs.insert(*log.id(), stored);
        debug!(log_id = %log.id(), pack_id = %log.pack_id(), "Draw log stored");
        Ok(true)
    }

    async fn find_by_pack_id(&self, pack_id: &PackId, limit: u32) -> CardpackResult<Vec<DrawLog>> {
        let logs = self.logs.read().await;
        let mut matching: Vec<&DrawLog> = logs.values().filter(|log| log.pack_id() == pack_id).collect();
        matching.sort_by_key(|log| Reverse((log.executed_at(), *log.id())));

        Ok(matching
            .into_iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_by_pack_id(&self, pack_id: &PackId) -> CardpackResult<u64> {
        let logs = self.logs.read().await;
        Ok(logs.values().filter(|log| log.pack_id() == pack_id).count() as u64)
    }
}
