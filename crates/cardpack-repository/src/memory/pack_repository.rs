//! In-memory pack repository.

use crate::traits::PackRepository;
use async_trait::async_trait;
use cardpack_core::{CardpackResult, Entity, PackId};
use cardpack_domain::Pack;
use shaku::Component;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Pack repository backed by a map.
///
/// Readers receive clones, so a draw always works on a snapshot even
/// while packs are being replaced.
#[derive(Component, Default)]
#[shaku(interface = PackRepository)]
pub struct InMemoryPackRepository {
    packs: RwLock<HashMap<PackId, Pack>>,
}

impl InMemoryPackRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `packs`.
    #[must_use]
    pub fn with_packs(packs: Vec<Pack>) -> Self {
        Self {
            packs: RwLock::new(index(packs)),
        }
    }

    /// Builds the DI parameters for a pre-seeded repository.
    #[must_use]
    pub fn parameters(packs: Vec<Pack>) -> InMemoryPackRepositoryParameters {
        InMemoryPackRepositoryParameters {
            packs: RwLock::new(index(packs)),
        }
    }

    /// Inserts or replaces a pack.
    pub async fn upsert(&self, pack: Pack) {
        self.packs.write().await.insert(pack.id().clone(), pack);
    }

    /// Number of stored packs.
    pub async fn len(&self) -> usize {
        self.packs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.packs.read().await.is_empty()
    }
}

fn index(packs: Vec<Pack>) -> HashMap<PackId, Pack> {
    packs
        .into_iter()
        .map(|pack| (pack.id().clone(), pack))
        .collect()
}

#[async_trait]
impl PackRepository for InMemoryPackRepository {
    async fn find_by_id(&self, id: &PackId) -> CardpackResult<Option<Pack>> {
        debug!(pack_id = %id, "Finding pack by id");
        Ok(self.packs.read().await.get(id).cloned())
    }
}
