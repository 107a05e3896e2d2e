//! Repository trait definitions.

use cardpack_core::{CardId, CardpackResult, Interface, PackId};
use cardpack_domain::{Card, DrawLog, Pack};
use async_trait::async_trait;

/// Pack repository trait.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PackRepository: Interface + Send + Sync {
    /// Finds a pack with its rates in insertion order.
    async fn find_by_id(&self, id: &PackId) -> CardpackResult<Option<Pack>>;
}

/// Card catalog trait.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CardRepository: Interface + Send + Sync {
    /// Finds the cards for `ids`.
    ///
    /// The result is unordered and holds each known card once; unknown ids
    /// are simply absent.
    async fn find_by_ids(&self, ids: &[CardId]) -> CardpackResult<Vec<Card>>;
}

/// Draw log repository trait.
///
/// Insert-only: there is no update or delete.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DrawLogRepository: Interface + Send + Sync {
    /// Stores a draw log.
    ///
    /// Returns `true` when inserted and `false` when a log with the same id
    /// already exists, in which case nothing is written.
    async fn save(&self, log: &DrawLog) -> CardpackResult<bool>;

    /// Finds the newest logs for a pack, newest first.
    async fn find_by_pack_id(&self, pack_id: &PackId, limit: u32) -> CardpackResult<Vec<DrawLog>>;

    /// Counts all logs for a pack.
    async fn count_by_pack_id(&self, pack_id: &PackId) -> CardpackResult<u64>;
}
