//! Draw service trait definition.

use crate::dto::{DrawHistoryResponse, DrawResponse, PackOddsResponse};
use async_trait::async_trait;
use cardpack_core::{CardpackResult, Interface, PackId};

/// Draw service trait.
#[async_trait]
pub trait DrawService: Interface + Send + Sync {
    /// Opens one pack.
    ///
    /// Fails with `NotFound`, `Inactive`, `EmptyPool` or `MissingCard`, or
    /// with a `Database` error that outlived the persist retries. A failed
    /// draw never returns a partial card list.
    async fn draw(&self, pack_id: &PackId) -> CardpackResult<DrawResponse>;

    /// Lists recent draws of a pack, newest first.
    ///
    /// `limit` defaults to the configured page size and is clamped to the
    /// configured maximum.
    async fn draw_history(
        &self,
        pack_id: &PackId,
        limit: Option<u32>,
    ) -> CardpackResult<DrawHistoryResponse>;

    /// Returns the per-rate drop chances of a pack.
    async fn pack_odds(&self, pack_id: &PackId) -> CardpackResult<PackOddsResponse>;
}
