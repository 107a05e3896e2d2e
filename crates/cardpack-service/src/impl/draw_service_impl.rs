//! Draw service implementation.

use crate::draw_service::DrawService;
use crate::dto::{CardResponse, DrawHistoryResponse, DrawLogResponse, DrawResponse, PackOddsResponse};
use async_trait::async_trait;
use cardpack_config::DrawConfig;
use cardpack_core::{
    AggregateRoot, CardId, CardpackError, CardpackResult, Entity, EventPublisher, PackId,
};
use cardpack_domain::services::weighted_draw;
use cardpack_domain::{Card, DrawCompleted, DrawLog, Pack, RandomSource};
use cardpack_repository::{CardRepository, DrawLogRepository, PackRepository};
use cardpack_resilience::{with_timeout, RetryPolicy};
use shaku::Component;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Tuning knobs for the draw flow.
#[derive(Debug, Clone)]
pub struct DrawSettings {
    /// Retry policy for persisting the draw log. Only transient errors are retried.
    pub persist_retry: RetryPolicy,
    /// Upper bound on event publication.
    pub publish_timeout: Duration,
    /// History page size when none is requested.
    pub history_default_limit: u32,
    /// Largest history page.
    pub history_max_limit: u32,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self::from_config(&DrawConfig::default())
    }
}

impl DrawSettings {
    /// Builds settings from the `[draw]` configuration section.
    #[must_use]
    pub fn from_config(config: &DrawConfig) -> Self {
        Self {
            persist_retry: RetryPolicy::with_max_attempts(config.persist_max_attempts)
                .with_initial_delay(config.persist_retry_delay()),
            publish_timeout: config.publish_timeout(),
            history_default_limit: config.history_default_limit,
            history_max_limit: config.history_max_limit,
        }
    }

    /// Resolves a requested history page size.
    #[must_use]
    pub fn history_limit(&self, requested: Option<u32>) -> u32 {
        let max = self.history_max_limit.max(1);
        requested
            .unwrap_or(self.history_default_limit)
            .clamp(1, max)
    }
}

/// Draw service component for Shaku DI.
///
/// Holds no per-draw state; concurrent draws share only the random source.
#[derive(Component)]
#[shaku(interface = DrawService)]
pub struct DrawServiceImpl {
    #[shaku(inject)]
    pack_repository: Arc<dyn PackRepository>,
    #[shaku(inject)]
    card_repository: Arc<dyn CardRepository>,
    #[shaku(inject)]
    draw_log_repository: Arc<dyn DrawLogRepository>,
    #[shaku(inject)]
    random_source: Arc<dyn RandomSource>,
    #[shaku(inject)]
    event_publisher: Arc<dyn EventPublisher>,
    settings: DrawSettings,
}

impl DrawServiceImpl {
    /// Creates a draw service with default settings.
    pub fn new(
        pack_repository: Arc<dyn PackRepository>,
        card_repository: Arc<dyn CardRepository>,
        draw_log_repository: Arc<dyn DrawLogRepository>,
        random_source: Arc<dyn RandomSource>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            pack_repository,
            card_repository,
            draw_log_repository,
            random_source,
            event_publisher,
            settings: DrawSettings::default(),
        }
    }

    /// Replaces the settings.
    #[must_use]
    pub fn with_settings(mut self, settings: DrawSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builds the DI parameters from configuration.
    #[must_use]
    pub fn parameters(config: &DrawConfig) -> DrawServiceImplParameters {
        DrawServiceImplParameters {
            settings: DrawSettings::from_config(config),
        }
    }

    async fn find_pack(&self, pack_id: &PackId) -> CardpackResult<Pack> {
        self.pack_repository
            .find_by_id(pack_id)
            .await?
            .ok_or_else(|| CardpackError::not_found("Pack", pack_id))
    }

    async fn persist(&self, log: &DrawLog) -> CardpackResult<()> {
        let inserted = self
            .settings
            .persist_retry
            .execute_if(|| self.draw_log_repository.save(log), CardpackError::is_retriable)
            .await?;

        if !inserted {
            // An earlier attempt landed before its acknowledgement was lost.
            debug!("Draw log already present, treating as persisted");
        }
        Ok(())
    }

    async fn publish(&self, event: DrawCompleted) {
        let event_type = "draw.completed";
        let result = with_timeout(self.settings.publish_timeout, || {
            self.event_publisher.publish(Box::new(event))
        })
        .await;

        match result {
            Ok(()) => debug!(event_type, "Event published"),
            Err(e) => warn!(event_type, error = %e, "Event publication failed; draw stays committed"),
        }
    }
}

/// Orders fetched cards to match `drawn`, repeating duplicates.
fn hydrate(pack_id: &PackId, drawn: &[CardId], cards: Vec<Card>) -> CardpackResult<Vec<Card>> {
    let by_id: HashMap<CardId, Card> = cards.into_iter().map(|card| (card.id, card)).collect();

    drawn
        .iter()
        .map(|id| {
            by_id.get(id).cloned().ok_or_else(|| CardpackError::MissingCard {
                pack_id: pack_id.to_string(),
                card_id: id.get(),
            })
        })
        .collect()
}

#[async_trait]
impl DrawService for DrawServiceImpl {
    #[instrument(skip(self, pack_id), fields(pack_id = %pack_id, log_id = tracing::field::Empty))]
    async fn draw(&self, pack_id: &PackId) -> CardpackResult<DrawResponse> {
        let pack = self.find_pack(pack_id).await?;

        if !pack.is_active() {
            debug!("Pack is inactive");
            return Err(CardpackError::Inactive {
                pack_id: pack_id.to_string(),
            });
        }

        let card_ids = weighted_draw::draw(&pack, self.random_source.as_ref())?;

        let mut log = DrawLog::create(pack_id.clone(), card_ids);
        tracing::Span::current().record("log_id", tracing::field::display(log.id()));

        self.persist(&log).await?;
        info!(cards = log.card_ids().len(), "Draw log persisted");

        let cards = self.card_repository.find_by_ids(log.card_ids()).await?;
        let cards = hydrate(pack_id, log.card_ids(), cards)?;

        for event in log.take_pending_events() {
            self.publish(event).await;
        }

        Ok(DrawResponse {
            log_id: *log.id(),
            pack_id: pack_id.clone(),
            cards: cards.into_iter().map(CardResponse::from).collect(),
        })
    }

    #[instrument(skip(self, pack_id), fields(pack_id = %pack_id))]
    async fn draw_history(
        &self,
        pack_id: &PackId,
        limit: Option<u32>,
    ) -> CardpackResult<DrawHistoryResponse> {
        self.find_pack(pack_id).await?;

        let limit = self.settings.history_limit(limit);
        let logs = self
            .draw_log_repository
            .find_by_pack_id(pack_id, limit)
            .await?;
        let total = self.draw_log_repository.count_by_pack_id(pack_id).await?;
        debug!(limit, total, returned = logs.len(), "Draw history loaded");

        Ok(DrawHistoryResponse {
            pack_id: pack_id.clone(),
            total,
            limit,
            draws: logs.into_iter().map(DrawLogResponse::from).collect(),
        })
    }

    #[instrument(skip(self, pack_id), fields(pack_id = %pack_id))]
    async fn pack_odds(&self, pack_id: &PackId) -> CardpackResult<PackOddsResponse> {
        let pack = self.find_pack(pack_id).await?;
        Ok(PackOddsResponse::from(&pack))
    }
}

impl std::fmt::Debug for DrawServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawServiceImpl")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
