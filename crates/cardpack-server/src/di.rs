//! Dependency injection modules using Shaku.
//!
//! - `MemoryModule`: in-memory repositories seeded from the catalog file
//! - `MySqlModule`: MySQL repositories over a shared connection pool
//!
//! Both register the tracing publisher; the broadcast publisher replaces it
//! through a component override when configured.

use crate::catalog::Catalog;
use cardpack_config::{DatabaseConfig, DrawConfig, EventsConfig, PublisherKind};
use cardpack_core::{CardpackResult, EventPublisher};
use cardpack_domain::{ChaChaRandomSource, RandomSource};
use cardpack_repository::{
    DatabasePool, DatabasePoolInterface, InMemoryCardRepository, InMemoryDrawLogRepository,
    InMemoryPackRepository, MySqlCardRepository, MySqlDrawLogRepository, MySqlPackRepository,
};
use cardpack_service::{
    BroadcastEventPublisher, DrawService, DrawServiceImpl, EventEnvelope, TracingEventPublisher,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tokio::sync::broadcast;

// ============================================================================
// Shaku Module Definitions
// ============================================================================

// Process-local deployment. Packs and cards come from the catalog seed;
// draw logs live for the lifetime of the process.
module! {
    pub MemoryModule {
        components = [
            InMemoryPackRepository,
            InMemoryCardRepository,
            InMemoryDrawLogRepository,
            ChaChaRandomSource,
            TracingEventPublisher,
            DrawServiceImpl,
        ],
        providers = [],
    }
}

// MySQL deployment. All three repositories share one pool.
module! {
    pub MySqlModule {
        components = [
            DatabasePool,
            MySqlPackRepository,
            MySqlCardRepository,
            MySqlDrawLogRepository,
            ChaChaRandomSource,
            TracingEventPublisher,
            DrawServiceImpl,
        ],
        providers = [],
    }
}

// ============================================================================
// Module Builders
// ============================================================================

/// Publisher selected by configuration.
///
/// `sender` is set for the broadcast publisher so callers can subscribe.
pub struct PublisherSelection {
    pub publisher: Option<Box<dyn EventPublisher>>,
    pub sender: Option<broadcast::Sender<EventEnvelope>>,
}

impl PublisherSelection {
    /// Resolves the configured publisher. `None` keeps the module default.
    #[must_use]
    pub fn from_config(config: &EventsConfig) -> Self {
        match config.publisher {
            PublisherKind::Tracing => Self {
                publisher: None,
                sender: None,
            },
            PublisherKind::Broadcast => {
                let (sender, _) = broadcast::channel(config.broadcast_capacity.max(1));
                Self {
                    publisher: Some(Box::new(BroadcastEventPublisher::with_sender(
                        sender.clone(),
                    ))),
                    sender: Some(sender),
                }
            }
        }
    }
}

/// Builds the in-memory module around a catalog.
pub fn build_memory_module(
    catalog: Catalog,
    draw_config: &DrawConfig,
    publisher: Option<Box<dyn EventPublisher>>,
) -> Arc<MemoryModule> {
    let mut builder = MemoryModule::builder()
        .with_component_parameters::<InMemoryPackRepository>(InMemoryPackRepository::parameters(
            catalog.packs,
        ))
        .with_component_parameters::<InMemoryCardRepository>(InMemoryCardRepository::parameters(
            catalog.cards,
        ))
        .with_component_parameters::<ChaChaRandomSource>(ChaChaRandomSource::parameters(
            draw_config.rng_seed,
        ))
        .with_component_parameters::<DrawServiceImpl>(DrawServiceImpl::parameters(draw_config));

    if let Some(publisher) = publisher {
        builder = builder.with_component_override::<dyn EventPublisher>(publisher);
    }

    Arc::new(builder.build())
}

/// Connects to MySQL and builds the module around the pool.
pub async fn build_mysql_module(
    db_config: &DatabaseConfig,
    draw_config: &DrawConfig,
    publisher: Option<Box<dyn EventPublisher>>,
) -> CardpackResult<Arc<MySqlModule>> {
    let db_pool = DatabasePool::connect(db_config).await?;

    let mut builder = MySqlModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePool::parameters(
            db_pool.inner().clone(),
        ))
        .with_component_parameters::<ChaChaRandomSource>(ChaChaRandomSource::parameters(
            draw_config.rng_seed,
        ))
        .with_component_parameters::<DrawServiceImpl>(DrawServiceImpl::parameters(draw_config));

    if let Some(publisher) = publisher {
        builder = builder.with_component_override::<dyn EventPublisher>(publisher);
    }

    Ok(Arc::new(builder.build()))
}

// ============================================================================
// Module Resolution Helpers
// ============================================================================

/// Trait for resolving the draw service from any module.
pub trait ServiceResolver {
    /// Resolves the draw service from the module.
    fn draw_service(&self) -> Arc<dyn DrawService>;

    /// Resolves the event publisher from the module.
    fn event_publisher(&self) -> Arc<dyn EventPublisher>;

    /// Resolves the random source from the module.
    fn random_source(&self) -> Arc<dyn RandomSource>;
}

impl ServiceResolver for MemoryModule {
    fn draw_service(&self) -> Arc<dyn DrawService> {
        self.resolve()
    }

    fn event_publisher(&self) -> Arc<dyn EventPublisher> {
        self.resolve()
    }

    fn random_source(&self) -> Arc<dyn RandomSource> {
        self.resolve()
    }
}

impl ServiceResolver for MySqlModule {
    fn draw_service(&self) -> Arc<dyn DrawService> {
        self.resolve()
    }

    fn event_publisher(&self) -> Arc<dyn EventPublisher> {
        self.resolve()
    }

    fn random_source(&self) -> Arc<dyn RandomSource> {
        self.resolve()
    }
}

/// Trait for resolving the database pool from modules that have it.
pub trait DatabaseResolver {
    /// Resolves the database pool from the module.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
}

impl DatabaseResolver for MySqlModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}
