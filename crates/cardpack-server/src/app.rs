//! Application builder.

use crate::catalog::Catalog;
use crate::cli::Command;
use crate::di::{
    build_memory_module, build_mysql_module, DatabaseResolver, PublisherSelection,
    ServiceResolver,
};
use cardpack_config::{AppConfig, StorageBackend};
use cardpack_core::{CardpackResult, PackId};
use cardpack_repository::DatabasePoolInterface;
use cardpack_service::{DrawService, EventEnvelope};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Assembled application, ready to run commands.
pub struct App {
    draw_service: Arc<dyn DrawService>,
    database_pool: Option<Arc<dyn DatabasePoolInterface>>,
    events: Option<broadcast::Sender<EventEnvelope>>,
}

impl App {
    /// The draw service.
    #[must_use]
    pub fn draw_service(&self) -> Arc<dyn DrawService> {
        Arc::clone(&self.draw_service)
    }

    /// Subscribes to published events. `None` unless the broadcast publisher is configured.
    #[must_use]
    pub fn subscribe_events(&self) -> Option<broadcast::Receiver<EventEnvelope>> {
        self.events.as_ref().map(broadcast::Sender::subscribe)
    }

    /// Runs one command and returns its JSON result.
    pub async fn execute(&self, command: &Command) -> CardpackResult<serde_json::Value> {
        let pack_id = PackId::parse(command.pack_id())?;

        let value = match command {
            Command::Draw { .. } => serde_json::to_value(self.draw_service.draw(&pack_id).await?)?,
            Command::History { limit, .. } => serde_json::to_value(
                self.draw_service.draw_history(&pack_id, *limit).await?,
            )?,
            Command::Odds { .. } => {
                serde_json::to_value(self.draw_service.pack_odds(&pack_id).await?)?
            }
        };
        Ok(value)
    }

    /// Releases the database pool, if any.
    pub async fn shutdown(&self) {
        if let Some(pool) = &self.database_pool {
            pool.close().await;
        }
    }
}

/// Application builder for constructing the draw engine.
pub struct AppBuilder {
    config: Option<AppConfig>,
    catalog: Option<Catalog>,
}

impl AppBuilder {
    /// Creates a new application builder.
    pub fn new() -> Self {
        Self {
            config: None,
            catalog: None,
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Seeds the in-memory backend directly instead of reading `catalog.seed_file`.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Wires the configured backend and publisher.
    pub async fn build(self) -> CardpackResult<App> {
        let config = self.config.unwrap_or_default();
        let selection = PublisherSelection::from_config(&config.events);

        match config.database.backend {
            StorageBackend::Memory => {
                let catalog = match (self.catalog, &config.catalog.seed_file) {
                    (Some(catalog), _) => catalog,
                    (None, Some(path)) => Catalog::load(path)?,
                    (None, None) => {
                        warn!("No catalog seed file configured, starting with an empty catalog");
                        Catalog::default()
                    }
                };

                let module = build_memory_module(catalog, &config.draw, selection.publisher);
                info!("In-memory backend ready");

                Ok(App {
                    draw_service: module.draw_service(),
                    database_pool: None,
                    events: selection.sender,
                })
            }
            StorageBackend::Mysql => {
                let module =
                    build_mysql_module(&config.database, &config.draw, selection.publisher)
                        .await?;
                let pool = module.database_pool();

                if config.database.run_migrations {
                    pool.run_migrations().await?;
                }
                pool.health_check().await?;
                info!("MySQL backend ready");

                Ok(App {
                    draw_service: module.draw_service(),
                    database_pool: Some(pool),
                    events: selection.sender,
                })
            }
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardpack_config::PublisherKind;
    use cardpack_core::CardpackError;

    const CATALOG: &str = r#"{
        "cards": [{ "id": 1, "name": "Slime", "rarity": "common" }],
        "packs": [
            { "id": "starter", "name": "Starter", "cost": 10, "cards_per_pack": 3,
              "rates": [{ "card_id": 1, "weight": 1 }] }
        ]
    }"#;

    fn draw(pack: &str) -> Command {
        Command::Draw {
            pack_id: pack.to_string(),
        }
    }

    #[test]
    fn test_app_builder_new() {
        let builder = AppBuilder::new();
        assert!(builder.config.is_none());
        assert!(builder.catalog.is_none());
    }

    #[tokio::test]
    async fn test_default_config_builds_empty_memory_app() {
        let app = AppBuilder::default().build().await.unwrap();
        let err = app.execute(&draw("starter")).await.unwrap_err();
        assert!(matches!(err, CardpackError::NotFound { .. }));
        assert!(app.subscribe_events().is_none());
    }

    #[tokio::test]
    async fn test_draw_history_and_odds_commands() {
        let app = AppBuilder::new()
            .with_catalog(Catalog::from_json(CATALOG).unwrap())
            .build()
            .await
            .unwrap();

        let drawn = app.execute(&draw("starter")).await.unwrap();
        assert_eq!(drawn["cards"].as_array().unwrap().len(), 3);

        let history = app
            .execute(&Command::History {
                pack_id: "starter".to_string(),
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(history["total"], 1);
        assert_eq!(history["draws"][0]["log_id"], drawn["log_id"]);

        let odds = app
            .execute(&Command::Odds {
                pack_id: "starter".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(odds["total_weight"], 1);
    }

    #[tokio::test]
    async fn test_padded_pack_id_resolves_to_canonical_key() {
        let app = AppBuilder::new()
            .with_catalog(Catalog::from_json(CATALOG).unwrap())
            .build()
            .await
            .unwrap();

        let drawn = app.execute(&draw("  starter ")).await.unwrap();
        assert_eq!(drawn["pack_id"], "starter");

        let history = app
            .execute(&Command::History {
                pack_id: "starter".to_string(),
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(history["total"], 1);
    }

    #[tokio::test]
    async fn test_blank_pack_id_is_rejected() {
        let app = AppBuilder::new().build().await.unwrap();
        let err = app.execute(&draw("   ")).await.unwrap_err();
        assert!(matches!(err, CardpackError::Validation(_)));
    }

    #[tokio::test]
    async fn test_seed_file_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, CATALOG).unwrap();

        let mut config = AppConfig::default();
        config.catalog.seed_file = Some(path.to_string_lossy().into_owned());
        config.events.publisher = PublisherKind::Broadcast;

        let app = AppBuilder::new().with_config(config).build().await.unwrap();
        let mut rx = app.subscribe_events().unwrap();

        app.execute(&draw("starter")).await.unwrap();
        assert_eq!(rx.recv().await.unwrap().event_type, "draw.completed");
    }
}
