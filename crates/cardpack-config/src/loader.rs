//! Configuration loader with layered sources.

use crate::{validate_config, AppConfig};
use cardpack_core::CardpackError;
use config::{Config, ConfigError, Environment, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Environment variable prefix for overrides, e.g. `CARDPACK_DRAW__RNG_SEED`.
pub const ENV_PREFIX: &str = "CARDPACK";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `{config_dir}/default.toml` - Default values
    /// 2. `{config_dir}/{environment}.toml` - Environment-specific overrides
    /// 3. `{config_dir}/local.toml` - Local overrides
    /// 4. Environment variables with `CARDPACK_` prefix
    pub fn new(config_dir: impl Into<PathBuf>) -> Result<Self, CardpackError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, CardpackError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    ///
    /// The previous configuration stays in place if the new one is invalid.
    pub async fn reload(&self) -> Result<(), CardpackError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Directory the loader reads from.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    fn load_config(config_dir: &Path) -> Result<AppConfig, CardpackError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var(format!("{}_ENVIRONMENT", ENV_PREFIX))
            .unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = config_dir.join(format!("{}.toml", name));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_cardpack_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_cardpack_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Gets a specific configuration value by dotted key path.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

fn config_error_to_cardpack_error(err: ConfigError) -> CardpackError {
    CardpackError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PublisherKind, StorageBackend};
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    #[tokio::test]
    async fn test_empty_dir_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let loader = ConfigLoader::new(dir.path()).unwrap();
        let config = loader.get().await;

        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.draw.history_max_limit, 100);
    }

    #[tokio::test]
    async fn test_default_file_is_read() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "default.toml",
            r#"
            [draw]
            history_default_limit = 5
            publish_timeout_ms = 250

            [events]
            publisher = "broadcast"
            "#,
        );

        let loader = ConfigLoader::new(dir.path()).unwrap();
        let config = loader.get().await;
        assert_eq!(config.draw.history_default_limit, 5);
        assert_eq!(config.draw.publish_timeout_ms, 250);
        assert_eq!(config.events.publisher, PublisherKind::Broadcast);
    }

    #[tokio::test]
    async fn test_local_overrides_default() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[draw]\nhistory_max_limit = 50\n");
        write(&dir, "local.toml", "[draw]\nhistory_max_limit = 60\n");

        let loader = ConfigLoader::new(dir.path()).unwrap();
        assert_eq!(loader.get().await.draw.history_max_limit, 60);
    }

    #[tokio::test]
    async fn test_invalid_values_fail_fast() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[draw]\npersist_max_attempts = 0\n");

        let err = ConfigLoader::new(dir.path()).err().unwrap();
        assert!(matches!(err, CardpackError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_malformed_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[draw\nbroken");

        assert!(matches!(
            ConfigLoader::new(dir.path()),
            Err(CardpackError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[catalog]\nseed_file = \"a.json\"\n");
        let loader = ConfigLoader::new(dir.path()).unwrap();
        assert_eq!(loader.get().await.catalog.seed_file.as_deref(), Some("a.json"));

        write(&dir, "default.toml", "[catalog]\nseed_file = \"b.json\"\n");
        loader.reload().await.unwrap();
        assert_eq!(loader.get().await.catalog.seed_file.as_deref(), Some("b.json"));
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[catalog]\nseed_file = \"a.json\"\n");
        let loader = ConfigLoader::new(dir.path()).unwrap();

        write(&dir, "default.toml", "[draw]\nhistory_max_limit = 0\n");
        assert!(loader.reload().await.is_err());
        assert_eq!(loader.get().await.catalog.seed_file.as_deref(), Some("a.json"));
    }

    #[tokio::test]
    async fn test_get_value_by_path() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[app]\nname = \"cardpack-test\"\nversion = \"0\"\nenvironment = \"test\"\n");

        let loader = ConfigLoader::new(dir.path()).unwrap();
        let name: Option<String> = loader.get_value("app.name").await;
        assert_eq!(name.as_deref(), Some("cardpack-test"));
        assert!(loader.get_value::<String>("app.missing").await.is_none());
    }
}
