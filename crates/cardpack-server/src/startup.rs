//! Startup utilities.

use cardpack_config::AppConfig;
use cardpack_core::{init_logging, CardpackResult};
use tracing::debug;

/// Installs logging from the observability section.
pub fn init_observability(config: &AppConfig) -> CardpackResult<()> {
    init_logging(&config.observability.logging_config())
}

/// Logs the effective configuration summary.
pub fn log_startup_info(config: &AppConfig) {
    debug!(
        app = %config.app.name,
        version = %config.app.version,
        environment = %config.app.environment,
        backend = ?config.database.backend,
        publisher = ?config.events.publisher,
        seeded_rng = config.draw.rng_seed.is_some(),
        "Starting cardpack"
    );
}
