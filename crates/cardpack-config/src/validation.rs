//! Configuration validation module.
//!
//! Collects every invalid value in one pass so startup fails with the
//! complete list rather than the first problem found.

use crate::{AppConfig, StorageBackend};
use cardpack_core::{CardpackError, CardpackResult};
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// Pool size exceeds maximum allowed.
    PoolSizeTooLarge { value: u32, maximum: u32 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String, value: u64 },
    /// A count that must be at least one is zero.
    ZeroValue { name: String },
    /// The default history page is larger than the maximum.
    HistoryLimitOrder { default: u32, maximum: u32 },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPoolSize { min, max } => {
                write!(
                    f,
                    "Invalid pool size: min ({}) cannot be greater than max ({})",
                    min, max
                )
            }
            Self::PoolSizeTooLarge { value, maximum } => {
                write!(f, "Pool size {} exceeds maximum allowed ({})", value, maximum)
            }
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::NonPositiveTimeout { name, value } => {
                write!(f, "Timeout '{}' must be positive, got {}", name, value)
            }
            Self::ZeroValue { name } => write!(f, "'{}' must be at least 1", name),
            Self::HistoryLimitOrder { default, maximum } => {
                write!(
                    f,
                    "History default limit ({}) cannot exceed the maximum ({})",
                    default, maximum
                )
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: u32 = 1000;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_database(&config.database, &mut errors);
        Self::validate_draw(&config.draw, &mut errors);
        Self::validate_events(&config.events, &mut errors);
        Self::validate_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_database(config: &crate::DatabaseConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.backend != StorageBackend::Mysql {
            return;
        }

        match Url::parse(&config.url) {
            Ok(url) if url.scheme() == "mysql" => {}
            Ok(url) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: format!("unsupported scheme '{}', expected mysql://", url.scheme()),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: e.to_string(),
            }),
        }

        if config.min_connections > config.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: config.min_connections,
                max: config.max_connections,
            });
        }
        if config.max_connections > Self::MAX_POOL_SIZE {
            errors.push(ConfigValidationError::PoolSizeTooLarge {
                value: config.max_connections,
                maximum: Self::MAX_POOL_SIZE,
            });
        }
        if config.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_draw(config: &crate::DrawConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.persist_max_attempts == 0 {
            errors.push(ConfigValidationError::ZeroValue {
                name: "draw.persist_max_attempts".to_string(),
            });
        }
        if config.publish_timeout_ms == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "draw.publish_timeout_ms".to_string(),
                value: 0,
            });
        }
        if config.history_max_limit == 0 {
            errors.push(ConfigValidationError::ZeroValue {
                name: "draw.history_max_limit".to_string(),
            });
        }
        if config.history_default_limit == 0 {
            errors.push(ConfigValidationError::ZeroValue {
                name: "draw.history_default_limit".to_string(),
            });
        }
        if config.history_default_limit > config.history_max_limit {
            errors.push(ConfigValidationError::HistoryLimitOrder {
                default: config.history_default_limit,
                maximum: config.history_max_limit,
            });
        }
    }

    fn validate_events(config: &crate::EventsConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.broadcast_capacity == 0 {
            errors.push(ConfigValidationError::ZeroValue {
                name: "events.broadcast_capacity".to_string(),
            });
        }
    }

    fn validate_observability(
        config: &crate::ObservabilityConfig,
        errors: &mut Vec<ConfigValidationError>,
    ) {
        let level = config.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}

/// Validates `config`, folding every problem into one configuration error.
pub fn validate_config(config: &AppConfig) -> CardpackResult<()> {
    ConfigValidator::validate(config)
        .map_err(|errors| CardpackError::configuration(format_validation_errors(&errors)))
}
