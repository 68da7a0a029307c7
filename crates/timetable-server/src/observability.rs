//! Tracing subscriber setup.

use timetable_config::ObservabilityConfig;
use timetable_core::{TimetableError, TimetableResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives used when `RUST_LOG` is not set.
pub fn default_directives(log_level: &str) -> String {
    format!("{log_level},timetable=debug,tower_http=debug,sqlx=warn")
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_logging(config: &ObservabilityConfig) -> TimetableResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(&config.log_level)).map_err(|e| {
            TimetableError::Configuration(format!(
                "Invalid log level '{}': {}",
                config.log_level, e
            ))
        })?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    result.map_err(|e| TimetableError::internal(format!("Failed to initialize logging: {}", e)))
}
