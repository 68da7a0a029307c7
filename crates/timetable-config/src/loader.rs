//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use timetable_core::TimetableError;
use tracing::{debug, info};

/// Prefix for environment variable overrides (`TIMETABLE__SERVER__REST_PORT`).
pub const ENV_PREFIX: &str = "TIMETABLE";

/// Layered configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `TIMETABLE__` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, TimetableError> {
        let config = Self::load_config(&config_dir.into())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, TimetableError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, TimetableError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("TIMETABLE_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_timetable_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_timetable_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    fn validate_config(config: &AppConfig) -> Result<(), TimetableError> {
        ConfigValidator::validate(config)
            .map_err(|errors| TimetableError::Configuration(format_validation_errors(&errors)))
    }
}

fn config_error_to_timetable_error(err: ConfigError) -> TimetableError {
    TimetableError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    fn loader_for(dir: &TempDir) -> Result<ConfigLoader, TimetableError> {
        ConfigLoader::new(dir.path().to_string_lossy().to_string())
    }

    #[test]
    fn test_empty_directory_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let loader = loader_for(&dir).unwrap();

        let config = loader.get();
        assert_eq!(config.server.rest_port, 8080);
        assert_eq!(config.external_api.semester_start, "09.02.2025");
    }

    #[test]
    fn test_local_overrides_default() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "default.toml",
            "[server]\nrest_port = 8081\n\n[cache]\ncapacity = 500\n",
        );
        write(&dir, "local.toml", "[server]\nrest_port = 9090\n");

        let loader = loader_for(&dir).unwrap();
        let config = loader.get();

        assert_eq!(config.server.rest_port, 9090);
        assert_eq!(config.cache.capacity, 500);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[external_api]\nsemester_start = \"not-a-date\"\n");

        match loader_for(&dir) {
            Err(TimetableError::Configuration(msg)) => {
                assert!(msg.contains("semester start"));
            }
            Err(other) => panic!("Expected Configuration error, got {other:?}"),
            Ok(_) => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_environment_file_overrides_default() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[external_api]\ntimeout_secs = 10\nsemester_start = \"01.09.2025\"\n");
        write(&dir, "development.toml", "[external_api]\ntimeout_secs = 20\n");

        let config = loader_for(&dir).unwrap().into_config();

        assert_eq!(config.external_api.timeout_secs, 20);
        assert_eq!(config.external_api.semester_start, "01.09.2025");
    }
}
