//! # Configuration
//!
//! Process-level configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`GLAZIER_*`, e.g. `GLAZIER_DATABASE_PATH`)
//! 2. Config file (`glazier.toml`, or the path given with `--config`)
//! 3. Defaults (this file)
//!
//! Shop settings (rates, name, logo) are not configuration: they live in the
//! database and are edited with `glazier settings`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use glazier_core::quotation::DEFAULT_VALIDITY_DAYS;

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "glazier.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "GLAZIER";

/// Default tracing filter. `RUST_LOG` takes precedence.
pub const DEFAULT_LOG_FILTER: &str = "warn,glazier=info,sqlx=warn";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file. `None` uses the platform data directory.
    pub database_path: Option<PathBuf>,

    /// tracing-subscriber filter directive
    pub log_filter: String,

    /// Days a printed quotation stays valid
    pub quotation_validity_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            quotation_validity_days: DEFAULT_VALIDITY_DAYS,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `path` (when given) or `glazier.toml`, then
    /// the environment.
    ///
    /// An explicitly named file must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        config.try_deserialize()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.database_path, None);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.quotation_validity_days, 7);
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("glazier-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("glazier.toml");
        std::fs::write(
            &path,
            "database_path = \"/tmp/quotes.db\"\nquotation_validity_days = 15\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/quotes.db")));
        assert_eq!(config.quotation_validity_days, 15);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let missing = Path::new("/nonexistent/glazier.toml");
        assert!(AppConfig::load(Some(missing)).is_err());
    }
}
