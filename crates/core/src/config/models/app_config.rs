use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{
    api_observability::{ApiConfig, ObservabilityConfig},
    database::DatabaseConfig,
    security::SecurityConfig,
};

const DEFAULT_CONFIG_PATHS: [&str; 2] = ["config/taskboard.toml", "taskboard.toml"];

/// System configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from config file and environment variables
    ///
    /// Load order:
    /// 1. Default configuration
    /// 2. Config file (TOML format)
    /// 3. Environment variable overrides (prefix: TASKBOARD_, nested keys split by `__`)
    ///
    /// An explicit `config_path` must exist; without one the default paths are
    /// tried and silently skipped when absent.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = ConfigBuilder::builder()
            .set_default("database.url", defaults.database.url)?
            .set_default(
                "database.max_connections",
                i64::from(defaults.database.max_connections),
            )?
            .set_default(
                "database.min_connections",
                i64::from(defaults.database.min_connections),
            )?
            .set_default(
                "database.connection_timeout_seconds",
                defaults.database.connection_timeout_seconds as i64,
            )?
            .set_default(
                "database.idle_timeout_seconds",
                defaults.database.idle_timeout_seconds as i64,
            )?
            .set_default("database.run_migrations", defaults.database.run_migrations)?
            .set_default("api.bind_address", defaults.api.bind_address)?
            .set_default("api.cors_origins", defaults.api.cors_origins)?
            .set_default(
                "api.request_timeout_seconds",
                defaults.api.request_timeout_seconds as i64,
            )?
            .set_default(
                "api.max_request_size_mb",
                defaults.api.max_request_size_mb as i64,
            )?
            .set_default(
                "security.password_hash_cost",
                i64::from(defaults.security.password_hash_cost),
            )?
            .set_default("observability.log_level", defaults.observability.log_level)?
            .set_default(
                "observability.log_format",
                defaults.observability.log_format.as_str(),
            )?;

        if let Some(path) = config_path {
            if !Path::new(path).exists() {
                return Err(anyhow::anyhow!("config file not found: {}", path));
            }
            builder = builder.add_source(File::new(path, FileFormat::Toml));
        } else if let Some(path) = DEFAULT_CONFIG_PATHS
            .iter()
            .find(|path| Path::new(path).exists())
        {
            builder = builder.add_source(File::new(path, FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("TASKBOARD")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("api.cors_origins")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .context("failed to build configuration")?
            .try_deserialize()
            .context("failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_str).context("failed to parse TOML config")?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config as TOML")
    }

    pub fn validate(&self) -> Result<()> {
        self.database
            .validate()
            .context("invalid database configuration")?;
        self.api.validate().context("invalid api configuration")?;
        self.security
            .validate()
            .context("invalid security configuration")?;
        self.observability
            .validate()
            .context("invalid observability configuration")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogFormat;
    use std::io::Write;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.api.bind_address, "0.0.0.0:5000");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&toml_str).unwrap();

        assert_eq!(parsed.database.url, config.database.url);
        assert_eq!(parsed.api.cors_origins, config.api.cors_origins);
        assert_eq!(parsed.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_from_toml_rejects_invalid_cost() {
        let mut config = AppConfig::default();
        config.security.password_hash_cost = 2;
        let toml_str = config.to_toml().unwrap();
        assert!(AppConfig::from_toml(&toml_str).is_err());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = AppConfig::load(Some("/nonexistent/taskboard.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[database]
url = "sqlite::memory:"
max_connections = 1

[api]
cors_origins = ["https://tasks.example.com"]
"#
        )
        .unwrap();

        let config = AppConfig::load(file.path().to_str()).unwrap();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 1);
        assert_eq!(config.database.connection_timeout_seconds, 30);
        assert_eq!(config.api.cors_origins, vec!["https://tasks.example.com"]);
        assert_eq!(config.api.bind_address, "0.0.0.0:5000");
    }
}
