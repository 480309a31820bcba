use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub bind_address: String,
    /// Allowed CORS origins; `*` mirrors whatever origin the request carries.
    pub cors_origins: Vec<String>,
    pub request_timeout_seconds: u64,
    pub max_request_size_mb: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
            request_timeout_seconds: 30,
            max_request_size_mb: 10,
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_address.is_empty() {
            return Err(anyhow::anyhow!("bind_address must not be empty"));
        }
        if !self.bind_address.contains(':') {
            return Err(anyhow::anyhow!("bind_address must be in host:port form"));
        }

        if self.cors_origins.is_empty() {
            return Err(anyhow::anyhow!("at least one CORS origin is required"));
        }
        if self.cors_origins.iter().any(|origin| origin.trim().is_empty()) {
            return Err(anyhow::anyhow!("CORS origins must not be blank"));
        }

        if self.request_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("request_timeout_seconds must be greater than 0"));
        }

        if self.max_request_size_mb == 0 {
            return Err(anyhow::anyhow!("max_request_size_mb must be greater than 0"));
        }

        Ok(())
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl ObservabilityConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(anyhow::anyhow!(
                "unsupported log level: {}, expected one of {:?}",
                self.log_level,
                LEVELS
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_validation() {
        assert!(ApiConfig::default().validate().is_ok());

        let config = ApiConfig {
            bind_address: "localhost".to_string(),
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ApiConfig {
            cors_origins: vec![],
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wildcard_origin_detection() {
        let config = ApiConfig {
            cors_origins: vec!["https://app.example.com".to_string(), "*".to_string()],
            ..ApiConfig::default()
        };
        assert!(config.allows_any_origin());
        assert!(!ApiConfig::default().allows_any_origin());
    }

    #[test]
    fn test_observability_log_level() {
        assert!(ObservabilityConfig::default().validate().is_ok());
        let config = ObservabilityConfig {
            log_level: "verbose".to_string(),
            ..ObservabilityConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
