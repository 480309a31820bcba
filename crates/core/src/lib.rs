pub mod config;
pub mod errors;
pub mod logging;

pub use config::models::{
    ApiConfig, AppConfig, DatabaseConfig, ObservabilityConfig, SecurityConfig,
};
pub use errors::*;
pub use logging::{init_logging, LogFormat};
