use std::sync::Arc;

use anyhow::{Context, Result};
use taskboard_api::{create_app, AppState};
use taskboard_core::AppConfig;
use taskboard_infrastructure::{DatabaseManager, PasswordHasher};
use tokio::{net::TcpListener, sync::broadcast};
use tracing::info;

pub struct Application {
    config: AppConfig,
    database: Arc<DatabaseManager>,
}

impl Application {
    /// Connects to the database and applies migrations unless disabled.
    pub async fn new(config: AppConfig) -> Result<Self> {
        info!(url = %config.database.masked_url(), "Connecting to database");

        let hasher = PasswordHasher::new(config.security.password_hash_cost);
        let database = DatabaseManager::new(&config.database, hasher)
            .await
            .context("failed to connect to database")?;

        if config.database.run_migrations {
            database
                .migrate()
                .await
                .context("failed to run database migrations")?;
        } else {
            info!("Database migrations skipped");
        }

        Ok(Self {
            config,
            database: Arc::new(database),
        })
    }

    /// Serves HTTP until a shutdown signal arrives, then closes the pool.
    pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        let app = create_app(
            AppState::from_database(Arc::clone(&self.database)),
            &self.config.api,
        );

        let listener = TcpListener::bind(&self.config.api.bind_address)
            .await
            .with_context(|| format!("failed to bind {}", self.config.api.bind_address))?;
        info!(
            address = %self.config.api.bind_address,
            database = self.database.database_type().as_str(),
            "HTTP server listening"
        );

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("HTTP server draining connections");
            })
            .await
            .context("HTTP server failed");

        self.database.close().await;
        info!("Database pool closed");
        served
    }
}
