use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use taskboard_core::{init_logging, AppConfig, LogFormat};
use tokio::signal;
use tracing::{error, info, warn};

mod app;
mod shutdown;

use app::Application;
use shutdown::ShutdownManager;

const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(30);

fn cli() -> Command {
    Command::new("taskboard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Task management backend: users, executors and tasks")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to a TOML configuration file"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (overrides configuration)")
                .value_parser(["trace", "debug", "info", "warn", "error"]),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_name("FORMAT")
                .help("Log output format (overrides configuration)")
                .value_parser(["json", "pretty"]),
        )
        .arg(
            Arg::new("bind")
                .long("bind")
                .value_name("ADDR")
                .help("HTTP bind address, e.g. 0.0.0.0:5000"),
        )
        .arg(
            Arg::new("database-url")
                .long("database-url")
                .value_name("URL")
                .help("PostgreSQL or SQLite connection URL"),
        )
        .arg(
            Arg::new("skip-migrations")
                .long("skip-migrations")
                .help("Do not run database migrations at startup")
                .action(ArgAction::SetTrue),
        )
}

/// Command-line values win over file and environment configuration.
fn apply_cli_overrides(config: &mut AppConfig, matches: &ArgMatches) -> Result<()> {
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.observability.log_level = level.clone();
    }
    if let Some(format) = matches.get_one::<String>("log-format") {
        config.observability.log_format = format.parse::<LogFormat>()?;
    }
    if let Some(bind) = matches.get_one::<String>("bind") {
        config.api.bind_address = bind.clone();
    }
    if let Some(url) = matches.get_one::<String>("database-url") {
        config.database.url = url.clone();
    }
    if matches.get_flag("skip-migrations") {
        config.database.run_migrations = false;
    }
    config.validate()
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    let config_path = matches.get_one::<String>("config").map(String::as_str);

    let mut config = AppConfig::load(config_path).with_context(|| match config_path {
        Some(path) => format!("failed to load configuration from {path}"),
        None => "failed to load configuration".to_string(),
    })?;
    apply_cli_overrides(&mut config, &matches).context("invalid configuration")?;

    init_logging(
        &config.observability.log_level,
        config.observability.log_format,
    )?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting taskboard");
    if let Some(path) = config_path {
        info!(config = path, "Configuration file loaded");
    }

    let app = Arc::new(Application::new(config).await?);
    let shutdown_manager = ShutdownManager::new();

    let mut app_handle = {
        let app = Arc::clone(&app);
        let shutdown_rx = shutdown_manager.subscribe();
        tokio::spawn(async move { app.run(shutdown_rx).await })
    };

    tokio::select! {
        _ = wait_for_shutdown_signal() => {
            info!("Shutdown signal received, stopping gracefully");
            shutdown_manager.shutdown();

            match tokio::time::timeout(SHUTDOWN_GRACE_PERIOD, &mut app_handle).await {
                Ok(Ok(Ok(()))) => info!("Application stopped"),
                Ok(Ok(Err(e))) => error!(error = %e, "Application stopped with an error"),
                Ok(Err(e)) => error!(error = %e, "Application task panicked"),
                Err(_) => warn!("Graceful shutdown timed out, exiting"),
            }
        }
        result = &mut app_handle => {
            match result {
                Ok(Ok(())) => info!("Application exited"),
                Ok(Err(e)) => {
                    error!(error = %e, "Application failed");
                    return Err(e);
                }
                Err(e) => return Err(e).context("application task panicked"),
            }
        }
    }

    info!("Taskboard exited");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
