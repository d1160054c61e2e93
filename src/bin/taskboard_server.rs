//! Serves the task board HTTP API over `PostgreSQL`.
//!
//! Usage:
//!
//! ```text
//! taskboard_server [--config <path>] serve
//! taskboard_server [--config <path>] check-config
//! ```
//!
//! The schema is expected to be in place; apply `migrations/` with the Diesel
//! CLI before the first start. `RUST_LOG` overrides the configured log filter.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use mockable::DefaultClock;
use std::sync::Arc;
use taskboard::application::{Adapters, Application};
use taskboard::config::{Config, ConfigError};
use taskboard::http::build_router;
use taskboard::identity::adapters::postgres::{PostgresSessionResolver, PostgresUserRepository};
use taskboard::project::adapters::postgres::PostgresProjectRepository;
use taskboard::task::adapters::postgres::PostgresTaskRepository;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

type PgPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, Parser)]
#[command(version, about = "Project and task board server")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "taskboard.toml")]
    config: Utf8PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server.
    Serve,
    /// Load and validate the configuration, then exit.
    CheckConfig,
}

#[derive(Debug, Error)]
enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build database pool: {0}")]
    Pool(#[from] PoolError),
    #[error("failed to install log subscriber: {0}")]
    Logging(String),
    #[error("server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    init_tracing(&config)?;
    tracing::info!(path = %cli.config, "configuration loaded");

    match cli.command {
        Command::CheckConfig => {
            tracing::info!(
                bind = %config.server.bind_address(),
                pool_size = config.database.pool_size,
                "configuration is valid"
            );
            Ok(())
        }
        Command::Serve => serve(config).await,
    }
}

fn init_tracing(config: &Config) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .map_err(|err| ServerError::Logging(err.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| ServerError::Logging(err.to_string()))
}

fn build_pool(config: &Config) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(config.database.url.as_str());
    Pool::builder()
        .max_size(config.database.pool_size)
        .build(manager)
}

async fn serve(config: Config) -> Result<(), ServerError> {
    let pool = build_pool(&config)?;
    let bind_address = config.server.bind_address();
    let app = Application::new(
        config,
        Adapters {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
            tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
            sessions: Arc::new(PostgresSessionResolver::new(pool)),
            clock: Arc::new(DefaultClock),
        },
    );

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");
    axum::serve(listener, build_router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received Ctrl-C, shutting down"),
        Err(err) => tracing::error!(error = %err, "failed to listen for Ctrl-C"),
    }
}
