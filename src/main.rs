use anyhow::Context;
use car_inventory_api::config::Config;
use car_inventory_api::constants::API_NAME;
use car_inventory_api::repository::CarRepository;
use car_inventory_api::{create_app, AppState};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("{} Starting Car Inventory API server on port {}", API_NAME, config.server_port);

    // Make sure the database file's directory exists
    if let Some(parent) = Path::new(&config.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }
    }

    // Open the SQLite store on a single connection so all statements
    // are serialized through it
    let options = SqliteConnectOptions::new()
        .filename(&config.database_path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .context("Failed to open database")?;

    tracing::info!("{} Connected to database at {}", API_NAME, config.database_path);

    // Initialize repository and schema
    let repository = CarRepository::new(pool);
    repository
        .initialize()
        .await
        .context("Failed to initialize database schema")?;

    // Build application router
    let state = AppState {
        repo: repository,
        config: Arc::new(config.clone()),
    };
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("{} Server listening on {}", API_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
