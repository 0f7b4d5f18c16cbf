use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use restring_api::config::ServerConfig;
use restring_api::router::build_app_router;
use restring_api::state::AppState;
use restring_db::repositories::CatalogRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "restring_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = restring_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    restring_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    restring_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Catalog snapshots (one load per process; restart to refresh) ---
    let string_catalog = CatalogRepo::load_string_catalog(&pool)
        .await
        .context("Failed to load string catalog")?;
    let racquet_catalog = CatalogRepo::load_racquet_catalog(&pool)
        .await
        .context("Failed to load racquet catalog")?;
    tracing::info!("Catalog snapshots loaded");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        string_catalog: Arc::new(string_catalog),
        racquet_catalog: Arc::new(racquet_catalog),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid HOST/PORT combination")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
