//! Portal Server: accounts, email verification, and billing plans.
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use portal_api::{AppState, build_app};
use portal_core::config::AppConfig;
use portal_core::error::AppError;
use portal_database::{
    DatabasePool, MemoryPlanRepository, MemoryUserRepository, PgPlanRepository, PgUserRepository,
    PlanRepository, UserRepository,
};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load layered configuration for `PORTAL_ENV` (default `development`).
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("PORTAL_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting portal v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Repositories ─────────────────────────────────────
    let users: Arc<dyn UserRepository>;
    let plans: Arc<dyn PlanRepository>;
    let db_pool = if config.database.is_memory() {
        tracing::warn!("Using in-memory repositories; data is lost on exit");
        users = Arc::new(MemoryUserRepository::new());
        plans = Arc::new(MemoryPlanRepository::new());
        None
    } else {
        tracing::info!("Connecting to database...");
        let db_pool = DatabasePool::connect(&config.database).await?;

        if config.database.run_migrations {
            tracing::info!("Running database migrations...");
            portal_database::migration::run_migrations(db_pool.pool()).await?;
            tracing::info!("Database migrations complete");
        }

        users = Arc::new(PgUserRepository::new(db_pool.pool().clone()));
        plans = Arc::new(PgPlanRepository::new(db_pool.pool().clone()));
        Some(db_pool)
    };

    // ── Step 2: State and background tasks ───────────────────────
    let sweep_every = Duration::from_secs(config.rate_limit.sweep_interval_seconds.max(1));
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::new(config, users, plans)?;
    let sweeper = state.rate_limits.spawn_sweeper(sweep_every);

    // ── Step 3: HTTP server ──────────────────────────────────────
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Portal server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 4: Cleanup ──────────────────────────────────────────
    sweeper.abort();
    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("Portal server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
