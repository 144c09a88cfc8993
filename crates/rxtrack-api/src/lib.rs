//! RxTrack API - HTTP surface for pharmacy records
//!
//! This crate exposes the store over REST, including:
//! - CRUD routes for patients, pharmacists, drugs, and prescriptions
//! - Per-parent prescription listings
//! - Domain errors mapped to status codes with stable body codes
//! - Environment-driven configuration and graceful shutdown

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use anyhow::Context;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/patients",
            get(handlers::patients::list).post(handlers::patients::create),
        )
        .route(
            "/patients/:id",
            get(handlers::patients::show)
                .put(handlers::patients::update)
                .delete(handlers::patients::remove),
        )
        .route(
            "/patients/:id/prescriptions",
            get(handlers::patients::prescriptions),
        )
        .route(
            "/pharmacists",
            get(handlers::pharmacists::list).post(handlers::pharmacists::create),
        )
        .route(
            "/pharmacists/:id",
            get(handlers::pharmacists::show)
                .put(handlers::pharmacists::update)
                .delete(handlers::pharmacists::remove),
        )
        .route(
            "/pharmacists/:id/prescriptions",
            get(handlers::pharmacists::prescriptions),
        )
        .route(
            "/drugs",
            get(handlers::drugs::list).post(handlers::drugs::create),
        )
        .route(
            "/drugs/:id",
            get(handlers::drugs::show)
                .put(handlers::drugs::update)
                .delete(handlers::drugs::remove),
        )
        .route(
            "/drugs/:id/prescriptions",
            get(handlers::drugs::prescriptions),
        )
        .route(
            "/prescriptions",
            get(handlers::prescriptions::list).post(handlers::prescriptions::create),
        )
        .route(
            "/prescriptions/:id",
            get(handlers::prescriptions::show)
                .put(handlers::prescriptions::update)
                .delete(handlers::prescriptions::remove),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Open the database, apply pending migrations, and serve until shutdown
///
/// # Errors
/// Fails when the database cannot be opened or migrated, or when the listen
/// address cannot be bound.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    if config.uses_default_secret() {
        warn!("SECRET_KEY not set; using the built-in development value");
    }

    let path = rxtrack_store::db::path_from_uri(&config.db_uri);
    let mut conn = rxtrack_store::db::open(&path)?;
    rxtrack_store::db::configure(&conn)?;
    let applied = rxtrack_store::migrations::apply_migrations(&mut conn)?;
    if applied > 0 {
        info!(applied, "applied pending migrations");
    }

    let app = router(AppState::new(conn));
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to address: {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, db = %path, "serving API");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
