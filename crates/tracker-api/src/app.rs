//! Application builder: wires router, middleware, and state into an Axum
//! app, and runs the server.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use tracker_core::config::AppConfig;
use tracker_core::error::AppError;
use tracker_database::connection::DatabasePool;
use tracker_mail::{MailTransport, SmtpMailSender};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = state.config.server.clone();
    build_router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_seconds,
        )))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&server.cors))
        .layer(TraceLayer::new_for_http())
}

/// Runs the tracker server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, database: DatabasePool) -> Result<(), AppError> {
    tracing::info!("Starting tracker server...");

    // ── Step 1: Mail transport ───────────────────────────────────
    let transport: Option<Arc<dyn MailTransport>> = if config.mail.enabled {
        Some(Arc::new(SmtpMailSender::new(&config.mail)?))
    } else {
        tracing::warn!("No mail server configured; bulk mail is disabled");
        None
    };

    // ── Step 2: Services ─────────────────────────────────────────
    let stores = database.stores();
    let state = AppState::new(config, stores, transport, Some(database.clone()));

    // ── Step 3: Serve ────────────────────────────────────────────
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let grace = Duration::from_secs(state.config.server.shutdown_grace_seconds);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(%addr, "Tracker server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!(grace_seconds = grace.as_secs(), "Closing database pool");
    if tokio::time::timeout(grace, database.close()).await.is_err() {
        tracing::warn!("Database pool did not close within the grace period");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
