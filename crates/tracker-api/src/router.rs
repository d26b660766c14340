//! Route definitions for the tracker HTTP API.
//!
//! All routes are mounted under `/rest/api/2`. The router receives
//! `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// REST API prefix.
pub const API_PREFIX: &str = "/rest/api/2";

/// Build the Axum router with all routes and request-scoped middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(permission_routes())
        .merge(auditing_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new()
        .nest(API_PREFIX, api_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::query_cache::request_query_cache,
        ))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Permission-scoped search query
fn permission_routes() -> Router<AppState> {
    Router::new().route(
        "/permission-query",
        get(handlers::permission::get_permission_query),
    )
}

/// Audit log
fn auditing_routes() -> Router<AppState> {
    Router::new().route(
        "/auditing/record",
        get(handlers::audit::list_records).post(handlers::audit::create_record),
    )
}

/// Administration
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/bulk-mail", post(handlers::admin::mail::send_bulk_mail))
        .route(
            "/admin/scheme-event",
            post(handlers::admin::scheme::record_scheme_event),
        )
}

/// Health
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
