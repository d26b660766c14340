//! # tracker-api
//!
//! HTTP API layer for the tracker built on Axum.
//!
//! Provides the REST endpoints under `/rest/api/2`, middleware (request
//! logging, per-request query cache, CORS), extractors, DTOs, and the
//! mapping from [`AppError`](tracker_core::AppError) to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
