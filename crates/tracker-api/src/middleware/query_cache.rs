//! Installs a fresh permission query cache in every request.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use tracker_search::RequestQueryCache;

use crate::state::AppState;

/// Insert an empty [`RequestQueryCache`] into the request extensions when
/// `search.request_query_cache` is on. The cache is dropped with the request.
pub async fn request_query_cache(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if state.config.search.request_query_cache {
        request
            .extensions_mut()
            .insert(Arc::new(RequestQueryCache::new()));
    }
    next.run(request).await
}
