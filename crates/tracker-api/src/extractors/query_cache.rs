//! Access to the per-request permission query cache.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use tracker_search::RequestQueryCache;

/// The cache installed by the query cache middleware, if enabled.
#[derive(Debug, Clone)]
pub struct QueryCache(pub Option<Arc<RequestQueryCache>>);

impl<S: Send + Sync> FromRequestParts<S> for QueryCache {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Arc<RequestQueryCache>>().cloned()))
    }
}
