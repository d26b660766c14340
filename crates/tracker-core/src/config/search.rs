//! Search and permission-query configuration.

use serde::{Deserialize, Serialize};

/// Settings for permission-scoped search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Reuse permission queries within a single request.
    #[serde(default = "default_true")]
    pub request_query_cache: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            request_query_cache: true,
        }
    }
}

fn default_true() -> bool {
    true
}
