//! Analytics Event Shape

use serde::{Deserialize, Serialize};

/// One completed search. Posted verbatim to the store's analytics procedure,
/// which expects the normalized query under the `expanded_query` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub original_query: String,
    #[serde(rename = "expanded_query")]
    pub normalized_query: String,
    pub user_id: String,
    pub results_count: usize,
    pub response_time_ms: u64,
}
