//! Search Analytics Recording

use super::types::AnalyticsEvent;
use crate::store::types::StoreError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Write seam for completed-search events.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn record(&self, event: &AnalyticsEvent) -> Result<(), StoreError>;
}

/// Posts events to the store's `record_search_analytics` procedure.
pub struct RestAnalyticsSink {
    http_client: reqwest::Client,
    base_url: String,
    service_key: String,
    request_timeout: Duration,
}

impl RestAnalyticsSink {
    pub fn new(base_url: &str, service_key: &str, request_timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            request_timeout,
        }
    }
}

#[async_trait]
impl AnalyticsSink for RestAnalyticsSink {
    async fn record(&self, event: &AnalyticsEvent) -> Result<(), StoreError> {
        let url = format!("{}/rest/v1/rpc/record_search_analytics", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("apikey", self.service_key.as_str())
            .timeout(self.request_timeout)
            .json(event)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::Status {
                target: url,
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}

/// Records the event off the request path. Failures are logged and dropped;
/// recording must never delay or fail the response it describes.
pub fn spawn_record(sink: Arc<dyn AnalyticsSink>, event: AnalyticsEvent) {
    tokio::spawn(async move {
        if let Err(e) = sink.record(&event).await {
            tracing::error!("Failed to record search analytics: {}", e);
        }
    });
}
