//! Caller Identity Resolution

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Resolves a bearer token to a user id.
///
/// Resolution is best-effort with a single attempt: any failure means the
/// caller stays anonymous and the search proceeds without analytics.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, bearer_token: &str) -> Option<String>;
}

/// Auth endpoint payload. Extra fields are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct UserInfo {
    pub id: String,
}

/// Resolves identities against the platform's auth endpoint.
pub struct RestIdentityResolver {
    http_client: reqwest::Client,
    base_url: String,
    service_key: String,
    request_timeout: Duration,
}

impl RestIdentityResolver {
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
impl IdentityResolver for RestIdentityResolver {
    async fn resolve(&self, bearer_token: &str) -> Option<String> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", bearer_token))
            .header("apikey", self.service_key.as_str())
            .timeout(self.request_timeout)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                match response.json::<UserInfo>().await {
                    Ok(user) => Some(user.id),
                    Err(e) => {
                        tracing::debug!("Could not decode identity payload: {}", e);
                        None
                    }
                }
            }
            Ok(response) => {
                tracing::debug!("Identity lookup returned status {}", response.status());
                None
            }
            Err(e) => {
                tracing::debug!("Identity lookup failed: {}", e);
                None
            }
        }
    }
}
