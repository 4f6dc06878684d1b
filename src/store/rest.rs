//! REST Content Store
//!
//! [`ContentStore`] backend speaking the PostgREST dialect of the platform's
//! managed database. Transient transport failures are retried with doubling
//! backoff and jitter; non-success statuses surface as [`StoreError::Status`].

use super::types::{ContentStore, OrderBy, Row, SelectQuery, StoreError};
use async_trait::async_trait;
use std::time::Duration;

pub struct RestContentStore {
    http_client: reqwest::Client,
    base_url: String,
    service_key: String,
    request_timeout: Duration,
}

impl RestContentStore {
    pub fn new(base_url: &str, service_key: &str, request_timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            request_timeout,
        }
    }

    fn query_params(query: &SelectQuery) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let columns = if query.columns.is_empty() {
            "*".to_string()
        } else {
            query.columns.join(",")
        };
        params.push(("select".to_string(), columns));
        params.extend(query.filter.to_params());
        if !query.order.is_empty() {
            let rendered: Vec<String> = query.order.iter().map(OrderBy::render).collect();
            params.push(("order".to_string(), rendered.join(",")));
        }
        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = query.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        params
    }

    async fn get_with_retry(
        &self,
        url: &str,
        params: &[(String, String)],
        attempts: usize,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut delay_ms = 150u64;
        let mut attempt = 0;

        loop {
            let response = self
                .http_client
                .get(url)
                .query(params)
                .header("Authorization", format!("Bearer {}", self.service_key))
                .header("apikey", self.service_key.as_str())
                .timeout(self.request_timeout)
                .send()
                .await;

            match response {
                Ok(response) => return Ok(response),
                Err(e) => {
                    attempt += 1;
                    if attempt >= attempts {
                        return Err(e);
                    }
                    let jitter = rand::random::<u64>() % 50;
                    tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                    delay_ms = (delay_ms * 2).min(1200);
                }
            }
        }
    }
}

#[async_trait]
impl ContentStore for RestContentStore {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, StoreError> {
        let url = format!("{}/rest/v1/{}", self.base_url, query.table);
        let params = Self::query_params(query);

        let response = self.get_with_retry(&url, &params, 3).await?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                target: query.table.clone(),
                status: response.status().as_u16(),
            });
        }

        let rows: Vec<Row> = response.json().await?;
        tracing::debug!("select on {} returned {} rows", query.table, rows.len());
        Ok(rows)
    }
}
