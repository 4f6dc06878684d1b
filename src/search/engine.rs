//! Search Orchestration
//!
//! [`SearchService`] drives one search end to end: validate, resolve the
//! caller, extract terms, run the per-type searches, fall back when strict
//! matching starves, merge, enrich with related articles and suggestions, and
//! hand the completed event to analytics. Individual content types and side
//! lookups degrade without failing the request; only total store failure
//! surfaces as an error.

use crate::analytics::identity::IdentityResolver;
use crate::analytics::recorder::{spawn_record, AnalyticsSink};
use crate::analytics::types::AnalyticsEvent;
use crate::search::merge::merge_and_cap;
use crate::search::searcher::{fallback_content_type, related_articles, search_content_type};
use crate::search::suggest::collect_suggestions;
use crate::search::terms::extract_key_terms;
use crate::search::types::{
    AutocompleteData, AutocompleteRequest, SearchCandidate, SearchData, SearchError,
    SearchRequest, DEFAULT_SUGGESTION_LIMIT,
};
use crate::store::types::ContentStore;
use std::sync::Arc;
use std::time::Instant;

pub struct SearchService {
    store: Arc<dyn ContentStore>,
    identity: Arc<dyn IdentityResolver>,
    analytics: Arc<dyn AnalyticsSink>,
}

impl SearchService {
    pub fn new(
        store: Arc<dyn ContentStore>,
        identity: Arc<dyn IdentityResolver>,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        Self {
            store,
            identity,
            analytics,
        }
    }

    pub async fn search(
        &self,
        request: &SearchRequest,
        bearer_token: Option<&str>,
    ) -> Result<SearchData, SearchError> {
        let started = Instant::now();
        let query = request.query.trim().to_string();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let search_id = uuid::Uuid::new_v4();
        let content_types = request.normalized_types();
        tracing::debug!(
            "[{}] Searching {} content types for: {}",
            search_id,
            content_types.len(),
            query
        );

        // Resolved up front so the analytics event can be attributed once the
        // response is ready.
        let user_id = match bearer_token {
            Some(token) => self.identity.resolve(token).await,
            None => None,
        };

        let terms = extract_key_terms(&query);
        // Each type fetches enough rows to survive the global offset slice.
        let row_budget = request.limit.saturating_add(request.offset);

        let mut candidates: Vec<SearchCandidate> = Vec::new();
        let mut failures = 0usize;
        let mut last_error = None;
        for content_type in &content_types {
            match search_content_type(
                self.store.as_ref(),
                *content_type,
                &query,
                &terms,
                request.category_id.as_ref(),
                row_budget,
            )
            .await
            {
                Ok(found) => candidates.extend(found),
                Err(e) => {
                    tracing::warn!("[{}] {:?} search failed: {}", search_id, content_type, e);
                    failures += 1;
                    last_error = Some(e);
                }
            }
        }

        if failures == content_types.len()
            && let Some(error) = last_error
        {
            return Err(SearchError::StoreUnavailable(error));
        }

        if candidates.is_empty() {
            tracing::debug!("[{}] Primary search empty, running fallback", search_id);
            for content_type in &content_types {
                match fallback_content_type(
                    self.store.as_ref(),
                    *content_type,
                    &query,
                    request.category_id.as_ref(),
                    row_budget,
                )
                .await
                {
                    Ok(found) => candidates.extend(found),
                    Err(e) => {
                        tracing::warn!(
                            "[{}] {:?} fallback failed: {}",
                            search_id,
                            content_type,
                            e
                        );
                    }
                }
            }
        }

        let page = merge_and_cap(candidates, request.limit, request.offset);

        let related_lookup = async {
            if request.include_related
                && let Some(top) = page.results.first()
            {
                match related_articles(self.store.as_ref(), top).await {
                    Ok(related) => related,
                    Err(e) => {
                        tracing::warn!("[{}] Related-article lookup failed: {}", search_id, e);
                        Vec::new()
                    }
                }
            } else {
                Vec::new()
            }
        };
        let suggestion_lookup = async {
            if request.include_suggestions {
                collect_suggestions(self.store.as_ref(), &query, DEFAULT_SUGGESTION_LIMIT).await
            } else {
                Vec::new()
            }
        };
        let (related, suggestions) = tokio::join!(related_lookup, suggestion_lookup);

        let search_time = started.elapsed().as_millis() as u64;

        // Only attributable searches are recorded; anonymous traffic leaves
        // no analytics trail.
        if let Some(user_id) = user_id {
            spawn_record(
                self.analytics.clone(),
                AnalyticsEvent {
                    original_query: request.query.clone(),
                    normalized_query: query.clone(),
                    user_id,
                    results_count: page.results.len(),
                    response_time_ms: search_time,
                },
            );
        }

        tracing::debug!(
            "[{}] Returning {} results in {}ms",
            search_id,
            page.results.len(),
            search_time
        );

        let total = page.results.len();
        Ok(SearchData {
            results: page.results,
            total,
            query: request.query.clone(),
            suggestions,
            related_articles: related,
            search_time,
            // The echoed list is the one actually searched, defaults applied.
            content_types,
            has_more: page.has_more,
        })
    }

    /// Suggestion lookup for type-ahead. Never fails: short queries yield an
    /// empty list and failing sources contribute nothing.
    pub async fn autocomplete(&self, request: &AutocompleteRequest) -> AutocompleteData {
        let suggestions =
            collect_suggestions(self.store.as_ref(), &request.query, request.limit).await;
        AutocompleteData {
            total: suggestions.len(),
            query: request.query.clone(),
            suggestions,
        }
    }
}
