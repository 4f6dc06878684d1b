//! Suggestion Collection
//!
//! Gathers autocomplete suggestions from three sources: recorded popular
//! searches, published article titles, and the synonym table. Sources are
//! best-effort; a failing source logs and contributes nothing, so suggestions
//! never fail a request.

use crate::search::types::{ContentType, Suggestion, SuggestionSource};
use crate::store::filter::Filter;
use crate::store::types::{ContentStore, OrderBy, SelectQuery};
use serde_json::Value;
use std::collections::HashSet;

/// Queries shorter than this (after trimming) produce no suggestions and no
/// store calls.
pub const MIN_QUERY_LENGTH: usize = 2;

const POPULAR_SOURCE_LIMIT: usize = 5;
const TITLE_SOURCE_LIMIT: usize = 5;
const SYNONYM_SOURCE_LIMIT: usize = 3;

/// A synonym row's canonical term counts ten times its weight.
const SYNONYM_TERM_MULTIPLIER: f64 = 10.0;
/// A matching synonym text counts five times the row's weight.
const SYNONYM_TEXT_MULTIPLIER: f64 = 5.0;

/// View of recorded search phrases with usage counters.
const SUGGESTION_TABLE: &str = "search_suggestions";
/// Canonical terms with their synonym lists and weights.
const SYNONYM_TABLE: &str = "search_synonyms";

/// Collects, deduplicates, and orders suggestions for `query`.
///
/// Duplicate texts (case-insensitive) keep their first occurrence, so the
/// source order popular > titles > synonyms doubles as the dedup preference.
pub async fn collect_suggestions(
    store: &dyn ContentStore,
    query: &str,
    limit: usize,
) -> Vec<Suggestion> {
    let trimmed = query.trim();
    if trimmed.len() < MIN_QUERY_LENGTH {
        return Vec::new();
    }

    let mut suggestions = popular_suggestions(store, trimmed).await;
    suggestions.extend(title_suggestions(store, trimmed).await);
    suggestions.extend(synonym_suggestions(store, trimmed).await);

    let mut seen = HashSet::new();
    let mut unique: Vec<Suggestion> = suggestions
        .into_iter()
        .filter(|suggestion| {
            !suggestion.text.is_empty() && seen.insert(suggestion.text.to_lowercase())
        })
        .collect();

    unique.sort_by(|a, b| {
        b.source
            .priority()
            .cmp(&a.source.priority())
            .then_with(|| b.weight.total_cmp(&a.weight))
    });
    unique.truncate(limit);
    unique
}

/// Recorded search phrases containing the partial query, most-searched first.
async fn popular_suggestions(store: &dyn ContentStore, query: &str) -> Vec<Suggestion> {
    let mut select = SelectQuery::new(
        SUGGESTION_TABLE,
        Filter::Contains("suggestion".to_string(), query.to_string()),
    );
    select.order = vec![OrderBy::desc("search_count")];
    select.limit = Some(POPULAR_SOURCE_LIMIT);

    let rows = match store.select(&select).await {
        Ok(rows) => rows,
        Err(error) => {
            tracing::warn!("Popular-suggestion lookup failed: {}", error);
            return Vec::new();
        }
    };

    rows.iter()
        .filter_map(|row| {
            let text = row.get("suggestion")?.as_str()?;
            Some(Suggestion {
                text: text.to_string(),
                source: SuggestionSource::Popular,
                weight: row.get("search_count").and_then(Value::as_f64).unwrap_or(0.0),
            })
        })
        .collect()
}

/// Published article titles containing the partial query, most-viewed first.
async fn title_suggestions(store: &dyn ContentStore, query: &str) -> Vec<Suggestion> {
    let descriptor = ContentType::Article.descriptor();
    let mut select = SelectQuery::new(
        descriptor.table,
        Filter::And(vec![
            descriptor.visibility.to_filter(),
            Filter::Contains(descriptor.title_field.to_string(), query.to_string()),
        ]),
    );
    select.columns = vec!["title".to_string(), "view_count".to_string()];
    select.order = vec![OrderBy::desc("view_count")];
    select.limit = Some(TITLE_SOURCE_LIMIT);

    let rows = match store.select(&select).await {
        Ok(rows) => rows,
        Err(error) => {
            tracing::warn!("Title-suggestion lookup failed: {}", error);
            return Vec::new();
        }
    };

    rows.iter()
        .filter_map(|row| {
            let text = row.get("title")?.as_str()?;
            Some(Suggestion {
                text: text.to_string(),
                source: SuggestionSource::ArticleTitle,
                weight: row.get("view_count").and_then(Value::as_f64).unwrap_or(0.0),
            })
        })
        .collect()
}

/// Synonym rows whose term contains the partial query or whose synonym list
/// holds it verbatim. Each row contributes its canonical term, plus any
/// synonym texts that themselves contain the partial query.
async fn synonym_suggestions(store: &dyn ContentStore, query: &str) -> Vec<Suggestion> {
    let mut select = SelectQuery::new(
        SYNONYM_TABLE,
        Filter::Or(vec![
            Filter::Contains("term".to_string(), query.to_string()),
            Filter::HasElement("synonyms".to_string(), query.to_string()),
        ]),
    );
    select.order = vec![OrderBy::desc("weight")];
    select.limit = Some(SYNONYM_SOURCE_LIMIT);

    let rows = match store.select(&select).await {
        Ok(rows) => rows,
        Err(error) => {
            tracing::warn!("Synonym-suggestion lookup failed: {}", error);
            return Vec::new();
        }
    };

    let needle = query.to_lowercase();
    let mut suggestions = Vec::new();
    for row in &rows {
        let weight = row.get("weight").and_then(Value::as_f64).unwrap_or(0.0);
        if let Some(term) = row.get("term").and_then(Value::as_str) {
            suggestions.push(Suggestion {
                text: term.to_string(),
                source: SuggestionSource::Synonym,
                weight: weight * SYNONYM_TERM_MULTIPLIER,
            });
        }
        if let Some(synonyms) = row.get("synonyms").and_then(Value::as_array) {
            for synonym in synonyms {
                if let Some(text) = synonym.as_str()
                    && text.to_lowercase().contains(&needle)
                {
                    suggestions.push(Suggestion {
                        text: text.to_string(),
                        source: SuggestionSource::SynonymMatch,
                        weight: weight * SYNONYM_TEXT_MULTIPLIER,
                    });
                }
            }
        }
    }
    suggestions
}
