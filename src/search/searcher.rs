//! Per-Type Searching
//!
//! Runs the primary and fallback passes for one content type and shapes the
//! returned rows into ranked candidates. All four content types flow through
//! the same two functions; a [`TypeDescriptor`] supplies the table and field
//! names, so no type has bespoke query code.

use crate::search::ranker::{self, rank_candidate};
use crate::search::types::{ContentType, RelatedArticle, SearchCandidate, TypeDescriptor};
use crate::store::filter::Filter;
use crate::store::types::{ContentStore, OrderBy, Row, SelectQuery, StoreError};
use chrono::DateTime;
use serde_json::Value;
use std::cmp::Ordering;

/// How many related articles accompany a search response.
const RELATED_ARTICLE_LIMIT: usize = 3;

/// Primary pass: strict matching on the raw query plus its key terms.
///
/// Rows come back ordered by popularity so the budget keeps the most-viewed
/// matches; final ordering is by computed rank.
pub async fn search_content_type(
    store: &dyn ContentStore,
    content_type: ContentType,
    query: &str,
    terms: &[String],
    category_id: Option<&Value>,
    row_budget: usize,
) -> Result<Vec<SearchCandidate>, StoreError> {
    let descriptor = content_type.descriptor();
    let mut select = SelectQuery::new(
        descriptor.table,
        search_filter(descriptor, query, terms, category_id),
    );
    select.order = type_order(descriptor);
    select.limit = Some(row_budget);

    let rows = store.select(&select).await?;
    let mut candidates: Vec<SearchCandidate> = rows
        .iter()
        .map(|row| {
            let title = text_field(row, descriptor.title_field);
            let body = text_field(row, descriptor.body_field);
            let excerpt = descriptor.excerpt_field.map(|field| text_field(row, field));
            let featured = descriptor
                .featured_field
                .is_some_and(|field| row.get(field).and_then(Value::as_bool).unwrap_or(false));
            let (rank, match_type) =
                rank_candidate(query, terms, &title, excerpt.as_deref(), &body, featured);
            make_candidate(descriptor, row, rank, match_type)
        })
        .collect();
    candidates.sort_by(compare_candidates);
    Ok(candidates)
}

/// Fallback pass: raw-query substring only, no term expansion.
///
/// Results carry a fixed low rank and a fallback match tag; ordering puts
/// title matches first and relies on the store's popularity order within each
/// group.
pub async fn fallback_content_type(
    store: &dyn ContentStore,
    content_type: ContentType,
    query: &str,
    category_id: Option<&Value>,
    row_budget: usize,
) -> Result<Vec<SearchCandidate>, StoreError> {
    let descriptor = content_type.descriptor();
    let mut select = SelectQuery::new(
        descriptor.table,
        search_filter(descriptor, query, &[], category_id),
    );
    select.order = type_order(descriptor);
    select.limit = Some(row_budget);

    let rows = store.select(&select).await?;
    let needle = query.to_lowercase();
    let mut candidates: Vec<SearchCandidate> = rows
        .iter()
        .map(|row| make_candidate(descriptor, row, 1.0, ranker::MATCH_FALLBACK))
        .collect();
    candidates.sort_by_key(|candidate| !candidate.title.to_lowercase().contains(&needle));
    Ok(candidates)
}

/// Fetches the most-viewed published articles sharing the top result's
/// category, excluding the top result itself.
pub async fn related_articles(
    store: &dyn ContentStore,
    top: &SearchCandidate,
) -> Result<Vec<RelatedArticle>, StoreError> {
    let Some(category_id) = top.category_id.clone() else {
        return Ok(Vec::new());
    };

    let descriptor = ContentType::Article.descriptor();
    let mut select = SelectQuery::new(
        descriptor.table,
        Filter::And(vec![
            descriptor.visibility.to_filter(),
            Filter::Eq("category_id".to_string(), category_id),
            Filter::Neq("id".to_string(), top.id.clone()),
        ]),
    );
    select.columns = ["id", "title", "excerpt", "category_id", "view_count", "created_at"]
        .iter()
        .map(|column| column.to_string())
        .collect();
    select.order = vec![OrderBy::desc("view_count"), OrderBy::desc("created_at")];
    select.limit = Some(RELATED_ARTICLE_LIMIT);

    let rows = store.select(&select).await?;
    Ok(rows
        .iter()
        .map(|row| RelatedArticle {
            content_type: descriptor.result_tag,
            id: row.get("id").cloned().unwrap_or(Value::Null),
            title: text_field(row, "title"),
            description: text_field(row, "excerpt"),
            category_id: non_null(row, "category_id"),
            view_count: count_field(row, "view_count"),
            created_at: text_field(row, "created_at"),
        })
        .collect())
}

/// Builds the row predicate for one type: visibility AND text match, plus an
/// optional category pin. With no terms this degrades to the raw-query-only
/// form the fallback pass uses.
fn search_filter(
    descriptor: &TypeDescriptor,
    query: &str,
    terms: &[String],
    category_id: Option<&Value>,
) -> Filter {
    let mut text_clauses = vec![
        Filter::Contains(descriptor.title_field.to_string(), query.to_string()),
        Filter::Contains(descriptor.body_field.to_string(), query.to_string()),
    ];
    if let Some(excerpt) = descriptor.excerpt_field {
        text_clauses.push(Filter::Contains(excerpt.to_string(), query.to_string()));
    }
    for term in terms {
        text_clauses.push(Filter::Contains(
            descriptor.title_field.to_string(),
            term.clone(),
        ));
        text_clauses.push(Filter::Contains(
            descriptor.body_field.to_string(),
            term.clone(),
        ));
    }

    let mut clauses = vec![descriptor.visibility.to_filter(), Filter::Or(text_clauses)];
    if let Some(category) = category_id {
        clauses.push(Filter::Eq("category_id".to_string(), category.clone()));
    }
    Filter::And(clauses)
}

/// Popularity order when the table tracks views, recency always.
fn type_order(descriptor: &TypeDescriptor) -> Vec<OrderBy> {
    let mut order = Vec::new();
    if let Some(view_field) = descriptor.view_count_field {
        order.push(OrderBy::desc(view_field));
    }
    order.push(OrderBy::desc("created_at"));
    order
}

fn make_candidate(
    descriptor: &TypeDescriptor,
    row: &Row,
    rank: f64,
    match_type: &'static str,
) -> SearchCandidate {
    let description = match descriptor.excerpt_field {
        Some(excerpt) => text_field(row, excerpt),
        None => text_field(row, descriptor.body_field),
    };
    let created_at = text_field(row, "created_at");
    let created_sort = DateTime::parse_from_rfc3339(&created_at)
        .map(|stamp| stamp.timestamp_millis())
        .unwrap_or(0);

    SearchCandidate {
        content_type: descriptor.result_tag,
        id: row.get("id").cloned().unwrap_or(Value::Null),
        title: text_field(row, descriptor.title_field),
        snippet: description.clone(),
        description,
        author_id: non_null(row, "author_id"),
        category_id: non_null(row, "category_id"),
        view_count: descriptor
            .view_count_field
            .map_or(0, |field| count_field(row, field)),
        like_count: count_field(row, descriptor.engagement_field),
        created_at,
        rank,
        match_type,
        relevance_score: rank,
        created_sort,
    }
}

/// Rank first, then popularity, then recency.
fn compare_candidates(a: &SearchCandidate, b: &SearchCandidate) -> Ordering {
    b.rank
        .total_cmp(&a.rank)
        .then_with(|| b.view_count.cmp(&a.view_count))
        .then_with(|| b.created_sort.cmp(&a.created_sort))
}

fn text_field(row: &Row, field: &str) -> String {
    row.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn non_null(row: &Row, field: &str) -> Option<Value> {
    row.get(field).filter(|value| !value.is_null()).cloned()
}

fn count_field(row: &Row, field: &str) -> i64 {
    row.get(field).and_then(Value::as_i64).unwrap_or(0)
}
