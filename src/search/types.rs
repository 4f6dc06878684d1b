//! Search Wire Protocol
//!
//! Request and response DTOs for the search endpoints, the content-type
//! descriptor table that drives the generic per-type searcher, and the
//! search-level error taxonomy.
//!
//! Successful responses are wrapped in a `data` envelope and failures in an
//! `error` envelope with a stable code, matching what the browser front end
//! consumes.

use crate::store::filter::Filter;
use crate::store::types::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Default page size for search results.
pub const DEFAULT_RESULT_LIMIT: usize = 50;
/// Default cap for autocomplete suggestions.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Stable error code returned by the search endpoint.
pub const ERROR_ENHANCED_SEARCH: &str = "ENHANCED_SEARCH_FAILED";
/// Stable error code returned by the autocomplete endpoint.
pub const ERROR_AUTOCOMPLETE: &str = "AUTOCOMPLETE_FAILED";

/// The four searchable record kinds. Serialized with the plural spelling the
/// front end sends in `contentTypes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "articles")]
    Article,
    #[serde(rename = "questions")]
    Question,
    #[serde(rename = "forum_posts")]
    ForumPost,
    #[serde(rename = "feature_requests")]
    FeatureRequest,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Article,
        ContentType::Question,
        ContentType::ForumPost,
        ContentType::FeatureRequest,
    ];

    pub fn descriptor(self) -> &'static TypeDescriptor {
        match self {
            ContentType::Article => &ARTICLE,
            ContentType::Question => &QUESTION,
            ContentType::ForumPost => &FORUM_POST,
            ContentType::FeatureRequest => &FEATURE_REQUEST,
        }
    }
}

/// Which rows of a table are publicly listable.
#[derive(Debug, Clone, Copy)]
pub enum Visibility {
    /// Field must equal the value.
    Is(&'static str, &'static str),
    /// Field must differ from the value.
    IsNot(&'static str, &'static str),
}

impl Visibility {
    pub fn to_filter(self) -> Filter {
        match self {
            Visibility::Is(field, value) => Filter::Eq(field.to_string(), Value::from(value)),
            Visibility::IsNot(field, value) => Filter::Neq(field.to_string(), Value::from(value)),
        }
    }
}

/// Store-specific field mapping for one content type.
///
/// The generic searcher reads everything it needs to know about a type from
/// this table: where the text lives, which counter stands in for popularity
/// and engagement, and the visibility rule for public listing.
#[derive(Debug)]
pub struct TypeDescriptor {
    pub table: &'static str,
    /// Singular tag used on result records.
    pub result_tag: &'static str,
    pub title_field: &'static str,
    pub body_field: &'static str,
    /// Secondary text searched and shown as the description, when the table
    /// has one.
    pub excerpt_field: Option<&'static str>,
    /// Popularity counter; types without one report zero views.
    pub view_count_field: Option<&'static str>,
    /// Engagement counter exposed as `like_count` on results.
    pub engagement_field: &'static str,
    /// Boost flag granting a fixed rank bonus, when the table has one.
    pub featured_field: Option<&'static str>,
    pub visibility: Visibility,
}

static ARTICLE: TypeDescriptor = TypeDescriptor {
    table: "content_articles",
    result_tag: "article",
    title_field: "title",
    body_field: "content",
    excerpt_field: Some("excerpt"),
    view_count_field: Some("view_count"),
    engagement_field: "like_count",
    featured_field: Some("featured"),
    visibility: Visibility::Is("status", "published"),
};

static QUESTION: TypeDescriptor = TypeDescriptor {
    table: "questions",
    result_tag: "question",
    title_field: "title",
    body_field: "content",
    excerpt_field: None,
    view_count_field: Some("view_count"),
    engagement_field: "answer_count",
    featured_field: None,
    visibility: Visibility::IsNot("status", "deleted"),
};

static FORUM_POST: TypeDescriptor = TypeDescriptor {
    table: "forum_posts",
    result_tag: "forum_post",
    title_field: "title",
    body_field: "content",
    excerpt_field: None,
    view_count_field: Some("view_count"),
    engagement_field: "reply_count",
    featured_field: None,
    visibility: Visibility::Is("status", "active"),
};

static FEATURE_REQUEST: TypeDescriptor = TypeDescriptor {
    table: "feature_requests",
    result_tag: "feature_request",
    title_field: "title",
    body_field: "description",
    excerpt_field: None,
    view_count_field: None,
    engagement_field: "star_count",
    featured_field: None,
    visibility: Visibility::IsNot("status", "rejected"),
};

/// Body of `POST /search`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub query: String,
    pub content_types: Vec<ContentType>,
    pub category_id: Option<Value>,
    pub limit: usize,
    pub offset: usize,
    pub include_related: bool,
    pub include_suggestions: bool,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            content_types: ContentType::ALL.to_vec(),
            category_id: None,
            limit: DEFAULT_RESULT_LIMIT,
            offset: 0,
            include_related: true,
            include_suggestions: true,
        }
    }
}

impl SearchRequest {
    /// Content types to actually search. An explicitly empty list on the wire
    /// means every type, and duplicate entries collapse to their first
    /// occurrence so no type is searched twice.
    pub fn normalized_types(&self) -> Vec<ContentType> {
        if self.content_types.is_empty() {
            return ContentType::ALL.to_vec();
        }
        let mut types: Vec<ContentType> = Vec::with_capacity(self.content_types.len());
        for content_type in &self.content_types {
            if !types.contains(content_type) {
                types.push(*content_type);
            }
        }
        types
    }
}

/// Body of `POST /autocomplete`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AutocompleteRequest {
    pub query: String,
    pub limit: usize,
}

impl Default for AutocompleteRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

/// One ranked match. Rank and match-type are derived per query, never
/// persisted.
#[derive(Debug, Clone, Serialize)]
pub struct SearchCandidate {
    pub content_type: &'static str,
    pub id: Value,
    pub title: String,
    pub description: String,
    pub author_id: Option<Value>,
    pub category_id: Option<Value>,
    pub view_count: i64,
    pub like_count: i64,
    pub created_at: String,
    pub rank: f64,
    pub match_type: &'static str,
    #[serde(rename = "relevanceScore")]
    pub relevance_score: f64,
    pub snippet: String,
    /// Parsed creation time used for tie-breaks; not part of the wire shape.
    #[serde(skip)]
    pub created_sort: i64,
}

/// Trimmed article projection returned in `relatedArticles`.
#[derive(Debug, Clone, Serialize)]
pub struct RelatedArticle {
    pub content_type: &'static str,
    pub id: Value,
    pub title: String,
    pub description: String,
    pub category_id: Option<Value>,
    pub view_count: i64,
    pub created_at: String,
}

/// Where an autocomplete suggestion came from. Priority decides the final
/// ordering before weight ties are broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    Popular,
    ArticleTitle,
    Synonym,
    SynonymMatch,
}

impl SuggestionSource {
    pub fn priority(self) -> u8 {
        match self {
            SuggestionSource::Popular => 4,
            SuggestionSource::ArticleTitle => 3,
            SuggestionSource::Synonym => 2,
            SuggestionSource::SynonymMatch => 1,
        }
    }
}

/// One autocomplete suggestion.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub text: String,
    #[serde(rename = "type")]
    pub source: SuggestionSource,
    #[serde(rename = "count")]
    pub weight: f64,
}

/// Payload of a successful search.
#[derive(Debug, Serialize)]
pub struct SearchData {
    pub results: Vec<SearchCandidate>,
    pub total: usize,
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    #[serde(rename = "relatedArticles")]
    pub related_articles: Vec<RelatedArticle>,
    #[serde(rename = "searchTime")]
    pub search_time: u64,
    #[serde(rename = "contentTypes")]
    pub content_types: Vec<ContentType>,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub data: SearchData,
}

/// Payload of a successful autocomplete call.
#[derive(Debug, Serialize)]
pub struct AutocompleteData {
    pub suggestions: Vec<Suggestion>,
    pub query: String,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub data: AutocompleteData,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Failures that surface to the caller. Everything else degrades to fewer
/// results.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search query must not be empty")]
    EmptyQuery,
    #[error("all content-type searches failed: {0}")]
    StoreUnavailable(StoreError),
}
