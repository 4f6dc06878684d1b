//! HTTP Handlers
//!
//! Axum handlers for the two search endpoints plus the CORS middleware every
//! response passes through. Handlers translate [`SearchError`] into the
//! stable error envelope; they never panic on bad input.

use super::engine::SearchService;
use super::types::{
    AutocompleteRequest, AutocompleteResponse, ErrorBody, ErrorDetail, SearchError,
    SearchRequest, SearchResponse, ERROR_AUTOCOMPLETE, ERROR_ENHANCED_SEARCH,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use std::sync::Arc;

/// Headers attached to every response, preflight included.
pub(crate) const CORS_HEADERS: [(&str, &str); 5] = [
    ("access-control-allow-origin", "*"),
    (
        "access-control-allow-headers",
        "authorization, x-client-info, apikey, content-type",
    ),
    (
        "access-control-allow-methods",
        "POST, GET, OPTIONS, PUT, DELETE, PATCH",
    ),
    ("access-control-max-age", "86400"),
    ("access-control-allow-credentials", "false"),
];

/// Middleware: short-circuits preflight requests and stamps CORS headers on
/// everything else.
pub async fn cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = (StatusCode::OK, "ok").into_response();
        apply_cors_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}

pub(crate) fn apply_cors_headers(headers: &mut HeaderMap) {
    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
}

/// Pulls the caller's token out of the Authorization header, if present.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

pub async fn handle_search(
    Extension(service): Extension<Arc<SearchService>>,
    headers: HeaderMap,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("Rejected malformed search request: {}", rejection);
            return error_response(
                StatusCode::BAD_REQUEST,
                ERROR_ENHANCED_SEARCH,
                &rejection.to_string(),
            );
        }
    };

    let token = bearer_token(&headers);
    match service.search(&request, token.as_deref()).await {
        Ok(data) => (StatusCode::OK, Json(SearchResponse { data })).into_response(),
        Err(SearchError::EmptyQuery) => error_response(
            StatusCode::BAD_REQUEST,
            ERROR_ENHANCED_SEARCH,
            "Search query is required",
        ),
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ERROR_ENHANCED_SEARCH,
                &e.to_string(),
            )
        }
    }
}

pub async fn handle_autocomplete(
    Extension(service): Extension<Arc<SearchService>>,
    payload: Result<Json<AutocompleteRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("Rejected malformed autocomplete request: {}", rejection);
            return error_response(
                StatusCode::BAD_REQUEST,
                ERROR_AUTOCOMPLETE,
                &rejection.to_string(),
            );
        }
    };

    let data = service.autocomplete(&request).await;
    (StatusCode::OK, Json(AutocompleteResponse { data })).into_response()
}

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: message.to_string(),
            },
        }),
    )
        .into_response()
}
