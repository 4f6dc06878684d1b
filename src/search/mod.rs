//! Search Module
//!
//! The core component responsible for answering user queries across the
//! platform's content types.
//!
//! ## Overview
//! This module implements the search pipeline for the community platform. It
//! bridges the HTTP API layer with the content store, turning a free-form
//! query into ranked results drawn from articles, questions, forum posts, and
//! feature requests.
//!
//! ## Responsibilities
//! - **Term Extraction**: Distilling question-style queries into the words worth matching.
//! - **Searching**: One descriptor-driven query path shared by all content types, with a loosened fallback pass.
//! - **Ranking**: Scoring matches uniformly so results from different tables compare directly.
//! - **Suggestions**: Type-ahead from popular searches, article titles, and synonyms.
//! - **API**: Exposing search capabilities via RESTful HTTP endpoints.
//!
//! ## Submodules
//! - **`engine`**: The orchestrator tying validation, searching, merging, and analytics together.
//! - **`handlers`**: HTTP request handlers and CORS middleware for the Axum web server.
//! - **`terms`**: Key-term extraction from question-style queries.
//! - **`searcher`**: The generic per-type search and fallback passes.
//! - **`ranker`**: The shared relevance formula and match-type tags.
//! - **`merge`**: Cross-type result merging and pagination.
//! - **`suggest`**: Suggestion collection and ordering.
//! - **`types`**: Data Transfer Objects (DTOs) for API communication.

pub mod engine;
pub mod handlers;
pub mod merge;
pub mod ranker;
pub mod searcher;
pub mod suggest;
pub mod terms;
pub mod types;
