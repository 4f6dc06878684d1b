//! Search Analytics Module
//!
//! Side channel for who searched what. Nothing in here may slow down or fail
//! a search response.
//!
//! ## Overview
//! After a search completes, the service resolves the caller's identity from
//! their bearer token and, for signed-in callers only, records the query and
//! its outcome to the platform's analytics procedure. Both steps are
//! best-effort: identity failures leave the caller anonymous, and recording
//! failures are logged and dropped.
//!
//! ## Responsibilities
//! - **Identity**: Resolving bearer tokens to user ids via the auth endpoint.
//! - **Recording**: Posting completed-search events off the request path.
//!
//! ## Submodules
//! - **`identity`**: The [`identity::IdentityResolver`] seam and its REST implementation.
//! - **`recorder`**: The [`recorder::AnalyticsSink`] seam, its REST implementation, and the fire-and-forget spawn.
//! - **`types`**: The recorded event shape.

pub mod identity;
pub mod recorder;
pub mod types;
