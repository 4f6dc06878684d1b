//! Community Search Service Library
//!
//! This library crate defines the core modules of the platform's search
//! service. It serves as the foundation for the binary executable
//! (`main.rs`).
//!
//! ## Architecture Modules
//! The service is composed of four loosely coupled subsystems:
//!
//! - **`search`**: The query pipeline. Extracts key terms, runs the
//!   descriptor-driven per-type searches with a loosened fallback pass, ranks
//!   and merges results, and collects autocomplete suggestions.
//! - **`store`**: The content-store access layer. One read seam with a
//!   PostgREST-backed implementation for production and an in-memory
//!   implementation for tests.
//! - **`analytics`**: The side channel. Resolves caller identity and records
//!   completed searches without ever delaying a response.
//! - **`config`**: Environment-driven runtime configuration for the binary.

pub mod analytics;
pub mod config;
pub mod search;
pub mod store;
