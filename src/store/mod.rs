//! Content Store Module
//!
//! The seam between the search pipeline and the platform's content tables.
//!
//! ## Core Concepts
//! - **Predicates**: every read is described by a typed [`filter::Filter`]
//!   tree plus ordering and paging, never by spliced query strings.
//! - **Backends**: [`rest::RestContentStore`] talks to the managed database's
//!   REST interface; [`memory::MemoryContentStore`] serves tests and local
//!   runs from DashMap tables. Both evaluate identical predicate semantics.
//!
//! ## Submodules
//! - **`filter`**: predicate tree, parameter rendering, row evaluation.
//! - **`memory`**: in-memory backend.
//! - **`rest`**: REST backend with retry/backoff.
//! - **`types`**: the `ContentStore` trait, query and error types.

pub mod filter;
pub mod memory;
pub mod rest;
pub mod types;
