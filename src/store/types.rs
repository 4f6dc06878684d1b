//! Content Store Protocol
//!
//! Defines the read surface shared by every content-store backend together
//! with the error taxonomy for store calls. Rows travel as loosely-typed JSON
//! maps so one seam can cover tables with different column sets.

use super::filter::Filter;
use async_trait::async_trait;
use thiserror::Error;

/// A single record returned by the content store.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Sort direction for an [`OrderBy`] clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// One ordering clause, applied after filtering.
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: Direction::Desc,
        }
    }

    /// Renders the clause in `field.direction` form.
    pub fn render(&self) -> String {
        let direction = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        format!("{}.{}", self.field, direction)
    }
}

/// A filtered, ordered, paged read against one table.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    pub table: String,
    /// Columns to project; an empty list selects every column.
    pub columns: Vec<String>,
    pub filter: Filter,
    pub order: Vec<OrderBy>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl SelectQuery {
    pub fn new(table: &str, filter: Filter) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            filter,
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }
}

/// Errors produced by content-store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The store answered with a non-success HTTP status.
    #[error("store returned status {status} for {target}")]
    Status { target: String, status: u16 },
    /// A table was addressed that the backend does not know.
    #[error("unknown table: {0}")]
    UnknownTable(String),
}

/// Read seam over the platform's content tables.
///
/// Implementations must evaluate the same [`Filter`] semantics so callers can
/// swap the REST backend for the in-memory one without behavior changes.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, StoreError>;
}
