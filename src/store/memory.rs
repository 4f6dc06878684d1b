//! In-Memory Content Store
//!
//! DashMap-backed [`ContentStore`] used by unit tests and local development.
//! It evaluates the same filter tree the REST backend renders, so both
//! backends agree on matching semantics. Projection is not applied; callers
//! receive full rows.

use super::types::{ContentStore, Direction, OrderBy, Row, SelectQuery, StoreError};
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

#[derive(Default)]
pub struct MemoryContentStore {
    tables: DashMap<String, Vec<Row>>,
    selects: AtomicUsize,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an empty table. Selecting a table that was never registered
    /// is an error, which lets callers simulate unavailable backends.
    pub fn create_table(&self, table: &str) {
        self.tables.entry(table.to_string()).or_default();
    }

    pub fn insert(&self, table: &str, row: Row) {
        self.tables.entry(table.to_string()).or_default().push(row);
    }

    /// Number of `select` calls served so far.
    pub fn select_count(&self) -> usize {
        self.selects.load(AtomicOrdering::Relaxed)
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, StoreError> {
        self.selects.fetch_add(1, AtomicOrdering::Relaxed);

        let table = self
            .tables
            .get(&query.table)
            .ok_or_else(|| StoreError::UnknownTable(query.table.clone()))?;

        let mut rows: Vec<Row> = table
            .iter()
            .filter(|row| query.filter.matches(row))
            .cloned()
            .collect();
        drop(table);

        sort_rows(&mut rows, &query.order);

        let offset = query.offset.unwrap_or(0);
        let rows: Vec<Row> = match query.limit {
            Some(limit) => rows.into_iter().skip(offset).take(limit).collect(),
            None => rows.into_iter().skip(offset).collect(),
        };
        Ok(rows)
    }
}

fn sort_rows(rows: &mut [Row], order: &[OrderBy]) {
    if order.is_empty() {
        return;
    }
    rows.sort_by(|a, b| {
        for clause in order {
            let mut ordering = compare_values(a.get(&clause.field), b.get(&clause.field));
            if clause.direction == Direction::Desc {
                ordering = ordering.reverse();
            }
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => {
            if let (Some(x), Some(y)) = (left.as_f64(), right.as_f64()) {
                return x.total_cmp(&y);
            }
            if let (Some(x), Some(y)) = (left.as_str(), right.as_str()) {
                return x.cmp(y);
            }
            left.to_string().cmp(&right.to_string())
        }
    }
}
