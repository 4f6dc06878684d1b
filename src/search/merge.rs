//! Result Merging
//!
//! Combines candidates from every searched content type into one page.

use crate::search::types::SearchCandidate;

/// One page of merged results plus the continuation hint.
#[derive(Debug)]
pub struct MergedPage {
    pub results: Vec<SearchCandidate>,
    /// True when the page came back full. A heuristic: a page that ends
    /// exactly at the limit reports more results even when none remain.
    pub has_more: bool,
}

/// Sorts the union by rank and slices out the requested window.
///
/// The sort is stable, so equal-rank candidates keep the order their content
/// types were searched in.
pub fn merge_and_cap(
    mut candidates: Vec<SearchCandidate>,
    limit: usize,
    offset: usize,
) -> MergedPage {
    candidates.sort_by(|a, b| b.rank.total_cmp(&a.rank));
    let results: Vec<SearchCandidate> = candidates.into_iter().skip(offset).take(limit).collect();
    let has_more = results.len() == limit;
    MergedPage { results, has_more }
}
