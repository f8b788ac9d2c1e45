use std::cmp::Ordering;

use super::SearchResult;

/// Order by score descending, then by most recent touch descending.
pub fn compare(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score()
        .total_cmp(&a.score())
        .then_with(|| b.recency().cmp(&a.recency()))
}

pub fn rank(results: &mut [SearchResult]) {
    results.sort_by(compare);
}

/// One slice of a ranked result list.
#[derive(Debug, Clone)]
pub struct Page {
    pub results: Vec<SearchResult>,
    /// Number of results before slicing.
    pub total: usize,
    pub has_more: bool,
}

/// Slice `[offset, offset + limit)` out of an already ranked list.
pub fn paginate(results: Vec<SearchResult>, offset: usize, limit: usize) -> Page {
    let total = results.len();
    let has_more = offset.saturating_add(limit) < total;
    let results = results.into_iter().skip(offset).take(limit).collect();
    Page {
        results,
        total,
        has_more,
    }
}
