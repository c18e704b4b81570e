use crate::models::SearchResult;

/// Sorts by name ascending. Stable, so equal names keep response order.
pub fn sort_results(results: &mut [SearchResult]) {
    results.sort_by(SearchResult::cmp_by_name);
}
