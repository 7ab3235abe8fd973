//! Funnel API query construction and pagination.

use gadown_core::{McfResponse, ReportQuery};

/// `start-index` of the first page.
pub const FIRST_START_INDEX: u64 = 1;

/// Page size assumed when a response omits `max-results`.
pub const DEFAULT_MAX_RESULTS: u64 = 1000;

/// Builds the query parameters for the page starting at `start_index`.
pub fn build_query(query: &ReportQuery, start_index: u64) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("ids", format!("ga:{}", query.view_id)),
        ("start-date", query.date_range.start_date.to_string()),
        ("end-date", query.date_range.end_date.to_string()),
        ("metrics", query.metrics.join(",")),
    ];
    if !query.dimensions.is_empty() {
        params.push(("dimensions", query.dimensions.join(",")));
    }
    if let Some(filters) = &query.filters {
        params.push(("filters", filters.clone()));
    }
    params.push(("start-index", start_index.to_string()));
    params
}

/// Returns the `start-index` of the following page, or `None` on the last page.
///
/// A missing or zero `max-results` advances by [`DEFAULT_MAX_RESULTS`], so
/// the index always moves forward. Paging stops if it would overflow.
pub fn next_start_index(response: &McfResponse, start_index: u64) -> Option<u64> {
    response.next_link.as_ref()?;
    let page_size = response
        .max_results
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_MAX_RESULTS);
    start_index.checked_add(page_size)
}
