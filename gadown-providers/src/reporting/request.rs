//! Reporting API request construction.

use gadown_core::{CoreError, FilterGrouping, ReportQuery, ReportRequest, apply_filter};
use serde::Serialize;

/// Body of a `reports:batchGet` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetRequest {
    /// Report requests; always exactly one here.
    pub report_requests: Vec<ReportRequest>,
}

impl BatchGetRequest {
    /// Wraps a single request for the page at `page_token`.
    pub fn single(request: &ReportRequest, page_token: Option<String>) -> Self {
        Self {
            report_requests: vec![request.clone().with_page_token(page_token)],
        }
    }
}

/// Builds the report request for a query, translating its filters.
pub fn build_batch_request(
    query: &ReportQuery,
    grouping: FilterGrouping,
) -> Result<ReportRequest, CoreError> {
    let mut request = ReportRequest::from_query(query);
    if let Some(filters) = &query.filters {
        apply_filter(&mut request, filters, grouping)?;
    }
    Ok(request)
}
