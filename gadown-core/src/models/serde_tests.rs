//! Serde tests for request and response wire formats.
//!
//! The request body and the response shapes must match the upstream JSON
//! field names exactly.

use serde_json::json;

use crate::{
    BatchGetResponse, ClauseOperator, DimensionFilter, DimensionFilterClause, MatchOperator,
    McfResponse, MetricFilter, MetricFilterClause, ReportQuery, ReportRequest,
};

// ============================================================================
// Request Body
// ============================================================================

#[test]
fn test_request_body_field_names() {
    let query = ReportQuery::new(
        "123",
        "7daysAgo",
        "2024-03-01",
        "ga:sessions",
        Some("ga:date"),
        None,
    )
    .unwrap();
    let request = ReportRequest::from_query(&query);

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value,
        json!({
            "viewId": "123",
            "dateRanges": [{"startDate": "7daysAgo", "endDate": "2024-03-01"}],
            "metrics": [{"expression": "ga:sessions"}],
            "dimensions": [{"name": "ga:date"}]
        })
    );
}

#[test]
fn test_request_body_with_clauses_and_token() {
    let query = ReportQuery::new("1", "today", "today", "ga:sessions", None, None).unwrap();
    let mut request = ReportRequest::from_query(&query).with_page_token(Some("1000".into()));
    request.metric_filter_clauses.push(MetricFilterClause::single(MetricFilter {
        metric_name: "ga:sessions".into(),
        not: false,
        operator: MatchOperator::GreaterThan,
        comparison_value: "100".into(),
    }));
    request.dimension_filter_clauses.push(DimensionFilterClause {
        operator: Some(ClauseOperator::Or),
        filters: vec![DimensionFilter {
            dimension_name: "ga:source".into(),
            not: true,
            operator: MatchOperator::Regexp,
            expressions: vec!["^goo".into()],
        }],
    });

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["pageToken"], "1000");
    assert_eq!(
        value["metricFilterClauses"],
        json!([{"filters": [{
            "metricName": "ga:sessions",
            "not": false,
            "operator": "GREATER_THAN",
            "comparisonValue": "100"
        }]}])
    );
    assert_eq!(
        value["dimensionFilterClauses"],
        json!([{"operator": "OR", "filters": [{
            "dimensionName": "ga:source",
            "not": true,
            "operator": "REGEXP",
            "expressions": ["^goo"]
        }]}])
    );
}

// ============================================================================
// Responses
// ============================================================================

#[test]
fn test_batch_get_response_parses() {
    let response: BatchGetResponse = serde_json::from_value(json!({
        "reports": [{
            "columnHeader": {
                "dimensions": ["ga:date"],
                "metricHeader": {
                    "metricHeaderEntries": [{"name": "ga:sessions", "type": "INTEGER"}]
                }
            },
            "data": {
                "rows": [{"dimensions": ["20240101"], "metrics": [{"values": ["12"]}]}],
                "rowCount": 1,
                "totals": [{"values": ["12"]}]
            },
            "nextPageToken": "1"
        }]
    }))
    .unwrap();

    let report = &response.reports[0];
    assert_eq!(report.column_header.dimensions, vec!["ga:date"]);
    assert_eq!(
        report.column_header.metric_header.metric_header_entries[0].metric_type.as_deref(),
        Some("INTEGER")
    );
    assert_eq!(report.data.rows[0].metrics[0].values, vec!["12"]);
    assert_eq!(response.next_page_token(), Some("1"));
}

#[test]
fn test_batch_get_response_empty_token_is_last_page() {
    let response: BatchGetResponse =
        serde_json::from_value(json!({"reports": [{"nextPageToken": ""}]})).unwrap();
    assert_eq!(response.next_page_token(), None);

    let response: BatchGetResponse = serde_json::from_value(json!({})).unwrap();
    assert!(response.reports.is_empty());
    assert_eq!(response.next_page_token(), None);
}

#[test]
fn test_mcf_response_parses() {
    let response: McfResponse = serde_json::from_value(json!({
        "kind": "analytics#mcfData",
        "columnHeaders": [
            {
                "name": "mcf:basicChannelGroupingPath",
                "columnType": "DIMENSION",
                "dataType": "MCF_SEQUENCE"
            },
            {"name": "mcf:totalConversions", "columnType": "METRIC", "dataType": "INTEGER"}
        ],
        "rows": [[
            {"conversionPathValue": [{"interactionType": "CLICK", "nodeValue": "Direct"}]},
            {"primitiveValue": "3"}
        ]],
        "nextLink": "https://www.googleapis.com/analytics/v3/data/mcf?start-index=1001",
        "max-results": 500
    }))
    .unwrap();

    assert!(response.column_headers[0].is_sequence());
    assert!(!response.column_headers[1].is_sequence());
    assert_eq!(response.rows[0][1].primitive_value.as_deref(), Some("3"));
    assert!(response.next_link.is_some());
    assert_eq!(response.max_results, Some(500));
}
