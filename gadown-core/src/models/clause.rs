//! Filter clause types for Reporting API v4 requests.
//!
//! Wire format:
//!
//! ```json
//! {
//!   "metricFilterClauses": [
//!     { "filters": [ { "metricName": "ga:sessions", "not": false,
//!                      "operator": "GREATER_THAN", "comparisonValue": "100" } ] }
//!   ],
//!   "dimensionFilterClauses": [
//!     { "filters": [ { "dimensionName": "ga:source", "not": false,
//!                      "operator": "EXACT", "expressions": ["google"] } ] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Comparison operator of a single filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchOperator {
    /// Exact match.
    Exact,
    /// Greater than.
    GreaterThan,
    /// Less than.
    LessThan,
    /// Substring match.
    Partial,
    /// Regular expression match.
    Regexp,
}

/// How the filters inside one clause are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClauseOperator {
    /// Any filter may match.
    Or,
}

/// A predicate over one metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricFilter {
    /// Metric identifier, e.g. `ga:sessions`.
    pub metric_name: String,
    /// Negates the match.
    pub not: bool,
    /// Comparison operator.
    pub operator: MatchOperator,
    /// Literal compared against.
    pub comparison_value: String,
}

/// A predicate over one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionFilter {
    /// Dimension identifier, e.g. `ga:source`.
    pub dimension_name: String,
    /// Negates the match.
    pub not: bool,
    /// Comparison operator.
    pub operator: MatchOperator,
    /// Expressions matched against (always one element here).
    pub expressions: Vec<String>,
}

/// A group of metric filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricFilterClause {
    /// Combination of the filters; omitted means the API default (OR).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<ClauseOperator>,
    /// The filters.
    pub filters: Vec<MetricFilter>,
}

impl MetricFilterClause {
    /// Creates a clause holding a single filter.
    pub fn single(filter: MetricFilter) -> Self {
        Self {
            operator: None,
            filters: vec![filter],
        }
    }
}

/// A group of dimension filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionFilterClause {
    /// Combination of the filters; omitted means the API default (OR).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<ClauseOperator>,
    /// The filters.
    pub filters: Vec<DimensionFilter>,
}

impl DimensionFilterClause {
    /// Creates a clause holding a single filter.
    pub fn single(filter: DimensionFilter) -> Self {
        Self {
            operator: None,
            filters: vec![filter],
        }
    }
}

/// Metric and dimension clauses parsed from one filter string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterClauses {
    /// Metric clauses in term order.
    pub metric: Vec<MetricFilterClause>,
    /// Dimension clauses in term order.
    pub dimension: Vec<DimensionFilterClause>,
}

impl FilterClauses {
    /// Returns true if no clause was produced.
    pub fn is_empty(&self) -> bool {
        self.metric.is_empty() && self.dimension.is_empty()
    }
}
