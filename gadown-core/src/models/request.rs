//! Report query and request types.
//!
//! - [`ReportQuery`] - validated invocation input, independent of the API
//! - [`ReportRequest`] - Reporting API v4 request body
//! - [`DateSpec`] / [`DateRange`] - dates understood by both APIs

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::api::ApiVariant;
use super::clause::{DimensionFilterClause, MetricFilterClause};
use crate::error::CoreError;

static DAYS_AGO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)daysAgo$").unwrap_or_else(|e| panic!("invalid daysAgo pattern: {e}"))
});

// ============================================================================
// Dates
// ============================================================================

/// A start or end date: absolute, or relative to the request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DateSpec {
    /// A calendar date (`YYYY-MM-DD`).
    Absolute(NaiveDate),
    /// `today`
    Today,
    /// `yesterday`
    Yesterday,
    /// `NdaysAgo`
    DaysAgo(u32),
}

impl DateSpec {
    /// Parses a date in any form the reporting APIs accept.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let input = input.trim();
        match input {
            "today" => return Ok(Self::Today),
            "yesterday" => return Ok(Self::Yesterday),
            _ => {}
        }

        if let Some(caps) = DAYS_AGO.captures(input) {
            return caps[1]
                .parse()
                .map(Self::DaysAgo)
                .map_err(|_| CoreError::InvalidDate(input.to_string()));
        }

        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .map(Self::Absolute)
            .map_err(|_| CoreError::InvalidDate(input.to_string()))
    }
}

impl fmt::Display for DateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Today => write!(f, "today"),
            Self::Yesterday => write!(f, "yesterday"),
            Self::DaysAgo(n) => write!(f, "{n}daysAgo"),
        }
    }
}

impl From<DateSpec> for String {
    fn from(spec: DateSpec) -> Self {
        spec.to_string()
    }
}

impl TryFrom<String> for DateSpec {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First day of the range.
    pub start_date: DateSpec,
    /// Last day of the range.
    pub end_date: DateSpec,
}

impl DateRange {
    /// Parses both ends of a range.
    pub fn new(start: &str, end: &str) -> Result<Self, CoreError> {
        Ok(Self {
            start_date: DateSpec::parse(start)?,
            end_date: DateSpec::parse(end)?,
        })
    }
}

// ============================================================================
// Report Query
// ============================================================================

/// A validated report query.
///
/// Built once per invocation. Construction fails before any network call
/// when an input is missing, a date is malformed, or the identifiers do not
/// share one API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    /// View the report is scoped to.
    pub view_id: String,
    /// Requested date range.
    pub date_range: DateRange,
    /// Metric expressions in request order.
    pub metrics: Vec<String>,
    /// Dimension names in request order.
    pub dimensions: Vec<String>,
    /// Raw filter expression, if any.
    pub filters: Option<String>,
    /// API serving the identifiers.
    pub api: ApiVariant,
}

impl ReportQuery {
    /// Builds a query from command-line style inputs.
    ///
    /// `metrics` and `dimensions` are comma-separated lists.
    pub fn new(
        view_id: &str,
        start_date: &str,
        end_date: &str,
        metrics: &str,
        dimensions: Option<&str>,
        filters: Option<&str>,
    ) -> Result<Self, CoreError> {
        let view_id = view_id.trim();
        if view_id.is_empty() {
            return Err(CoreError::MissingInput("view_id"));
        }
        if start_date.trim().is_empty() {
            return Err(CoreError::MissingInput("start_date"));
        }
        if end_date.trim().is_empty() {
            return Err(CoreError::MissingInput("end_date"));
        }

        let metrics = split_list(metrics);
        if metrics.is_empty() {
            return Err(CoreError::MissingInput("metrics"));
        }
        let dimensions = dimensions.map(split_list).unwrap_or_default();

        let api = ApiVariant::detect(&metrics, &dimensions)?;
        let date_range = DateRange::new(start_date, end_date)?;

        Ok(Self {
            view_id: view_id.to_string(),
            date_range,
            metrics,
            dimensions,
            filters: filters
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string),
            api,
        })
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Reporting API v4 Request
// ============================================================================

/// A requested metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    /// Metric expression, e.g. `ga:sessions`.
    pub expression: String,
}

/// A requested dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Dimension name, e.g. `ga:date`.
    pub name: String,
}

/// Request body entry for `reports:batchGet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// View id.
    pub view_id: String,
    /// Date ranges; always exactly one here.
    pub date_ranges: Vec<DateRange>,
    /// Metrics in request order.
    pub metrics: Vec<Metric>,
    /// Dimensions in request order.
    pub dimensions: Vec<Dimension>,
    /// Metric filter clauses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metric_filter_clauses: Vec<MetricFilterClause>,
    /// Dimension filter clauses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimension_filter_clauses: Vec<DimensionFilterClause>,
    /// Continuation token from the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl ReportRequest {
    /// Creates an unfiltered request for the query.
    pub fn from_query(query: &ReportQuery) -> Self {
        Self {
            view_id: query.view_id.clone(),
            date_ranges: vec![query.date_range],
            metrics: query
                .metrics
                .iter()
                .map(|m| Metric {
                    expression: m.clone(),
                })
                .collect(),
            dimensions: query
                .dimensions
                .iter()
                .map(|d| Dimension { name: d.clone() })
                .collect(),
            metric_filter_clauses: Vec::new(),
            dimension_filter_clauses: Vec::new(),
            page_token: None,
        }
    }

    /// Sets the page token.
    pub fn with_page_token(mut self, token: Option<String>) -> Self {
        self.page_token = token;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
