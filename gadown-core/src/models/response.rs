//! Upstream response shapes.
//!
//! Only the fields needed for flattening are modelled; everything else the
//! APIs return is ignored. Missing collections deserialize as empty.

use serde::{Deserialize, Serialize};

/// Data type of a funnel column holding a conversion path.
pub const MCF_SEQUENCE: &str = "MCF_SEQUENCE";

// ============================================================================
// Reporting API v4
// ============================================================================

/// Response of `reports:batchGet`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchGetResponse {
    /// One report per report request.
    #[serde(default)]
    pub reports: Vec<Report>,
}

impl BatchGetResponse {
    /// Continuation token of the first report, ignoring empty tokens.
    pub fn next_page_token(&self) -> Option<&str> {
        self.reports
            .first()
            .and_then(|r| r.next_page_token.as_deref())
            .filter(|t| !t.is_empty())
    }
}

/// A single report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Column names.
    #[serde(default)]
    pub column_header: ColumnHeader,
    /// Data rows.
    #[serde(default)]
    pub data: ReportData,
    /// Present when more rows are available.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Column header block of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHeader {
    /// Dimension names in request order.
    #[serde(default)]
    pub dimensions: Vec<String>,
    /// Metric header entries.
    #[serde(default)]
    pub metric_header: MetricHeader,
}

/// Metric half of the column header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricHeader {
    /// One entry per requested metric.
    #[serde(default)]
    pub metric_header_entries: Vec<MetricHeaderEntry>,
}

/// Name and type of a metric column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricHeaderEntry {
    /// Metric name.
    #[serde(default)]
    pub name: String,
    /// Value type, e.g. `INTEGER`.
    #[serde(rename = "type", default)]
    pub metric_type: Option<String>,
}

/// Row container of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    /// Rows in response order.
    #[serde(default)]
    pub rows: Vec<ReportRow>,
    /// Total row count across all pages.
    #[serde(default)]
    pub row_count: Option<u64>,
}

/// One data row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Dimension values.
    #[serde(default)]
    pub dimensions: Vec<String>,
    /// Metric values, one block per date range.
    #[serde(default)]
    pub metrics: Vec<DateRangeValues>,
}

/// Metric values for one date range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRangeValues {
    /// Values in metric header order.
    #[serde(default)]
    pub values: Vec<String>,
}

// ============================================================================
// Multi-Channel Funnels API v3
// ============================================================================

/// Response of `data/mcf`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McfResponse {
    /// Column descriptors in output order.
    #[serde(default)]
    pub column_headers: Vec<McfColumnHeader>,
    /// Rows of positionally aligned cells.
    #[serde(default)]
    pub rows: Vec<Vec<McfCell>>,
    /// Link to the next page; absent on the last page.
    #[serde(default)]
    pub next_link: Option<String>,
    /// Page size used for this response.
    #[serde(rename = "max-results", default)]
    pub max_results: Option<u64>,
}

/// A funnel column descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McfColumnHeader {
    /// Column name, e.g. `mcf:nthDay`.
    #[serde(default)]
    pub name: String,
    /// `DIMENSION` or `METRIC`.
    #[serde(default)]
    pub column_type: Option<String>,
    /// Data type, e.g. `STRING` or [`MCF_SEQUENCE`].
    #[serde(default)]
    pub data_type: String,
}

impl McfColumnHeader {
    /// Returns true if cells of this column hold conversion paths.
    pub fn is_sequence(&self) -> bool {
        self.data_type == MCF_SEQUENCE
    }
}

/// A funnel cell: either a primitive or a conversion path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McfCell {
    /// Scalar value.
    #[serde(default)]
    pub primitive_value: Option<String>,
    /// Structured path value.
    #[serde(default)]
    pub conversion_path_value: Option<serde_json::Value>,
}
