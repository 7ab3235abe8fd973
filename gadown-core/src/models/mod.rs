//! Domain models for gadown.
//!
//! ## Submodules
//!
//! - [`api`] - API variant detection (`ga:` / `mcf:`)
//! - [`clause`] - Filter clause wire types
//! - [`request`] - Report query, request body and date types
//! - [`response`] - Upstream response shapes for both APIs
//! - [`row`] - Flattened output rows

mod api;
mod clause;
mod request;
mod response;
mod row;

pub use api::ApiVariant;
pub use clause::{
    ClauseOperator, DimensionFilter, DimensionFilterClause, FilterClauses, MatchOperator,
    MetricFilter, MetricFilterClause,
};
pub use request::{DateRange, DateSpec, Dimension, Metric, ReportQuery, ReportRequest};
pub use response::{
    BatchGetResponse, ColumnHeader, DateRangeValues, MCF_SEQUENCE, McfCell, McfColumnHeader,
    McfResponse, MetricHeader, MetricHeaderEntry, Report, ReportData, ReportRow,
};
pub use row::{FlatRow, FlattenOptions, VIEW_ID_COLUMN};
#[cfg(test)]
mod serde_tests;
