// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `gadown` Core
//!
//! Core types, filter translation and API classification for `gadown`.
//!
//! This crate provides the foundational abstractions used across all other
//! `gadown` crates, including:
//!
//! - Report query and request models for both reporting APIs
//! - The v3 filter expression translator
//! - The metric/dimension vocabulary
//! - Error types and the row sink trait
//!
//! ## Key Types
//!
//! ### Query Types
//! - [`ReportQuery`] - Validated invocation input
//! - [`ApiVariant`] - Which API serves the query (`ga:` / `mcf:`)
//! - [`ReportRequest`] - Reporting API v4 request body
//!
//! ### Filters
//! - [`parse_filter`] / [`apply_filter`] - v3 filter string to v4 clauses
//! - [`FilterGrouping`] - How OR/AND groups are mapped
//!
//! ### Responses & Rows
//! - [`BatchGetResponse`] - Reporting API v4 response
//! - [`McfResponse`] - Multi-Channel Funnels response
//! - [`FlatRow`] - One output record
//! - [`RowSink`] - Output destination

pub mod error;
pub mod filter;
pub mod models;
pub mod traits;
pub mod vocabulary;

// Re-export error types
pub use error::{CoreError, FilterError};

// Re-export filter translation
pub use filter::{FilterGrouping, FilterTerm, apply_filter, parse_filter, parse_term};

// Re-export all model types
pub use models::{
    // API
    ApiVariant,
    // Clauses
    ClauseOperator,
    DimensionFilter,
    DimensionFilterClause,
    FilterClauses,
    MatchOperator,
    MetricFilter,
    MetricFilterClause,
    // Requests
    DateRange,
    DateSpec,
    Dimension,
    Metric,
    ReportQuery,
    ReportRequest,
    // Responses
    BatchGetResponse,
    ColumnHeader,
    DateRangeValues,
    MCF_SEQUENCE,
    McfCell,
    McfColumnHeader,
    McfResponse,
    MetricHeader,
    MetricHeaderEntry,
    Report,
    ReportData,
    ReportRow,
    // Rows
    FlatRow,
    FlattenOptions,
    VIEW_ID_COLUMN,
};

// Re-export traits
pub use traits::RowSink;

// Re-export vocabulary
pub use vocabulary::FieldKind;
