// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `gadown` Providers
//!
//! Implementations of the two Google Analytics APIs a query can target.
//! Each module includes:
//!
//! - **Request**: Request body / query parameter construction
//! - **Parser**: Response parsing and row flattening
//! - **Source**: A [`ReportSource`](gadown_fetch::ReportSource) paging through the API
//!
//! | API | Prefix | Call | Pagination | Filters |
//! |-----|--------|------|------------|---------|
//! | Reporting v4 | `ga:` | `POST reports:batchGet` | `nextPageToken` | clauses |
//! | Multi-Channel Funnels v3 | `mcf:` | `GET data/mcf` | `start-index` | verbatim |
//!
//! ## Usage
//!
//! ```ignore
//! use gadown_core::{FilterGrouping, FlattenOptions, ReportQuery};
//! use gadown_fetch::{DownloadPipeline, FetchContext};
//!
//! let query = ReportQuery::new("123", "7daysAgo", "today", "ga:sessions", Some("ga:date"), None)?;
//! let options = FlattenOptions::default();
//! let source = gadown_providers::source_for(&query, options, FilterGrouping::Flatten)?;
//!
//! let ctx = FetchContext::builder().credentials(credentials).build()?;
//! DownloadPipeline::new().run(source.as_ref(), &ctx, &mut sink).await?;
//! ```

pub mod funnel;
pub mod reporting;


use gadown_core::{ApiVariant, CoreError, FilterGrouping, FlattenOptions, ReportQuery};
use gadown_fetch::ReportSource;
use tracing::debug;

pub use funnel::FunnelSource;
pub use reporting::ReportingSource;

/// Returns the source serving the query's API.
///
/// Filter translation for the Reporting API happens here, so an invalid
/// filter fails before any request is made.
pub fn source_for(
    query: &ReportQuery,
    options: FlattenOptions,
    grouping: FilterGrouping,
) -> Result<Box<dyn ReportSource>, CoreError> {
    debug!(api = %query.api, "Selecting report source");

    Ok(match query.api {
        ApiVariant::Reporting => Box::new(ReportingSource::new(query, options, grouping)?),
        ApiVariant::Funnel => Box::new(FunnelSource::new(query, options)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flattened(query: &ReportQuery) -> Result<Box<dyn ReportSource>, CoreError> {
        source_for(query, FlattenOptions::default(), FilterGrouping::Flatten)
    }

    #[test]
    fn test_source_for_reporting() {
        let query = ReportQuery::new("1", "today", "today", "ga:sessions", None, None).unwrap();
        let source = flattened(&query).unwrap();
        assert_eq!(source.id(), "reporting");
    }

    #[test]
    fn test_source_for_funnel_ignores_filter_syntax() {
        // Funnel filters are never translated, so brackets are not rejected here.
        let query = ReportQuery::new(
            "1",
            "today",
            "today",
            "mcf:totalConversions",
            None,
            Some("(mcf:source==google)"),
        )
        .unwrap();
        let source = flattened(&query).unwrap();
        assert_eq!(source.id(), "funnel");
    }

    #[test]
    fn test_source_for_invalid_reporting_filter() {
        let filters = Some("ga:sessions");
        let query = ReportQuery::new("1", "today", "today", "ga:sessions", None, filters).unwrap();
        let err = flattened(&query).err().unwrap();
        assert!(err.is_query_error());
    }
}
