//! Analytics Reporting API v4 (`ga:` identifiers).
//!
//! One `reports:batchGet` call per page, carrying a single report request.
//! Filters are translated from the v3 syntax into v4 clauses when the source
//! is built. Pagination follows `nextPageToken` until it is absent or empty.

mod parser;
mod request;
mod source;

pub use parser::{flatten_response, header_row, parse_response};
pub use request::{BatchGetRequest, build_batch_request};
pub use source::ReportingSource;
