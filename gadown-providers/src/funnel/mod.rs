//! Multi-Channel Funnels API v3 (`mcf:` identifiers).
//!
//! A `GET data/mcf` call per page. Filters are passed through in their v3
//! form. A response carrying `nextLink` is followed by advancing
//! `start-index` by the page's `max-results` (1000 when absent).

mod parser;
mod request;
mod source;

pub use parser::{flatten_response, header_row, parse_response};
pub use request::{DEFAULT_MAX_RESULTS, FIRST_START_INDEX, build_query, next_start_index};
pub use source::FunnelSource;
