//! Output formatting for CLI.

mod sink;

pub use sink::{CsvSink, parse_delimiter};
