//! CSV row sink.
//!
//! Excel dialect: quotes only where needed, CRLF line endings. The
//! delimiter is chosen per sink.

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use gadown_core::{CoreError, FlatRow, RowSink};

/// Writes flattened rows as CSV records.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    /// Creates a sink writing to `inner` with the given delimiter byte.
    pub fn new(inner: W, delimiter: u8) -> Self {
        let writer = WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::CRLF)
            .flexible(true)
            .from_writer(inner);
        Self { writer }
    }

    /// Flushes and returns the underlying writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(inner) => inner,
            Err(err) => panic!("failed to flush csv writer: {err}"),
        }
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn write_row(&mut self, row: &FlatRow) -> Result<(), CoreError> {
        self.writer
            .write_record(row.cells())
            .map_err(|e| CoreError::Output(e.to_string()))
    }

    fn flush(&mut self) -> Result<(), CoreError> {
        self.writer
            .flush()
            .map_err(|e| CoreError::Output(e.to_string()))
    }
}

/// Parses a `--delimiter-char` value.
///
/// A literal `\t` (backslash and `t`) means tab. Anything else must be a
/// single ASCII character.
pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    if value == "\\t" {
        return Ok(b'\t');
    }

    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!(
            "delimiter must be a single ASCII character or \\t, got `{value}`"
        )),
    }
}
