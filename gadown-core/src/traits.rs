//! Trait definitions for gadown.
//!
//! This module defines the seam between row producers and output.

use crate::error::CoreError;
use crate::models::FlatRow;

/// Destination for flattened rows.
///
/// Rows arrive page by page; [`flush`](RowSink::flush) is called after every
/// page so that a consumer of the stream sees output incrementally.
pub trait RowSink {
    /// Writes one record.
    fn write_row(&mut self, row: &FlatRow) -> Result<(), CoreError>;

    /// Flushes buffered records.
    fn flush(&mut self) -> Result<(), CoreError> {
        Ok(())
    }
}

impl RowSink for Vec<FlatRow> {
    fn write_row(&mut self, row: &FlatRow) -> Result<(), CoreError> {
        self.push(row.clone());
        Ok(())
    }
}

impl<S: RowSink + ?Sized> RowSink for &mut S {
    fn write_row(&mut self, row: &FlatRow) -> Result<(), CoreError> {
        (**self).write_row(row)
    }

    fn flush(&mut self) -> Result<(), CoreError> {
        (**self).flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_all<S: RowSink>(mut sink: S, rows: &[FlatRow]) -> Result<(), CoreError> {
        for row in rows {
            sink.write_row(row)?;
        }
        sink.flush()
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let rows: Vec<FlatRow> = vec![
            ["a", "1"].into_iter().collect(),
            ["b", "2"].into_iter().collect(),
        ];
        let mut sink = Vec::new();
        write_all(&mut sink, &rows).unwrap();
        assert_eq!(sink, rows);
    }
}
