//! Reporting API response parsing and flattening.
//!
//! Each row becomes `[vid?] dimensions… metrics…`. Dimension cells are
//! aligned with the report's dimension header and metric cells with its
//! metric header entries; extra cells on either side are dropped. Only the
//! first date-range block of a row is used.

use gadown_core::{BatchGetResponse, FlatRow, FlattenOptions, Report, VIEW_ID_COLUMN};
use gadown_fetch::{FetchError, Page};
use tracing::debug;

/// Parses a `reports:batchGet` response body.
pub fn parse_response(json: &str) -> Result<BatchGetResponse, FetchError> {
    let response: BatchGetResponse = serde_json::from_str(json)?;
    debug!(reports = response.reports.len(), "Parsed batchGet response");
    Ok(response)
}

/// Builds the header row for a report.
pub fn header_row(report: &Report, options: &FlattenOptions) -> FlatRow {
    let header = &report.column_header;
    let entries = &header.metric_header.metric_header_entries;

    let mut row = FlatRow::with_leading(
        options.leading().map(|_| VIEW_ID_COLUMN),
        header.dimensions.len() + entries.len(),
    );
    for dimension in &header.dimensions {
        row.push(dimension.as_str());
    }
    for entry in entries {
        row.push(entry.name.as_str());
    }
    row
}

fn flatten_report(report: &Report, options: &FlattenOptions, rows: &mut Vec<FlatRow>) {
    let header = &report.column_header;
    let entries = &header.metric_header.metric_header_entries;

    for source in &report.data.rows {
        let mut row = FlatRow::with_leading(
            options.leading(),
            header.dimensions.len() + entries.len(),
        );

        for (_, dimension) in header.dimensions.iter().zip(&source.dimensions) {
            row.push(dimension.as_str());
        }

        if let Some(first_range) = source.metrics.first() {
            for (_, value) in entries.iter().zip(&first_range.values) {
                row.push(value.as_str());
            }
        }

        rows.push(row);
    }
}

/// Flattens every report of a response into one page.
///
/// The header, when requested, is taken from the last report. Data rows of
/// all reports are emitted in order. The returned page has no `next` cursor.
pub fn flatten_response(response: &BatchGetResponse, options: &FlattenOptions) -> Page {
    let mut rows = Vec::new();
    for report in &response.reports {
        flatten_report(report, options, &mut rows);
    }

    let header = if options.header {
        response.reports.last().map(|report| header_row(report, options))
    } else {
        None
    };

    Page {
        header,
        rows,
        next: None,
    }
}

// ============================================================================
// Tests
// ============================================================================
