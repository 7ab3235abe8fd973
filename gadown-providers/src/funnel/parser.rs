//! Funnel API response parsing and flattening.
//!
//! Cells are matched to column headers by position. A cell under an
//! `MCF_SEQUENCE` column is written as the JSON encoding of its
//! `conversionPathValue`; every other cell is its `primitiveValue`.

use gadown_core::{FlatRow, FlattenOptions, McfCell, McfColumnHeader, McfResponse, VIEW_ID_COLUMN};
use gadown_fetch::{FetchError, Page};
use tracing::debug;

/// Parses a `data/mcf` response body.
pub fn parse_response(json: &str) -> Result<McfResponse, FetchError> {
    let response: McfResponse = serde_json::from_str(json)?;
    debug!(
        columns = response.column_headers.len(),
        rows = response.rows.len(),
        "Parsed mcf response"
    );
    Ok(response)
}

/// Builds the header row from the declared columns.
pub fn header_row(response: &McfResponse, options: &FlattenOptions) -> FlatRow {
    let mut row = FlatRow::with_leading(
        options.leading().map(|_| VIEW_ID_COLUMN),
        response.column_headers.len(),
    );
    for column in &response.column_headers {
        row.push(column.name.as_str());
    }
    row
}

fn cell_value(column: &McfColumnHeader, cell: &McfCell) -> Result<String, FetchError> {
    if column.is_sequence() {
        let value = cell.conversion_path_value.as_ref().ok_or_else(|| {
            FetchError::InvalidResponse(format!(
                "column `{}` has no conversionPathValue",
                column.name
            ))
        })?;
        return Ok(serde_json::to_string(value)?);
    }

    cell.primitive_value.clone().ok_or_else(|| {
        FetchError::InvalidResponse(format!("column `{}` has no primitiveValue", column.name))
    })
}

/// Flattens a response into one page. The returned page has no `next` cursor.
pub fn flatten_response(
    response: &McfResponse,
    options: &FlattenOptions,
) -> Result<Page, FetchError> {
    let columns = &response.column_headers;
    let mut rows = Vec::with_capacity(response.rows.len());

    for cells in &response.rows {
        if cells.len() > columns.len() {
            return Err(FetchError::InvalidResponse(format!(
                "row has {} cells but only {} columns are declared",
                cells.len(),
                columns.len()
            )));
        }

        let mut row = FlatRow::with_leading(options.leading(), cells.len());
        for (column, cell) in columns.iter().zip(cells) {
            row.push(cell_value(column, cell)?);
        }
        rows.push(row);
    }

    Ok(Page {
        header: options.header.then(|| header_row(response, options)),
        rows,
        next: None,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn response(value: &Value) -> McfResponse {
        parse_response(&value.to_string()).unwrap()
    }

    fn sample() -> McfResponse {
        response(&json!({
            "columnHeaders": [
                {
                    "name": "mcf:basicChannelGroupingPath",
                    "columnType": "DIMENSION",
                    "dataType": "MCF_SEQUENCE"
                },
                {"name": "mcf:conversionDate", "columnType": "DIMENSION", "dataType": "STRING"},
                {"name": "mcf:totalConversions", "columnType": "METRIC", "dataType": "INTEGER"}
            ],
            "rows": [
                [
                    {"conversionPathValue": [
                        {"interactionType": "CLICK", "nodeValue": "Organic Search"},
                        {"interactionType": "", "nodeValue": "Direct"}
                    ]},
                    {"primitiveValue": "20240101"},
                    {"primitiveValue": "3"}
                ],
                [
                    {"conversionPathValue": []},
                    {"primitiveValue": "20240102"},
                    {"primitiveValue": "0"}
                ]
            ]
        }))
    }

    #[test]
    fn test_sequence_cells_are_json() {
        let page = flatten_response(&sample(), &FlattenOptions::default()).unwrap();

        assert_eq!(page.rows.len(), 2);
        let cell = &page.rows[0].cells()[0];
        let parsed: Value = serde_json::from_str(cell).unwrap();
        assert_eq!(
            parsed,
            json!([
                {"interactionType": "CLICK", "nodeValue": "Organic Search"},
                {"interactionType": "", "nodeValue": "Direct"}
            ])
        );
        // Upstream key order is kept.
        assert!(cell.starts_with(r#"[{"interactionType":"CLICK""#));
        assert_eq!(page.rows[1].cells()[0], "[]");
    }

    #[test]
    fn test_primitive_cells_pass_through() {
        let page = flatten_response(&sample(), &FlattenOptions::default()).unwrap();
        assert_eq!(&page.rows[0].cells()[1..], ["20240101", "3"]);
    }

    #[test]
    fn test_identifier_and_header() {
        let options = FlattenOptions {
            leading_id: Some("12345".into()),
            header: true,
        };
        let page = flatten_response(&sample(), &options).unwrap();

        assert_eq!(
            page.header.unwrap().cells(),
            ["vid", "mcf:basicChannelGroupingPath", "mcf:conversionDate", "mcf:totalConversions"]
        );
        assert_eq!(page.rows[0].len(), 4);
        assert_eq!(page.rows[0].cells()[0], "12345");
    }

    #[test]
    fn test_missing_primitive_value() {
        let response = response(&json!({
            "columnHeaders": [{"name": "mcf:totalConversions", "dataType": "INTEGER"}],
            "rows": [[{}]]
        }));
        assert!(matches!(
            flatten_response(&response, &FlattenOptions::default()),
            Err(FetchError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_more_cells_than_columns() {
        let response = response(&json!({
            "columnHeaders": [{"name": "mcf:totalConversions", "dataType": "INTEGER"}],
            "rows": [[{"primitiveValue": "1"}, {"primitiveValue": "2"}]]
        }));
        assert!(matches!(
            flatten_response(&response, &FlattenOptions::default()),
            Err(FetchError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_no_rows() {
        let empty = response(&json!({"columnHeaders": []}));
        let page = flatten_response(&empty, &FlattenOptions::default()).unwrap();
        assert!(page.rows.is_empty());
    }
}
