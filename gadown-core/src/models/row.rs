//! Flattened output rows.

use serde::{Deserialize, Serialize};

/// Column name used for the leading view id column.
pub const VIEW_ID_COLUMN: &str = "vid";

/// One output record: string cells in output column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatRow(pub Vec<String>);

impl FlatRow {
    /// Creates a row, optionally starting with the view id.
    pub fn with_leading(leading: Option<&str>, capacity: usize) -> Self {
        let mut cells = Vec::with_capacity(capacity + usize::from(leading.is_some()));
        if let Some(id) = leading {
            cells.push(id.to_string());
        }
        Self(cells)
    }

    /// Appends a cell.
    pub fn push(&mut self, cell: impl Into<String>) {
        self.0.push(cell.into());
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The cells.
    pub fn cells(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for FlatRow {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Options shared by both flatteners.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Value of the leading identifier column, if requested.
    pub leading_id: Option<String>,
    /// Whether to produce a header row.
    pub header: bool,
}

impl FlattenOptions {
    /// The leading identifier as a string slice.
    pub fn leading(&self) -> Option<&str> {
        self.leading_id.as_deref()
    }
}
