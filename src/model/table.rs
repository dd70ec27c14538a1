//! Table types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A reconstructed table: rows of cell text.
///
/// Rows are ordered by ascending row index and cells within a row by
/// ascending column index. Rows can have different lengths when the OCR
/// output skipped cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    /// Rows of cell text
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from rows of text.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (widest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text of a cell by 0-based position.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| c.trim_end())
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Collects cell text by (row, column) and flattens it into a [`Table`].
#[derive(Debug, Default)]
pub struct TableBuilder {
    cells: BTreeMap<u32, BTreeMap<u32, String>>,
}

impl TableBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place text at a cell position. A repeated position keeps the last text.
    pub fn insert(&mut self, row: u32, column: u32, text: String) {
        self.cells.entry(row).or_default().insert(column, text);
    }

    /// Flatten into rows ordered by row index, then column index.
    pub fn build(self) -> Table {
        Table {
            rows: self
                .cells
                .into_values()
                .map(|columns| columns.into_values().collect())
                .collect(),
        }
    }
}
