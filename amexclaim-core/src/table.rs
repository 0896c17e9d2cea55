//! In-memory table with named columns.
//!
//! Every row holds exactly one cell per column. Column lookups go through
//! [`Table::column_index`], which tries the exact name first and then a
//! whitespace/case-insensitive match, so statement exports that wrap headers
//! across lines ("Transaction\nAmount\nUSD") still resolve.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{ClaimError, Result};

/// Collapse runs of whitespace (including newlines) into a single space and trim.
pub fn normalize_column_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Key used for tolerant matching: no whitespace at all, lower-cased.
pub fn compact_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table, padding short rows with `Cell::Empty` and truncating long ones.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Empty);
        self.rows.push(row);
    }

    /// Resolve a column by exact name, falling back to a whitespace/case-insensitive match.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        if let Some(idx) = self.columns.iter().position(|c| c == name) {
            return Some(idx);
        }
        let wanted = compact_key(name);
        self.columns.iter().position(|c| compact_key(c) == wanted)
    }

    /// Like [`Table::column_index`] but fails with `ColumnMissing`.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| ClaimError::column_missing(name, &self.columns))
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Iterate one column's cells, top to bottom.
    pub fn column_cells(&self, col: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().filter_map(move |r| r.get(col))
    }

    /// Set every cell of a column to `value`.
    pub fn fill_column(&mut self, col: usize, value: &Cell) {
        for row in &mut self.rows {
            if let Some(cell) = row.get_mut(col) {
                *cell = value.clone();
            }
        }
    }

    pub fn rows_mut(&mut self) -> &mut Vec<Vec<Cell>> {
        &mut self.rows
    }

    /// Drop rows whose cells are all empty.
    pub fn drop_empty_rows(&mut self) {
        self.rows.retain(|r| !r.iter().all(Cell::is_empty));
    }
}
