//! Load a card statement and locate its header row.
//!
//! Corporate AMEX exports put a dozen or so lines of account preamble above the
//! transaction table, and the header cells are often wrapped across lines
//! ("Transaction\nAmount\nUSD"). The header is the first row, within the scan
//! window, that has a cell containing "transactionamount" once whitespace is
//! removed and the text lower-cased.

use amexclaim_core::columns::{HEADER_MARKER, HEADER_SCAN_LIMIT};
use amexclaim_core::table::compact_key;
use amexclaim_core::{normalize_column_name, Cell, ClaimError, Result, Table};
use std::path::Path;
use tracing::{debug, info};

use crate::format::detect_format;
use crate::readers::{read_raw_grid, RawGrid};

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedStatement {
    /// Zero-based index of the detected header row in the raw grid.
    pub header_row: usize,
    pub table: Table,
}

pub fn load_statement(path: impl AsRef<Path>, file_name: Option<&str>) -> Result<LoadedStatement> {
    let path = path.as_ref();
    let format = detect_format(path, file_name)?;
    let grid = read_raw_grid(path, format)?;
    let loaded = statement_from_grid(grid)?;
    info!(
        rows = loaded.table.len(),
        columns = loaded.table.columns().len(),
        header_row = loaded.header_row,
        "loaded statement {}",
        path.display()
    );
    Ok(loaded)
}

/// Turn a raw grid into a headed table: detect the header, normalize column
/// names, keep only the rows below it, drop fully-empty rows.
pub fn statement_from_grid(mut grid: RawGrid) -> Result<LoadedStatement> {
    let header_row = detect_header_row(&grid)?;
    let body = grid.split_off(header_row + 1);
    let header = grid.pop().unwrap_or_default();

    let columns = header
        .iter()
        .map(|cell| normalize_column_name(&cell.to_string()))
        .collect();

    let mut table = Table::from_rows(columns, body);
    table.drop_empty_rows();
    Ok(LoadedStatement { header_row, table })
}

pub fn detect_header_row(grid: &[Vec<Cell>]) -> Result<usize> {
    let limit = grid.len().min(HEADER_SCAN_LIMIT);
    for (idx, row) in grid.iter().take(limit).enumerate() {
        if row
            .iter()
            .any(|cell| compact_key(&cell.to_string()).contains(HEADER_MARKER))
        {
            debug!(row = idx, "detected statement header");
            return Ok(idx);
        }
    }
    Err(ClaimError::HeaderNotFound { scanned: limit })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("amex_statement.csv")
    }

    fn text_row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|s| Cell::from(*s)).collect()
    }

    #[test]
    fn test_detects_wrapped_header_at_row_five() {
        let mut grid: RawGrid = (0..5)
            .map(|i| text_row(&[format!("preamble {i}").as_str(), ""]))
            .collect();
        grid.push(text_row(&["Transaction\nAmount\nUSD", "Supplemental \nCardmember Last \nName"]));
        grid.push(text_row(&["10.00", "Smith"]));

        assert_eq!(detect_header_row(&grid).unwrap(), 5);

        let loaded = statement_from_grid(grid).unwrap();
        assert_eq!(loaded.header_row, 5);
        assert_eq!(
            loaded.table.columns(),
            &["Transaction Amount USD".to_string(), "Supplemental Cardmember Last Name".to_string()]
        );
        assert_eq!(loaded.table.len(), 1);
        assert_eq!(loaded.table.rows()[0][1], Cell::Text("Smith".into()));
    }

    #[test]
    fn test_header_outside_scan_window() {
        let mut grid: RawGrid = (0..HEADER_SCAN_LIMIT).map(|_| text_row(&["x"])).collect();
        grid.push(text_row(&["Transaction Amount USD"]));
        assert!(matches!(
            detect_header_row(&grid),
            Err(ClaimError::HeaderNotFound { scanned: 100 })
        ));
    }

    #[test]
    fn test_drops_fully_empty_rows() {
        let grid = vec![
            text_row(&["Transaction Amount USD", "Name"]),
            text_row(&["", ""]),
            text_row(&["5", "Doe"]),
        ];
        let loaded = statement_from_grid(grid).unwrap();
        assert_eq!(loaded.table.len(), 1);
    }

    #[test]
    fn test_load_fixture_statement() {
        let loaded = load_statement(fixture_path(), None).expect("should load amex_statement.csv");
        assert!(loaded.header_row > 0);
        assert!(loaded.table.column_index("Transaction Amount USD").is_some());
        assert!(loaded.table.column_index("Supplemental Cardmember Last Name").is_some());
        assert_eq!(loaded.table.len(), 8);
    }
}
