//! Raw grid readers. No header interpretation happens here.

pub mod delimited;
pub mod excel;
pub mod json;

use amexclaim_core::{Cell, Result};
use std::path::Path;

use crate::format::SourceFormat;

/// Untyped rows as read from the source file.
pub type RawGrid = Vec<Vec<Cell>>;

pub fn read_raw_grid(path: &Path, format: SourceFormat) -> Result<RawGrid> {
    let mut grid = match format {
        SourceFormat::Csv => delimited::read_delimited_path(path, b',')?,
        SourceFormat::Txt => delimited::read_delimited_path(path, b'\t')?,
        SourceFormat::Json => json::read_json_path(path)?,
        workbook => excel::read_first_sheet(path, workbook)?,
    };
    pad_rows(&mut grid);
    Ok(grid)
}

/// Pad every row to the widest row's length.
pub fn pad_rows(grid: &mut RawGrid) {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    for row in grid.iter_mut() {
        row.resize(width, Cell::Empty);
    }
}
