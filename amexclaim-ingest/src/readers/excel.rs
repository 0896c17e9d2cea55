//! First worksheet of an .xlsx/.xls workbook, with sheet-absolute row positions.

use amexclaim_core::{Cell, ClaimError, Result};
use calamine::{open_workbook, Data, Range, Reader, Xls, Xlsx};
use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::RawGrid;
use crate::format::SourceFormat;

pub fn read_first_sheet(path: &Path, format: SourceFormat) -> Result<RawGrid> {
    if !format.is_excel() {
        return Err(ClaimError::UnsupportedFormat(format!(
            "{format} is not an Excel workbook"
        )));
    }
    let range = if format == SourceFormat::Xls {
        let mut wb: Xls<_> = open_workbook(path).map_err(ClaimError::workbook)?;
        first_range(&mut wb)?
    } else {
        let mut wb: Xlsx<_> = open_workbook(path).map_err(ClaimError::workbook)?;
        first_range(&mut wb)?
    };
    Ok(range_to_grid(&range))
}

fn first_range<R>(wb: &mut R) -> Result<Range<Data>>
where
    R: Reader<BufReader<File>>,
    R::Error: Display,
{
    wb.worksheet_range_at(0)
        .ok_or_else(|| ClaimError::Workbook("workbook has no worksheets".to_string()))?
        .map_err(ClaimError::workbook)
}

fn range_to_grid(range: &Range<Data>) -> RawGrid {
    // calamine trims leading empty rows/columns; restore them so row indices
    // match what a user sees in the spreadsheet.
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut grid: RawGrid = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; col_offset];
        cells.extend(row.iter().map(cell_from_data));
        grid.push(cells);
    }
    grid
}

pub fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::text(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(Cell::DateTime)
            .unwrap_or_else(|| Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) => Cell::text(s.as_str()),
        // #N/A, #DIV/0! and friends carry no usable value
        _ => Cell::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::tempdir;

    #[test]
    fn test_read_xlsx_keeps_types_and_offsets() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("statement.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(2, 0, "Transaction\nAmount\nUSD").unwrap();
        sheet.write_string(2, 1, "Supplemental Cardmember Last Name").unwrap();
        sheet.write_number(3, 0, 42.5).unwrap();
        sheet.write_string(3, 1, "Smith").unwrap();
        workbook.save(&path).unwrap();

        let grid = read_first_sheet(&path, SourceFormat::Xlsx).unwrap();
        assert_eq!(grid.len(), 4);
        assert!(grid[0].is_empty());
        assert_eq!(grid[2][0], Cell::Text("Transaction\nAmount\nUSD".into()));
        assert_eq!(grid[3][0], Cell::Number(42.5));
        assert_eq!(grid[3][1], Cell::Text("Smith".into()));
    }

    #[test]
    fn test_rejects_non_excel() {
        let err = read_first_sheet(Path::new("x.csv"), SourceFormat::Csv).unwrap_err();
        assert!(matches!(err, ClaimError::UnsupportedFormat(_)));
    }
}
