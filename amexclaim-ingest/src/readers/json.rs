//! JSON statements: either an array of rows (arrays) or an array of records
//! (objects). Records are flattened to a key row followed by value rows so the
//! header scan can find them like any other grid.

use amexclaim_core::{Cell, ClaimError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

use super::RawGrid;

pub fn read_json_path(path: &Path) -> Result<RawGrid> {
    let text = fs::read_to_string(path)?;
    read_json_str(&text)
}

pub fn read_json_str(text: &str) -> Result<RawGrid> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(items) = value else {
        return Err(ClaimError::UnsupportedFormat(
            "JSON statement must be an array of rows or records".to_string(),
        ));
    };

    if items.iter().all(Value::is_array) {
        return Ok(items
            .iter()
            .filter_map(Value::as_array)
            .map(|row| row.iter().map(cell_from_value).collect())
            .collect());
    }

    if items.iter().all(Value::is_object) {
        let mut keys: Vec<String> = Vec::new();
        for obj in items.iter().filter_map(Value::as_object) {
            for key in obj.keys() {
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }

        let mut grid: RawGrid = vec![keys.iter().map(|k| Cell::text(k.as_str())).collect()];
        for obj in items.iter().filter_map(Value::as_object) {
            grid.push(
                keys.iter()
                    .map(|k| obj.get(k).map(cell_from_value).unwrap_or_default())
                    .collect(),
            );
        }
        return Ok(grid);
    }

    Err(ClaimError::UnsupportedFormat(
        "JSON statement mixes rows and records".to_string(),
    ))
}

fn cell_from_value(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Empty,
        Value::Bool(b) => Cell::Bool(*b),
        Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or_default(),
        Value::String(s) => Cell::text(s.as_str()),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_become_key_row() {
        let text = r#"[
            {"Transaction Amount USD": 12.5, "Supplemental Cardmember Last Name": "Smith"},
            {"Transaction Amount USD": "-3.00", "Supplemental Cardmember Last Name": null}
        ]"#;
        let grid = read_json_str(text).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0][0], Cell::Text("Transaction Amount USD".into()));
        assert_eq!(grid[1][0], Cell::Number(12.5));
        assert_eq!(grid[2][1], Cell::Empty);
    }

    #[test]
    fn test_record_keys_keep_document_order() {
        let text = r#"[
            {"Transaction Amount USD": 1, "Supplemental Cardmember Last Name": "Smith", "Date": "x"},
            {"Date": "y", "Card": "1234", "Transaction Amount USD": 2}
        ]"#;
        let grid = read_json_str(text).unwrap();
        let keys: Vec<String> = grid[0].iter().map(Cell::to_string).collect();
        assert_eq!(
            keys,
            vec!["Transaction Amount USD", "Supplemental Cardmember Last Name", "Date", "Card"]
        );
        assert_eq!(grid[2][3], Cell::Text("1234".into()));
        assert_eq!(grid[2][1], Cell::Empty);
    }

    #[test]
    fn test_array_rows() {
        let grid = read_json_str(r#"[["Statement"], ["Transaction Amount", "Name"], [5, "Doe"]]"#).unwrap();
        assert_eq!(grid[2], vec![Cell::Number(5.0), Cell::Text("Doe".into())]);
    }

    #[test]
    fn test_rejects_object_root() {
        assert!(matches!(
            read_json_str(r#"{"a": 1}"#),
            Err(ClaimError::UnsupportedFormat(_))
        ));
    }
}
