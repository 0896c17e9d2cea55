//! Statement cleaning: numeric amounts, credits/refunds removed, digits
//! stripped from the reference description.

use amexclaim_core::{Cell, Result, Table};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::{info, warn};

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CleanReport {
    pub input_rows: usize,
    pub kept: usize,
    /// Credits and refunds (amount < 0)
    pub dropped_negative: usize,
    /// Amounts that were empty or not a number
    pub dropped_unparseable: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedStatement {
    pub table: Table,
    pub report: CleanReport,
}

/// Parse a statement amount. Text has `$` and `,` removed before parsing.
pub fn parse_amount(cell: &Cell) -> Option<f64> {
    let value = match cell {
        Cell::Number(n) => *n,
        Cell::Text(s) => s.replace(['$', ','], "").trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

pub fn strip_digits(s: &str) -> String {
    DIGITS.replace_all(s, "").into_owned()
}

pub fn clean_statement(
    mut table: Table,
    amount_column: &str,
    description_column: &str,
) -> Result<CleanedStatement> {
    let amount_idx = table.require_column(amount_column)?;
    let description_idx = table.column_index(description_column);

    let mut report = CleanReport {
        input_rows: table.len(),
        ..CleanReport::default()
    };

    table.rows_mut().retain_mut(|row| {
        let Some(amount) = parse_amount(&row[amount_idx]) else {
            report.dropped_unparseable += 1;
            return false;
        };
        if amount < 0.0 {
            report.dropped_negative += 1;
            return false;
        }
        row[amount_idx] = Cell::Number(amount);

        if let Some(idx) = description_idx {
            let stripped = row[idx].as_text().map(strip_digits);
            if let Some(text) = stripped {
                row[idx] = Cell::text(text);
            }
        }
        true
    });
    report.kept = table.len();

    if report.dropped_unparseable > 0 {
        warn!(
            dropped = report.dropped_unparseable,
            "dropped rows with empty or non-numeric amounts"
        );
    }
    info!(
        kept = report.kept,
        dropped_negative = report.dropped_negative,
        "statement cleaned: {} rows remain after amount filtering",
        report.kept
    );

    Ok(CleanedStatement { table, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use amexclaim_core::columns::{REFERENCE_SOURCE_COLUMN, TRANSACTION_AMOUNT_COLUMN};
    use amexclaim_core::ClaimError;

    fn statement(rows: Vec<Vec<Cell>>) -> Table {
        Table::from_rows(
            vec![
                "Transaction Amount USD".into(),
                "Transaction Description 4".into(),
                "Supplemental Cardmember Last Name".into(),
            ],
            rows,
        )
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(&Cell::from("$1,250.00")), Some(1250.0));
        assert_eq!(parse_amount(&Cell::from(" 84.10 ")), Some(84.10));
        assert_eq!(parse_amount(&Cell::from("-$84.10")), Some(-84.10));
        assert_eq!(parse_amount(&Cell::Number(3.5)), Some(3.5));
        assert_eq!(parse_amount(&Cell::from("PENDING")), None);
        assert_eq!(parse_amount(&Cell::from("nan")), None);
        assert_eq!(parse_amount(&Cell::Empty), None);
    }

    #[test]
    fn test_strip_digits() {
        assert_eq!(strip_digits("Flight 4521 to NYC"), "Flight  to NYC");
        assert_eq!(strip_digits("Order 1002-77"), "Order -");
    }

    #[test]
    fn test_clean_drops_negative_and_unparseable() {
        let table = statement(vec![
            vec!["$1,250.00".into(), "Flight 4521 to NYC".into(), "Smith".into()],
            vec!["-$84.10".into(), "Refund 1".into(), "Smith".into()],
            vec!["PENDING".into(), "Trip 551".into(), "Doe".into()],
            vec!["0.00".into(), Cell::Number(7.0), "Doe".into()],
        ]);

        let cleaned = clean_statement(table, TRANSACTION_AMOUNT_COLUMN, REFERENCE_SOURCE_COLUMN).unwrap();
        assert_eq!(
            cleaned.report,
            CleanReport {
                input_rows: 4,
                kept: 2,
                dropped_negative: 1,
                dropped_unparseable: 1,
            }
        );
        let rows = cleaned.table.rows();
        assert_eq!(rows[0][0], Cell::Number(1250.0));
        assert_eq!(rows[0][1], Cell::Text("Flight  to NYC".into()));
        // non-text descriptions pass through
        assert_eq!(rows[1][1], Cell::Number(7.0));
    }

    #[test]
    fn test_tolerant_amount_column() {
        let table = statement(vec![vec!["5".into(), Cell::Empty, "Doe".into()]]);
        let cleaned = clean_statement(table, "transaction amount usd", "missing column").unwrap();
        assert_eq!(cleaned.report.kept, 1);
    }

    #[test]
    fn test_missing_amount_column() {
        let table = Table::from_rows(vec!["Amount".into()], vec![vec!["5".into()]]);
        let err = clean_statement(table, TRANSACTION_AMOUNT_COLUMN, REFERENCE_SOURCE_COLUMN).unwrap_err();
        match err {
            ClaimError::ColumnMissing { column, available } => {
                assert_eq!(column, TRANSACTION_AMOUNT_COLUMN);
                assert_eq!(available, vec!["Amount".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
