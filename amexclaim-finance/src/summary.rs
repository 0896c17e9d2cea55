//! Per-cardholder totals and a row-count check that every cleaned statement
//! row landed in exactly one claim frame.

use amexclaim_core::columns::{AMOUNT, CORPORATE_CARD};
use amexclaim_core::{Result, Table};
use serde::Serialize;
use std::collections::HashMap;

use crate::claim_frames::{cardholder_key, ClaimFrames};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimSummary {
    pub cardholder: String,
    pub rows: usize,
    pub total_amount: f64,
    pub corporate_card: String,
}

/// One line per cardholder, sorted by cardholder. Non-numeric amounts count as 0.
pub fn summarize(frames: &ClaimFrames) -> Vec<ClaimSummary> {
    let mut out: Vec<ClaimSummary> = frames
        .iter()
        .map(|frame| {
            let table = &frame.table;
            let total_amount = table
                .column_index(AMOUNT)
                .map(|idx| table.column_cells(idx).filter_map(|c| c.as_number()).sum::<f64>())
                .unwrap_or(0.0);
            let corporate_card = table
                .column_index(CORPORATE_CARD)
                .and_then(|idx| table.cell(0, idx))
                .map(|c| c.to_string())
                .unwrap_or_default();
            ClaimSummary {
                cardholder: frame.cardholder.clone(),
                rows: table.len(),
                total_amount,
                corporate_card,
            }
        })
        .collect();
    out.sort_by(|a, b| a.cardholder.cmp(&b.cardholder));
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowMismatch {
    pub cardholder: String,
    pub statement_rows: usize,
    pub claim_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Reconciliation {
    pub cleaned_rows: usize,
    pub grouped_rows: usize,
    pub missing_surname_rows: usize,
    pub mismatches: Vec<RowMismatch>,
}

impl Reconciliation {
    /// Grouping was an exact partition of the rows that carry a surname.
    pub fn is_balanced(&self) -> bool {
        self.mismatches.is_empty() && self.grouped_rows + self.missing_surname_rows == self.cleaned_rows
    }
}

pub fn reconcile(cleaned: &Table, frames: &ClaimFrames, group_column: &str) -> Result<Reconciliation> {
    let group_idx = cleaned.require_column(group_column)?;

    let mut expected: HashMap<String, usize> = HashMap::new();
    let mut missing_surname_rows = 0;
    for row in cleaned.rows() {
        match cardholder_key(&row[group_idx]) {
            Some(key) => *expected.entry(key).or_default() += 1,
            None => missing_surname_rows += 1,
        }
    }

    let mut mismatches = Vec::new();
    for frame in frames {
        let statement_rows = expected.remove(&frame.cardholder).unwrap_or(0);
        if statement_rows != frame.table.len() {
            mismatches.push(RowMismatch {
                cardholder: frame.cardholder.clone(),
                statement_rows,
                claim_rows: frame.table.len(),
            });
        }
    }
    // Cardholders in the statement with no frame at all
    let mut leftover: Vec<_> = expected.into_iter().collect();
    leftover.sort();
    mismatches.extend(leftover.into_iter().map(|(cardholder, statement_rows)| RowMismatch {
        cardholder,
        statement_rows,
        claim_rows: 0,
    }));

    Ok(Reconciliation {
        cleaned_rows: cleaned.len(),
        grouped_rows: frames.total_rows(),
        missing_surname_rows,
        mismatches,
    })
}
