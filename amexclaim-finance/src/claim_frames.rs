//! Group cleaned statement rows by cardholder surname and project each group
//! into the claim import layout.

use amexclaim_core::columns::{
    AMOUNT, BRANCH, CLAIM_AMOUNT, DATE, DEFAULT_BRANCH, DEFAULT_PAID_WITH, DESCRIPTION,
    DESCRIPTION_SOURCE_COLUMN, GROUP_COLUMN, PAID_WITH, REFERENCE_SOURCE_COLUMN, REF_NBR,
    TRANSACTION_AMOUNT_COLUMN, TRANSACTION_DATE_COLUMN,
};
use amexclaim_core::{Cell, Result, Table};
use std::collections::HashMap;
use tracing::info;

/// Which statement columns feed the claim layout, and the fixed values it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimLayout {
    pub amount_column: String,
    pub date_column: String,
    pub description_column: String,
    /// Digit-stripped free text used as the claim reference number
    pub reference_column: String,
    /// Cardholder surname
    pub group_column: String,
    pub paid_with: String,
    pub branch: String,
}

impl Default for ClaimLayout {
    fn default() -> Self {
        Self {
            amount_column: TRANSACTION_AMOUNT_COLUMN.to_string(),
            date_column: TRANSACTION_DATE_COLUMN.to_string(),
            description_column: DESCRIPTION_SOURCE_COLUMN.to_string(),
            reference_column: REFERENCE_SOURCE_COLUMN.to_string(),
            group_column: GROUP_COLUMN.to_string(),
            paid_with: DEFAULT_PAID_WITH.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

impl ClaimLayout {
    /// (claim column, statement column) pairs copied row by row.
    pub fn field_mappings(&self) -> [(&'static str, &str); 5] {
        [
            (DATE, self.date_column.as_str()),
            (REF_NBR, self.reference_column.as_str()),
            (DESCRIPTION, self.description_column.as_str()),
            (AMOUNT, self.amount_column.as_str()),
            (CLAIM_AMOUNT, self.amount_column.as_str()),
        ]
    }
}

/// One cardholder's claim rows, columns in template order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimFrame {
    pub cardholder: String,
    pub table: Table,
}

/// Claim frames in order of each cardholder's first appearance in the statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClaimFrames {
    frames: Vec<ClaimFrame>,
}

impl ClaimFrames {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClaimFrame> {
        self.frames.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, ClaimFrame> {
        self.frames.iter_mut()
    }

    pub fn get(&self, cardholder: &str) -> Option<&ClaimFrame> {
        self.frames.iter().find(|f| f.cardholder == cardholder)
    }

    pub fn cardholders(&self) -> Vec<&str> {
        self.frames.iter().map(|f| f.cardholder.as_str()).collect()
    }

    pub fn total_rows(&self) -> usize {
        self.frames.iter().map(|f| f.table.len()).sum()
    }
}

impl<'a> IntoIterator for &'a ClaimFrames {
    type Item = &'a ClaimFrame;
    type IntoIter = std::slice::Iter<'a, ClaimFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl FromIterator<ClaimFrame> for ClaimFrames {
    fn from_iter<I: IntoIterator<Item = ClaimFrame>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

/// Surname key for a statement cell; `None` when the cell is blank.
pub fn cardholder_key(cell: &Cell) -> Option<String> {
    (!cell.is_blank()).then(|| cell.to_string())
}

pub fn generate_claim_frames(
    cleaned: &Table,
    template_columns: &[String],
    layout: &ClaimLayout,
) -> Result<ClaimFrames> {
    let group_idx = cleaned.require_column(&layout.group_column)?;

    // Group row indices by exact surname, remembering first-appearance order.
    let mut order: Vec<(String, Vec<usize>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (row_idx, row) in cleaned.rows().iter().enumerate() {
        let Some(key) = cardholder_key(&row[group_idx]) else {
            continue;
        };
        let pos = *positions.entry(key.clone()).or_insert_with(|| {
            order.push((key, Vec::new()));
            order.len() - 1
        });
        order[pos].1.push(row_idx);
    }

    let template = Table::new(template_columns.to_vec());
    let copies: Vec<(usize, Option<usize>)> = layout
        .field_mappings()
        .iter()
        .filter_map(|(target, source)| {
            template
                .column_index(target)
                .map(|t| (t, cleaned.column_index(source)))
        })
        .collect();
    let paid_with_idx = template.column_index(PAID_WITH);
    let branch_idx = template.column_index(BRANCH);

    let frames = order
        .into_iter()
        .map(|(cardholder, row_indices)| {
            let mut table = template.clone();
            for row_idx in row_indices {
                let source = &cleaned.rows()[row_idx];
                let mut out = vec![Cell::Empty; template_columns.len()];
                for &(target, src) in &copies {
                    if let Some(src) = src {
                        out[target] = source[src].clone();
                    }
                }
                table.push_row(out);
            }

            if let Some(idx) = paid_with_idx {
                table.fill_column(idx, &Cell::text(layout.paid_with.as_str()));
            }
            if let Some(idx) = branch_idx {
                if table.column_cells(idx).all(Cell::is_empty) {
                    table.fill_column(idx, &Cell::text(layout.branch.as_str()));
                }
            }

            ClaimFrame { cardholder, table }
        })
        .collect::<ClaimFrames>();

    info!("generated {} claim frames", frames.len());
    Ok(frames)
}
