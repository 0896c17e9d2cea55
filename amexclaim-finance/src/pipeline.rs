//! End-to-end run: statement → cleaned rows → claim frames → corporate cards → files.

use amexclaim_core::{ClaimError, Result};
use amexclaim_ingest::load_statement;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::claim_frames::{generate_claim_frames, ClaimLayout};
use crate::cleaner::{clean_statement, CleanReport, CleanedStatement};
use crate::corporate::{apply_corporate_cards, load_corporate_mapping};
use crate::export::{bundle_claim_frames, save_claim_frames, ExportFormat};
use crate::summary::{reconcile, summarize, ClaimSummary, Reconciliation};
use crate::template::resolve_template;

#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub statement: PathBuf,
    /// Original file name, when `statement` has no usable extension
    pub statement_name: Option<String>,
    pub output_dir: PathBuf,
    pub corporate: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub format: ExportFormat,
    /// Also bundle every claim file into this ZIP archive
    pub bundle: Option<PathBuf>,
    pub layout: ClaimLayout,
}

impl PipelineRequest {
    pub fn new(statement: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            statement: statement.into(),
            statement_name: None,
            output_dir: output_dir.into(),
            corporate: None,
            template: None,
            format: ExportFormat::default(),
            bundle: None,
            layout: ClaimLayout::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub header_row: usize,
    pub clean: CleanReport,
    pub files: Vec<PathBuf>,
    pub bundle: Option<PathBuf>,
    pub claims: Vec<ClaimSummary>,
    pub reconciliation: Reconciliation,
}

#[derive(Debug, Clone)]
pub struct PreparedStatement {
    pub header_row: usize,
    pub cleaned: CleanedStatement,
}

/// Load and clean a statement; fails with `EmptyResult` when no row survives.
pub fn prepare_statement(
    path: &Path,
    file_name: Option<&str>,
    layout: &ClaimLayout,
) -> Result<PreparedStatement> {
    let loaded = load_statement(path, file_name)?;
    let cleaned = clean_statement(loaded.table, &layout.amount_column, &layout.reference_column)?;
    if cleaned.table.is_empty() {
        return Err(ClaimError::EmptyResult(format!(
            "no rows with a non-negative '{}' remain in {}",
            layout.amount_column,
            path.display()
        )));
    }
    Ok(PreparedStatement {
        header_row: loaded.header_row,
        cleaned,
    })
}

pub fn run(req: &PipelineRequest) -> Result<RunSummary> {
    let prepared = prepare_statement(&req.statement, req.statement_name.as_deref(), &req.layout)?;
    let cleaned = &prepared.cleaned.table;

    let template_columns = resolve_template(req.template.as_deref(), None)?;
    let mut frames = generate_claim_frames(cleaned, &template_columns, &req.layout)?;
    if frames.is_empty() {
        return Err(ClaimError::EmptyResult(format!(
            "no cardholder rows found; ensure '{}' is populated",
            req.layout.group_column
        )));
    }

    let mapping = req
        .corporate
        .as_deref()
        .map(|p| load_corporate_mapping(p, None))
        .transpose()?;
    apply_corporate_cards(&mut frames, mapping.as_ref());

    let reconciliation = reconcile(cleaned, &frames, &req.layout.group_column)?;
    if !reconciliation.is_balanced() {
        error!(?reconciliation, "claim rows do not match the cleaned statement");
    }

    let files = save_claim_frames(&frames, &req.output_dir, req.format)?;
    let bundle = req
        .bundle
        .as_deref()
        .map(|p| bundle_claim_frames(&frames, p, req.format))
        .transpose()?;

    info!("processing complete, generated {} files", files.len());
    Ok(RunSummary {
        header_row: prepared.header_row,
        clean: prepared.cleaned.report,
        files,
        bundle,
        claims: summarize(&frames),
        reconciliation,
    })
}
