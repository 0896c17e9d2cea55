//! amexclaim-finance: statement cleaning, per-cardholder claim frames, corporate
//! card enrichment, export, and the pipeline tying them together.

pub mod claim_frames;
pub mod cleaner;
pub mod corporate;
pub mod export;
pub mod pipeline;
pub mod summary;
pub mod template;

pub use claim_frames::{generate_claim_frames, ClaimFrame, ClaimFrames, ClaimLayout};
pub use cleaner::{clean_statement, CleanReport, CleanedStatement};
pub use corporate::{apply_corporate_cards, load_corporate_mapping, CorporateMapping};
pub use export::{bundle_claim_frames, save_claim_frames, ExportFormat};
pub use pipeline::{prepare_statement, run, PipelineRequest, PreparedStatement, RunSummary};
pub use summary::{reconcile, summarize, ClaimSummary, Reconciliation};
pub use template::{default_template_columns, resolve_template};
