use amexclaim_finance::pipeline::prepare_statement;
use amexclaim_finance::{run, ExportFormat, PipelineRequest, RunSummary};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod config;

#[derive(Parser, Debug)]
#[command(
    name = "amexclaim",
    version,
    about = "Split a corporate AMEX statement into per-cardholder expense claim files"
)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one claim file per cardholder
    Process {
        /// AMEX statement (.csv, .xlsx, .xls, .json, .txt)
        #[arg(long)]
        statement: PathBuf,

        /// Directory for the claim files (created if missing)
        #[arg(long)]
        output: PathBuf,

        /// Optional corporate card mapping file (CSV or Excel)
        #[arg(long)]
        corporate: Option<PathBuf>,

        /// Optional template whose header row defines the output columns
        #[arg(long)]
        template: Option<PathBuf>,

        /// excel or csv (default: from config, else excel)
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Also bundle every claim file into this ZIP archive
        #[arg(long)]
        zip: Option<PathBuf>,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the detected header and cleaning result without writing anything
    Inspect {
        #[arg(long)]
        statement: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write the default config.toml into $AMEXCLAIM_HOME (default ~/.amexclaim)
    InitConfig,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Process {
            statement,
            output,
            corporate,
            template,
            format,
            zip,
            json,
            config,
        } => {
            if !statement.exists() {
                bail!("Statement not found: {}", statement.display());
            }
            let cfg = config::load_config(config.as_deref())?;

            let mut req = PipelineRequest::new(&statement, output);
            req.corporate = corporate;
            req.template = template;
            req.format = format.unwrap_or(cfg.export.format);
            req.bundle = zip;
            req.layout = cfg.layout();

            let summary = run(&req).with_context(|| format!("processing {}", statement.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }

        Command::Inspect { statement, config } => {
            let cfg = config::load_config(config.as_deref())?;
            let prepared = prepare_statement(&statement, None, &cfg.layout())
                .with_context(|| format!("inspecting {}", statement.display()))?;
            let report = prepared.cleaned.report;

            println!("Header row: {}", prepared.header_row);
            println!("Columns:");
            for c in prepared.cleaned.table.columns() {
                println!("  - {c}");
            }
            println!(
                "\nRows: {} | kept: {} | negative: {} | unparseable: {}",
                report.input_rows, report.kept, report.dropped_negative, report.dropped_unparseable
            );
        }

        Command::InitConfig => {
            config::init_config()?;
        }
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "Statement header at row {}; {} of {} rows kept",
        summary.header_row, summary.clean.kept, summary.clean.input_rows
    );
    if summary.clean.dropped_unparseable > 0 {
        println!(
            "Warning: {} rows had an empty or non-numeric amount and were skipped",
            summary.clean.dropped_unparseable
        );
    }
    println!();

    for c in &summary.claims {
        println!(
            "{:<24} rows={:<4} total=${:>10.2} | {}",
            c.cardholder, c.rows, c.total_amount, c.corporate_card
        );
    }

    if !summary.reconciliation.is_balanced() {
        println!("\nRow count mismatch:");
        for m in &summary.reconciliation.mismatches {
            println!(
                "  {}: statement={} claim={}",
                m.cardholder, m.statement_rows, m.claim_rows
            );
        }
    }

    println!("\nGenerated {} files:", summary.files.len());
    for f in &summary.files {
        println!("  {}", f.display());
    }
    if let Some(bundle) = &summary.bundle {
        println!("Bundle: {}", bundle.display());
    }
    info!(files = summary.files.len(), "done");
}
