mod display;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use clap::{Args, Parser, Subcommand, ValueEnum};
use symptrack_analytics::{
    AnalysisConfig, DEFAULT_TOP_N, DEFAULT_WORD_LIMIT, Dashboard, EnrichedTable, FilterSelection,
    SeverityPolicy, enrich,
};
use symptrack_core::{RiskTier, Sentiment, parse_severity, polarity, risk_tier, symptom_category};
use symptrack_store::{read_csv, read_parquet, write_parquet};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "symptrack", version)]
#[command(about = "Sentiment, risk, and symptom analysis of health reports")]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Enrich an upload and print its dashboard
    Report {
        /// CSV upload (or a previously exported Parquet file)
        input: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Rows in the high-risk detail table
        #[arg(long, env = "SYMPTRACK_TOP_N", default_value_t = DEFAULT_TOP_N)]
        top: usize,
        /// Words in the common-word list
        #[arg(long, env = "SYMPTRACK_WORD_LIMIT", default_value_t = DEFAULT_WORD_LIMIT)]
        words: usize,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Enrich an upload and export the (filtered) table to Parquet
    Enrich {
        /// CSV upload (or a previously exported Parquet file)
        input: PathBuf,
        /// Parquet file to write
        #[arg(short, long)]
        out: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Classify a single free-text report
    Classify {
        /// Report text
        text: String,
        /// Severity score; adds the risk tier to the output
        #[arg(long)]
        severity: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Inclusion filters. A dimension given no values keeps every observed value.
#[derive(Args)]
struct FilterArgs {
    /// Include this risk tier (repeatable)
    #[arg(long = "risk", value_name = "TIER")]
    risks: Vec<RiskTier>,
    /// Include this exact symptom category, e.g. "Respiratory, Fever" (repeatable)
    #[arg(long = "category", value_name = "CATEGORY")]
    categories: Vec<String>,
    /// Include this sentiment label (repeatable)
    #[arg(long = "sentiment", value_name = "LABEL")]
    sentiments: Vec<Sentiment>,
}

impl FilterArgs {
    fn selection(&self, table: &EnrichedTable) -> FilterSelection {
        let mut selection = FilterSelection::observed(table.reports());
        if !self.risks.is_empty() {
            selection = selection.with_risks(self.risks.iter().copied());
        }
        if !self.categories.is_empty() {
            for category in &self.categories {
                if !selection.categories.contains(category) {
                    warn!(category = %category, "category does not occur in the upload");
                }
            }
            selection = selection.with_categories(self.categories.iter().cloned());
        }
        if !self.sentiments.is_empty() {
            selection = selection.with_sentiments(self.sentiments.iter().copied());
        }
        selection
    }
}

#[derive(Args)]
struct PolicyArgs {
    /// What to do with a row whose severity is missing or non-numeric
    #[arg(
        long,
        value_name = "POLICY",
        env = "SYMPTRACK_ON_BAD_SEVERITY",
        default_value_t = SeverityPolicy::Reject
    )]
    on_bad_severity: SeverityPolicy,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Report {
            input,
            filter,
            policy,
            top,
            words,
            format,
        } => {
            let config = AnalysisConfig::default()
                .with_top_n(top)
                .with_word_limit(words)
                .with_severity_policy(policy.on_bad_severity);
            cmd_report(&input, &filter, &config, format)
        }
        Command::Enrich {
            input,
            out,
            filter,
            policy,
        } => cmd_enrich(&input, &out, &filter, policy.on_bad_severity),
        Command::Classify { text, severity } => cmd_classify(&text, severity.as_deref()),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Commands ──

fn cmd_report(
    input: &Path,
    filter: &FilterArgs,
    config: &AnalysisConfig,
    format: Format,
) -> anyhow::Result<()> {
    let table = load_enriched(input, config.severity_policy)?;
    let selection = filter.selection(&table);
    let dashboard = Dashboard::build(&table, &selection, config);

    match format {
        Format::Text => display::print_dashboard(&dashboard, &table)?,
        Format::Json => {
            let json = serde_json::to_string_pretty(&dashboard)
                .context("failed to serialise dashboard")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn cmd_enrich(
    input: &Path,
    out: &Path,
    filter: &FilterArgs,
    policy: SeverityPolicy,
) -> anyhow::Result<()> {
    let table = load_enriched(input, policy)?;
    let selection = filter.selection(&table);
    let batch = table
        .filtered_batch(&selection)
        .context("failed to filter enriched table")?;

    write_parquet(out, &batch).with_context(|| format!("failed to write {}", out.display()))?;
    info!(
        rows = batch.num_rows(),
        of = table.len(),
        path = %out.display(),
        "exported enriched reports"
    );
    Ok(())
}

fn cmd_classify(text: &str, severity: Option<&str>) -> anyhow::Result<()> {
    let risk = match severity {
        Some(raw) => match parse_severity(raw) {
            Some(value) => Some((value, risk_tier(value))),
            None => bail!("invalid severity {raw:?}: expected a number"),
        },
        None => None,
    };

    let score = polarity(text);
    display::print_classification(
        text,
        score,
        Sentiment::from_polarity(score),
        &symptom_category(text),
        risk,
    );
    Ok(())
}

// ── Loading ──

/// Load an upload and enrich it, failing before any aggregation if the
/// upload is malformed.
fn load_enriched(input: &Path, policy: SeverityPolicy) -> anyhow::Result<EnrichedTable> {
    let batch = load_upload(input)?;
    let table = enrich(&batch, policy)
        .with_context(|| format!("failed to enrich {}", input.display()))?;

    if !table.skipped().is_empty() {
        let rows: Vec<usize> = table.skipped().iter().map(|s| s.row + 1).collect();
        warn!(
            count = rows.len(),
            rows = ?rows,
            "skipped rows with invalid severity"
        );
    }
    Ok(table)
}

/// Read a CSV upload, or a Parquet file written by `enrich`.
fn load_upload(input: &Path) -> anyhow::Result<RecordBatch> {
    if is_parquet(input) {
        let batches =
            read_parquet(input).with_context(|| format!("failed to read {}", input.display()))?;
        let Some(first) = batches.first() else {
            bail!("{} contains no record batches", input.display());
        };
        let schema = first.schema();
        return Ok(concat_batches(&schema, &batches)?);
    }
    read_csv(input).with_context(|| format!("failed to read {}", input.display()))
}

fn is_parquet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"))
}
