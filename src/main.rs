//! CLI entry point for the questionnaire rater tool.
//!
//! Provides one subcommand per pipeline operation: cleaning, email
//! filtering, age histogram, imputation, scoring, and the gender/age
//! correlation table.

use anyhow::Result;
use clap::{Parser, Subcommand};
use questionnaire_rater::analysis::clean::{clean, remove_rows_without_mail};
use questionnaire_rater::analysis::correlate::correlate_gender_age;
use questionnaire_rater::analysis::histogram::age_distribution;
use questionnaire_rater::analysis::impute::fill_missing_with_mean;
use questionnaire_rater::analysis::score::{DEFAULT_MAX_NANS_PER_SUB, score_subjects};
use questionnaire_rater::dataset::Dataset;
use questionnaire_rater::loader::load_dataset;
use questionnaire_rater::output::{print_json, write_csv};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "questionnaire_rater")]
#[command(about = "A tool to analyze questionnaire response data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove rows with an invalid age, timestamp, email, or gender
    Clean {
        /// JSON file with the raw responses
        #[arg(value_name = "INPUT")]
        input: String,

        /// CSV file to write the cleaned rows to (JSON to stdout otherwise)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Remove rows without a strictly valid email address
    FilterEmail {
        #[arg(value_name = "INPUT")]
        input: String,

        #[arg(short, long)]
        output: Option<String>,
    },
    /// Compute the age distribution over ten-year bins
    Histogram {
        #[arg(value_name = "INPUT")]
        input: String,
    },
    /// Fill missing answers with each subject's own mean
    Impute {
        #[arg(value_name = "INPUT")]
        input: String,

        #[arg(short, long)]
        output: Option<String>,
    },
    /// Score subjects and add a nullable score column
    Score {
        #[arg(value_name = "INPUT")]
        input: String,

        /// Missing answers tolerated before a subject gets no score
        #[arg(long, default_value_t = DEFAULT_MAX_NANS_PER_SUB)]
        max_nans: usize,

        #[arg(short, long)]
        output: Option<String>,
    },
    /// Mean question scores grouped by gender and the age-40 threshold
    Correlate {
        #[arg(value_name = "INPUT")]
        input: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/questionnaire_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("questionnaire_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Clean { input, output } => {
            let dataset = load_dataset(&input)?;
            let cleaned = clean(&dataset);
            info!(
                before = dataset.len(),
                after = cleaned.len(),
                "Dataset cleaned"
            );
            emit(&cleaned, output.as_deref())?;
        }
        Commands::FilterEmail { input, output } => {
            let dataset = load_dataset(&input)?;
            let filtered = remove_rows_without_mail(&dataset);
            info!(
                before = dataset.len(),
                after = filtered.len(),
                "Rows without valid mail removed"
            );
            emit(&filtered, output.as_deref())?;
        }
        Commands::Histogram { input } => {
            let dataset = load_dataset(&input)?;
            let histogram = age_distribution(&dataset);
            print_json(&histogram)?;
        }
        Commands::Impute { input, output } => {
            let dataset = load_dataset(&input)?;
            let (imputed, filled_rows) = fill_missing_with_mean(&dataset);
            info!(?filled_rows, "Missing answers imputed");
            emit(&imputed, output.as_deref())?;
        }
        Commands::Score {
            input,
            max_nans,
            output,
        } => {
            let dataset = load_dataset(&input)?;
            let scored = score_subjects(&dataset, max_nans);
            let unscored = scored.iter().filter(|r| r.score.is_none()).count();
            info!(rows = scored.len(), unscored, "Subjects scored");
            emit(&scored, output.as_deref())?;
        }
        Commands::Correlate { input } => {
            let dataset = load_dataset(&input)?;
            let table = correlate_gender_age(&dataset);
            print_json(&table)?;
        }
    }

    Ok(())
}

/// Writes a dataset to CSV when an output path is given, JSON to stdout
/// otherwise.
fn emit(dataset: &Dataset, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => write_csv(path, dataset),
        None => print_json(dataset),
    }
}
