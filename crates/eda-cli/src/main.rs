//! CLI entry point for the EDA report tool.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use eda_cli::commands::non_negative;
use eda_cli::config::{
    DEFAULT_MAX_CAT_COLUMNS, DEFAULT_MAX_HIST_COLUMNS, DEFAULT_MIN_MISSING_SHARE,
    DEFAULT_OUT_DIR, DEFAULT_TITLE, DEFAULT_TOP_K_CATEGORIES,
};
use eda_cli::{EdaError, LoadOptions, OverviewCommand, ReportCommand, ReportConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

/// Exploratory data analysis for CSV files
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory data analysis for CSV files",
    long_about = "Summarize a CSV file on screen, or write a full report with CSV tables,\n\
                  charts and a markdown document.\n\n\
                  EXAMPLES:\n  \
                  # Quick look at a dataset\n  \
                  eda-cli overview data.csv\n\n  \
                  # Semicolon separated file in a legacy encoding\n  \
                  eda-cli overview data.csv --sep ';' --encoding windows-1251\n\n  \
                  # Full report\n  \
                  eda-cli report data.csv --out-dir reports --title \"Titanic\""
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dataset shape and a per-column summary
    Overview {
        /// Path to the CSV file
        path: PathBuf,

        #[command(flatten)]
        load: LoadArgs,

        /// Print the summary as JSON
        ///
        /// Disables all logs so stdout only carries the JSON document.
        #[arg(long)]
        json: bool,
    },

    /// Write a full report to an output directory
    Report {
        /// Path to the CSV file
        path: PathBuf,

        /// Output directory for the report
        #[arg(long, default_value = DEFAULT_OUT_DIR)]
        out_dir: PathBuf,

        #[command(flatten)]
        load: LoadArgs,

        /// Maximum number of numeric columns to plot histograms for
        #[arg(long, default_value_t = DEFAULT_MAX_HIST_COLUMNS as i64, allow_negative_numbers = true)]
        max_hist_columns: i64,

        /// Maximum number of categorical columns to rank values for
        #[arg(long, default_value_t = DEFAULT_MAX_CAT_COLUMNS as i64, allow_negative_numbers = true)]
        max_cat_columns: i64,

        /// How many of the most frequent values to keep per categorical column
        #[arg(long, default_value_t = DEFAULT_TOP_K_CATEGORIES as i64, allow_negative_numbers = true)]
        top_k_categories: i64,

        /// Report title
        #[arg(long, default_value = DEFAULT_TITLE)]
        title: String,

        /// Missing share (0.0 - 1.0) at which a column is listed as problematic
        #[arg(long, default_value_t = DEFAULT_MIN_MISSING_SHARE, allow_negative_numbers = true)]
        min_missing_share: f64,
    },
}

#[derive(Args, Debug)]
struct LoadArgs {
    /// Field separator
    #[arg(long, default_value_t = ',')]
    sep: char,

    /// Text encoding of the file (utf-8, windows-1251, latin1, ...)
    #[arg(long, default_value = "utf-8")]
    encoding: String,
}

impl From<LoadArgs> for LoadOptions {
    fn from(args: LoadArgs) -> Self {
        LoadOptions::new(args.sep, args.encoding)
    }
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "error" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

impl Cli {
    /// `overview --json` keeps stdout for the JSON document alone.
    fn json_output(&self) -> bool {
        matches!(self.command, Command::Overview { json: true, .. })
    }
}

/// Exit code for a failed run: 2 when the input or options were at fault,
/// 1 otherwise.
fn exit_code(err: &anyhow::Error) -> u8 {
    let user_error = err
        .downcast_ref::<EdaError>()
        .is_some_and(EdaError::is_user_error);
    if user_error { 2 } else { 1 }
}

/// The single line printed to stderr for a failed run.
fn error_line(err: &anyhow::Error) -> String {
    format!("error: {}", err)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.quiet, cli.json_output());

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(eda) = err.downcast_ref::<EdaError>() {
                debug!("Failed with {}", eda.error_code());
            }
            eprintln!("{}", error_line(&err));
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Overview { path, load, json } => {
            OverviewCommand {
                path,
                load: load.into(),
                json,
            }
            .run()?;
        }
        Command::Report {
            path,
            out_dir,
            load,
            max_hist_columns,
            max_cat_columns,
            top_k_categories,
            title,
            min_missing_share,
        } => {
            // validated by ReportCommand before any file is touched
            let config = ReportConfig {
                out_dir,
                title,
                max_hist_columns: non_negative("--max-hist-columns", max_hist_columns)?,
                max_cat_columns: non_negative("--max-cat-columns", max_cat_columns)?,
                top_k_categories: non_negative("--top-k-categories", top_k_categories)?,
                min_missing_share,
            };

            ReportCommand {
                path,
                load: load.into(),
                config,
            }
            .run()?;
        }
    }
    Ok(())
}
