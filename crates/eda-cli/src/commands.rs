//! Command handlers behind the `overview` and `report` subcommands.
//!
//! Each handler is a plain struct built from parsed arguments; `execute`
//! does the work and returns its result, `run` also prints it.

use crate::config::{LoadOptions, ReportConfig};
use crate::error::{EdaError, Result};
use crate::loader::load_csv;
use crate::profiler::DataProfiler;
use crate::quality::DataQualityAnalyzer;
use crate::reporting::{ReportGenerator, ReportManifest, ReportParams};
use crate::types::DatasetSummary;
use crate::utils::{format_opt_f64, format_share, truncate_str};
use std::path::PathBuf;
use tracing::info;

/// Convert a count option parsed as a signed integer, rejecting negatives
/// with an error naming the option.
pub fn non_negative(option: &str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        EdaError::invalid_parameter(option, format!("must be >= 0, got {}", value))
    })
}

/// Quick look at a dataset: shape and per-column summary on stdout.
#[derive(Debug, Clone)]
pub struct OverviewCommand {
    pub path: PathBuf,
    pub load: LoadOptions,
    /// Print the summary as JSON instead of a text table.
    pub json: bool,
}

impl OverviewCommand {
    pub fn execute(&self) -> Result<DatasetSummary> {
        let df = load_csv(&self.path, &self.load)?;
        DataProfiler::summarize_dataset(&df)
    }

    /// What `run` prints: a pretty JSON document or the text table.
    pub fn render(&self, summary: &DatasetSummary) -> Result<String> {
        if self.json {
            Ok(format!("{}\n", serde_json::to_string_pretty(summary)?))
        } else {
            Ok(render_overview(summary))
        }
    }

    /// Note: output goes through `print!` on purpose; it is the command's
    /// result, not a log line.
    pub fn run(&self) -> Result<()> {
        let summary = self.execute()?;
        print!("{}", self.render(&summary)?);
        Ok(())
    }
}

/// Text rendering of a dataset summary.
pub fn render_overview(summary: &DatasetSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Rows: {}\n", summary.n_rows));
    out.push_str(&format!("Columns: {}\n", summary.n_cols));

    if summary.columns.is_empty() {
        return out;
    }

    out.push('\n');
    out.push_str(&format!(
        "{:<24} {:<12} {:<12} {:>9} {:>9} {:>8} {:>8} {:>12} {:>12} {:>12}  {}\n",
        "Column", "Kind", "Dtype", "Non-null", "Missing", "Missing%", "Unique", "Min", "Max",
        "Mean", "Example"
    ));
    out.push_str(&format!("{}\n", "-".repeat(136)));

    for col in &summary.columns {
        let stats = col.numeric.as_ref();
        out.push_str(&format!(
            "{:<24} {:<12} {:<12} {:>9} {:>9} {:>8} {:>8} {:>12} {:>12} {:>12}  {}\n",
            truncate_str(&col.name, 24),
            col.kind.as_str(),
            truncate_str(&col.dtype, 12),
            col.non_null,
            col.missing,
            format_share(col.missing_share),
            col.unique,
            format_opt_f64(stats.map(|s| s.min)),
            format_opt_f64(stats.map(|s| s.max)),
            format_opt_f64(stats.map(|s| s.mean)),
            col.example
                .as_deref()
                .map(|e| truncate_str(e, 20))
                .unwrap_or_default(),
        ));
    }
    out
}

/// Full report: every artifact written under `config.out_dir`.
#[derive(Debug, Clone)]
pub struct ReportCommand {
    pub path: PathBuf,
    pub load: LoadOptions,
    pub config: ReportConfig,
}

impl ReportCommand {
    /// Validate, load, analyze and write the report.
    ///
    /// Options are validated and the file is loaded before the output
    /// directory is touched, so a rejected run leaves nothing behind.
    pub fn execute(&self) -> Result<ReportManifest> {
        self.config.validate()?;
        self.load.validate()?;

        let df = load_csv(&self.path, &self.load)?;

        info!("Profiling {} columns", df.width());
        let summary = DataProfiler::summarize_dataset(&df)?;
        let missing = DataProfiler::missing_table(&df)?;
        let correlation = DataProfiler::correlation_matrix(&df, &summary)?;
        let top_categories = DataProfiler::top_categories(
            &df,
            &summary,
            self.config.top_k_categories,
            self.config.max_cat_columns,
        )?;
        let quality = DataQualityAnalyzer::compute_flags(&summary, &missing);
        info!("Quality score: {:.2}", quality.quality_score);

        ReportGenerator::new(self.config.clone()).generate(ReportParams {
            source: &self.path,
            df: &df,
            summary: &summary,
            missing: &missing,
            correlation: &correlation,
            top_categories: &top_categories,
            quality: &quality,
        })
    }

    pub fn run(&self) -> Result<()> {
        let manifest = self.execute()?;
        print!("{}", render_manifest(&manifest));
        Ok(())
    }
}

/// Success summary printed after a report run.
pub fn render_manifest(manifest: &ReportManifest) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Report generated in: {}\n",
        manifest.out_dir.display()
    ));
    out.push_str(&format!("- Main markdown: {}\n", manifest.report_path.display()));
    out.push_str(&format!("Files written ({}):\n", manifest.files.len()));
    for file in &manifest.files {
        let shown = file.strip_prefix(&manifest.out_dir).unwrap_or(file);
        out.push_str(&format!("  {}\n", shown.display()));
    }
    if !manifest.skipped.is_empty() {
        out.push_str(&format!("Skipped ({}):\n", manifest.skipped.len()));
        for skipped in &manifest.skipped {
            out.push_str(&format!("  {}: {}\n", skipped.name, skipped.reason));
        }
    }
    out
}
