//! Report generation module.
//!
//! [`ReportGenerator`] writes every artifact of a report into the configured
//! output directory:
//!
//! - `summary.csv`, `missing.csv`, `correlation.csv`
//! - `top_categories/<column>.csv` for each analyzed categorical column
//! - `hist_<column>.png`, `missing_matrix.png`, `correlation_heatmap.png`
//! - `report.md`, linking the files above
//!
//! Charts are best-effort: a chart that cannot be drawn is recorded in
//! [`ReportManifest::skipped`] and the rest of the report is still written.
//!
//! # Example
//!
//! ```rust,ignore
//! let generator = ReportGenerator::new(config);
//! let manifest = generator.generate(ReportParams {
//!     source: &path,
//!     df: &df,
//!     summary: &summary,
//!     missing: &missing,
//!     correlation: &correlation,
//!     top_categories: &top,
//!     quality: &quality,
//! })?;
//! println!("{}", manifest.report_path.display());
//! ```

mod charts;
mod markdown;
mod tables;

pub use tables::{category_frame, correlation_frame, missing_frame, summary_frame, write_csv};

use crate::config::ReportConfig;
use crate::error::{EdaError, Result, ResultExt};
use crate::types::{
    CorrelationMatrix, DatasetSummary, MissingTable, QualityFlags, TopCategories,
};
use crate::utils::sanitize_file_name;
use chrono::Local;
use markdown::{RenderedArtifacts, render_markdown};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CATEGORIES_DIR: &str = "top_categories";
const MISSING_MATRIX_FILE: &str = "missing_matrix.png";
const CORRELATION_HEATMAP_FILE: &str = "correlation_heatmap.png";
const REPORT_FILE: &str = "report.md";
const INSUFFICIENT_DATA: &str = "insufficient data";

/// Inputs of a report: the loaded table and everything computed from it.
pub struct ReportParams<'a> {
    pub source: &'a Path,
    pub df: &'a DataFrame,
    pub summary: &'a DatasetSummary,
    pub missing: &'a MissingTable,
    pub correlation: &'a CorrelationMatrix,
    pub top_categories: &'a TopCategories,
    pub quality: &'a QualityFlags,
}

/// An artifact that was not produced, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedArtifact {
    pub name: String,
    pub reason: String,
}

/// What a report run wrote to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportManifest {
    pub out_dir: PathBuf,
    pub report_path: PathBuf,
    /// Every file written, in the order it was written.
    pub files: Vec<PathBuf>,
    pub skipped: Vec<SkippedArtifact>,
}

pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Write all report artifacts and return the manifest.
    pub fn generate(&self, params: ReportParams<'_>) -> Result<ReportManifest> {
        let out_dir = self.config.out_dir.clone();
        fs::create_dir_all(&out_dir)
            .map_err(EdaError::from)
            .context(format!("Failed to create output directory '{}'", out_dir.display()))?;
        info!("Writing report to {}", out_dir.display());

        let mut files = Vec::new();
        let mut artifacts = RenderedArtifacts::default();

        let summary_path = out_dir.join("summary.csv");
        write_csv(&mut summary_frame(params.summary)?, &summary_path)?;
        files.push(summary_path);

        if !params.missing.is_empty() {
            let path = out_dir.join("missing.csv");
            write_csv(&mut missing_frame(params.missing)?, &path)?;
            files.push(path);
        }

        if !params.correlation.is_empty() {
            let path = out_dir.join("correlation.csv");
            write_csv(&mut correlation_frame(params.correlation)?, &path)?;
            files.push(path);
        }

        if !params.top_categories.is_empty() {
            let dir = out_dir.join(CATEGORIES_DIR);
            fs::create_dir_all(&dir)?;

            let mut used = HashSet::new();
            for table in &params.top_categories.tables {
                let stem = unique_stem(sanitize_file_name(&table.column), &mut used);
                let file_name = format!("{}.csv", stem);
                let path = dir.join(&file_name);
                write_csv(&mut category_frame(table)?, &path)?;
                files.push(path);
                artifacts
                    .category_files
                    .push((table.column.clone(), format!("{}/{}", CATEGORIES_DIR, file_name)));
            }
        }

        self.render_charts(&params, &out_dir, &mut files, &mut artifacts)?;

        let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let report_path = out_dir.join(REPORT_FILE);
        fs::write(
            &report_path,
            render_markdown(&params, &self.config, &artifacts, &generated_at),
        )?;
        files.push(report_path.clone());

        info!(
            "Report saved: {} ({} files, {} skipped)",
            report_path.display(),
            files.len(),
            artifacts.skipped.len()
        );

        Ok(ReportManifest {
            out_dir,
            report_path,
            files,
            skipped: artifacts.skipped,
        })
    }

    fn render_charts(
        &self,
        params: &ReportParams<'_>,
        out_dir: &Path,
        files: &mut Vec<PathBuf>,
        artifacts: &mut RenderedArtifacts,
    ) -> Result<()> {
        let mut used = HashSet::new();
        let plotted = params
            .summary
            .numeric_columns()
            .filter(|col| col.non_null > 0)
            .take(self.config.max_hist_columns);

        for col in plotted {
            let series = params.df.column(&col.name)?.as_materialized_series();
            let file_name = format!(
                "hist_{}.png",
                unique_stem(sanitize_file_name(&col.name), &mut used)
            );
            let drawn = draw_chart(out_dir, &file_name, files, &mut artifacts.skipped, |path| {
                charts::render_histogram(path, &col.name, series)
            });
            if drawn {
                artifacts.histograms.push((col.name.clone(), file_name));
            }
        }

        if draw_chart(out_dir, MISSING_MATRIX_FILE, files, &mut artifacts.skipped, |path| {
            charts::render_missing_matrix(path, params.df)
        }) {
            artifacts.missing_matrix = Some(MISSING_MATRIX_FILE.to_string());
        }

        if draw_chart(
            out_dir,
            CORRELATION_HEATMAP_FILE,
            files,
            &mut artifacts.skipped,
            |path| charts::render_correlation_heatmap(path, params.correlation),
        ) {
            artifacts.correlation_heatmap = Some(CORRELATION_HEATMAP_FILE.to_string());
        }

        Ok(())
    }
}

/// Draw one chart into `out_dir/file_name`, recording the outcome.
///
/// Returns whether the file was written.
fn draw_chart(
    out_dir: &Path,
    file_name: &str,
    files: &mut Vec<PathBuf>,
    skipped: &mut Vec<SkippedArtifact>,
    draw: impl FnOnce(&Path) -> anyhow::Result<bool>,
) -> bool {
    let path = out_dir.join(file_name);
    match draw(&path) {
        Ok(true) => {
            debug!("Chart saved: {}", path.display());
            files.push(path);
            true
        }
        Ok(false) => {
            debug!("Chart skipped, {}: {}", INSUFFICIENT_DATA, file_name);
            skipped.push(SkippedArtifact {
                name: file_name.to_string(),
                reason: INSUFFICIENT_DATA.to_string(),
            });
            false
        }
        Err(e) => {
            let err = EdaError::Chart {
                chart: file_name.to_string(),
                reason: e.to_string(),
            };
            warn!("[{}] {}", err.error_code(), err);
            // a failed draw may leave a truncated image behind
            if path.exists() {
                let _ = fs::remove_file(&path);
            }
            skipped.push(SkippedArtifact {
                name: file_name.to_string(),
                reason: e.to_string(),
            });
            false
        }
    }
}

/// Make `stem` unique among the stems already handed out by appending
/// `_2`, `_3`, ...
fn unique_stem(stem: String, used: &mut HashSet<String>) -> String {
    if used.insert(stem.clone()) {
        return stem;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", stem, n);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiler::DataProfiler;
    use crate::quality::DataQualityAnalyzer;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unique_stem() {
        let mut used = HashSet::new();
        assert_eq!(unique_stem("a_b".to_string(), &mut used), "a_b");
        assert_eq!(unique_stem("a_b".to_string(), &mut used), "a_b_2");
        assert_eq!(unique_stem("a_b".to_string(), &mut used), "a_b_3");
    }

    #[test]
    fn test_generate_writes_tables_and_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        let df = df!(
            "a b" => &[Some(1i64), Some(2), None],
            "a/b" => &[Some("x"), Some("x"), Some("y")],
        )
        .unwrap();

        let summary = DataProfiler::summarize_dataset(&df).unwrap();
        let missing = DataProfiler::missing_table(&df).unwrap();
        let correlation = DataProfiler::correlation_matrix(&df, &summary).unwrap();
        let top = DataProfiler::top_categories(&df, &summary, 5, 5).unwrap();
        let quality = DataQualityAnalyzer::compute_flags(&summary, &missing);

        let config = ReportConfig::builder().out_dir(&out_dir).build().unwrap();
        let manifest = ReportGenerator::new(config)
            .generate(ReportParams {
                source: Path::new("sample.csv"),
                df: &df,
                summary: &summary,
                missing: &missing,
                correlation: &correlation,
                top_categories: &top,
                quality: &quality,
            })
            .unwrap();

        assert_eq!(manifest.out_dir, out_dir);
        assert_eq!(manifest.report_path, out_dir.join("report.md"));
        assert!(out_dir.join("summary.csv").exists());
        assert!(out_dir.join("missing.csv").exists());
        assert!(!out_dir.join("correlation.csv").exists());
        assert!(out_dir.join("top_categories").join("a_b.csv").exists());
        for file in &manifest.files {
            assert!(file.exists(), "{} listed but missing", file.display());
        }

        // one numeric column: the heatmap has nothing to show
        assert!(
            manifest
                .skipped
                .iter()
                .any(|s| s.name == CORRELATION_HEATMAP_FILE && s.reason == INSUFFICIENT_DATA)
        );

        let md = fs::read_to_string(&manifest.report_path).unwrap();
        assert!(md.contains("Insufficient numeric columns for correlation."));
        assert!(md.contains("`top_categories/a_b.csv`"));
    }

    #[test]
    fn test_generate_draws_every_chart() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        let df = df!(
            "height" => &[Some(1.62f64), Some(1.75), None, Some(1.80), Some(1.68)],
            "weight" => &[Some(55i64), Some(72), Some(80), None, Some(61)],
            "team" => &[Some("red"), Some("blue"), Some("red"), Some("red"), None],
        )
        .unwrap();

        let summary = DataProfiler::summarize_dataset(&df).unwrap();
        let missing = DataProfiler::missing_table(&df).unwrap();
        let correlation = DataProfiler::correlation_matrix(&df, &summary).unwrap();
        let top = DataProfiler::top_categories(&df, &summary, 5, 5).unwrap();
        let quality = DataQualityAnalyzer::compute_flags(&summary, &missing);

        let config = ReportConfig::builder().out_dir(&out_dir).build().unwrap();
        let manifest = ReportGenerator::new(config)
            .generate(ReportParams {
                source: Path::new("people.csv"),
                df: &df,
                summary: &summary,
                missing: &missing,
                correlation: &correlation,
                top_categories: &top,
                quality: &quality,
            })
            .unwrap();

        assert!(manifest.skipped.is_empty(), "{:?}", manifest.skipped);
        for name in [
            "hist_height.png",
            "hist_weight.png",
            MISSING_MATRIX_FILE,
            CORRELATION_HEATMAP_FILE,
        ] {
            let path = out_dir.join(name);
            assert!(path.exists(), "{} not written", name);
            assert!(fs::metadata(&path).unwrap().len() > 0);
            assert!(manifest.files.contains(&path));
        }

        let md = fs::read_to_string(&manifest.report_path).unwrap();
        assert!(md.contains("![height](hist_height.png)"));
        assert!(md.contains("![weight](hist_weight.png)"));
        assert!(md.contains("See `correlation.csv` and `correlation_heatmap.png`."));
    }
}
