//! The `report.md` narrative.

use super::{ReportParams, SkippedArtifact};
use crate::config::ReportConfig;
use crate::utils::format_share;

/// Files produced before the markdown is written, so the narrative only
/// links what actually exists.
#[derive(Debug, Default)]
pub(crate) struct RenderedArtifacts {
    /// `(column, file name)` for each histogram drawn.
    pub histograms: Vec<(String, String)>,
    pub missing_matrix: Option<String>,
    pub correlation_heatmap: Option<String>,
    /// `(column, path relative to the output directory)`.
    pub category_files: Vec<(String, String)>,
    pub skipped: Vec<SkippedArtifact>,
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

pub(crate) fn render_markdown(
    params: &ReportParams<'_>,
    config: &ReportConfig,
    artifacts: &RenderedArtifacts,
    generated_at: &str,
) -> String {
    let summary = params.summary;
    let quality = params.quality;
    let source_name = params
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| params.source.display().to_string());

    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", config.title));
    md.push_str(&format!("Source file: `{}`\n\n", source_name));
    md.push_str(&format!("Generated: {}\n\n", generated_at));
    md.push_str(&format!(
        "Rows: **{}**, columns: **{}**\n\n",
        summary.n_rows, summary.n_cols
    ));

    md.push_str("## Report settings\n\n");
    md.push_str(&format!("- max_hist_columns: **{}**\n", config.max_hist_columns));
    md.push_str(&format!("- max_cat_columns: **{}**\n", config.max_cat_columns));
    md.push_str(&format!("- top_k_categories: **{}**\n", config.top_k_categories));
    md.push_str(&format!(
        "- min_missing_share: **{}**\n\n",
        format_share(config.min_missing_share)
    ));

    md.push_str("## Data quality (heuristics)\n\n");
    md.push_str(&format!("- Quality score: **{:.2}**\n", quality.quality_score));
    md.push_str(&format!(
        "- Max missing share per column: **{}**\n",
        format_share(quality.max_missing_share)
    ));
    md.push_str(&format!("- Too few rows: **{}**\n", yes_no(quality.too_few_rows)));
    md.push_str(&format!(
        "- Too many columns: **{}**\n",
        yes_no(quality.too_many_columns)
    ));
    md.push_str(&format!(
        "- Too many missing values: **{}**\n",
        yes_no(quality.too_many_missing)
    ));
    md.push_str(&format!(
        "- Constant columns: **{}**",
        yes_no(quality.has_constant_columns)
    ));
    if !quality.constant_columns.is_empty() {
        md.push_str(&format!(" ({})", quality.constant_columns.join(", ")));
    }
    md.push('\n');
    md.push_str(&format!(
        "- High-cardinality categorical columns: **{}**",
        yes_no(quality.has_high_cardinality_categoricals)
    ));
    if !quality.high_cardinality_columns.is_empty() {
        md.push_str(&format!(" ({})", quality.high_cardinality_columns.join(", ")));
    }
    md.push_str("\n\n");

    md.push_str("## Columns\n\n");
    if summary.columns.is_empty() {
        md.push_str("The table has no columns.\n\n");
    } else {
        md.push_str("See `summary.csv` for the full statistics.\n\n");
        md.push_str("| column | kind | missing | unique |\n");
        md.push_str("|---|---|---|---|\n");
        for col in &summary.columns {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                escape_cell(&col.name),
                col.kind,
                format_share(col.missing_share),
                col.unique
            ));
        }
        md.push('\n');
    }

    md.push_str("## Missing values\n\n");
    if params.missing.is_empty() {
        md.push_str("The table has no columns.\n\n");
    } else {
        md.push_str("See `missing.csv`");
        if let Some(file) = &artifacts.missing_matrix {
            md.push_str(&format!(" and `{}`", file));
        }
        md.push_str(".\n\n");

        md.push_str(&format!(
            "### Problematic columns (missing_share >= {})\n\n",
            format_share(config.min_missing_share)
        ));
        let problematic = params.missing.problematic(config.min_missing_share);
        if problematic.is_empty() {
            md.push_str("No columns reach the threshold.\n\n");
        } else {
            for entry in problematic {
                md.push_str(&format!(
                    "- **{}**: missing_count={}, missing_share={}\n",
                    entry.column,
                    entry.missing_count,
                    format_share(entry.missing_share)
                ));
            }
            md.push('\n');
        }
    }

    md.push_str("## Correlation of numeric features\n\n");
    if params.correlation.is_empty() {
        md.push_str("Insufficient numeric columns for correlation.\n\n");
    } else {
        md.push_str("See `correlation.csv`");
        if let Some(file) = &artifacts.correlation_heatmap {
            md.push_str(&format!(" and `{}`", file));
        }
        md.push_str(".\n\n");
    }

    md.push_str("## Categorical features\n\n");
    if artifacts.category_files.is_empty() {
        md.push_str("No categorical columns found.\n\n");
    } else {
        md.push_str(&format!(
            "Top-{} values for up to {} columns:\n\n",
            config.top_k_categories, config.max_cat_columns
        ));
        for (column, file) in &artifacts.category_files {
            md.push_str(&format!("- **{}**: `{}`\n", column, file));
        }
        md.push('\n');
    }

    md.push_str("## Histograms of numeric columns\n\n");
    if artifacts.histograms.is_empty() {
        let message = if summary.numeric_columns().next().is_none() {
            "No numeric columns to plot."
        } else {
            "No numeric column has values to plot."
        };
        md.push_str(message);
        md.push_str("\n\n");
    } else {
        md.push_str(&format!(
            "At most {} columns are plotted.\n\n",
            config.max_hist_columns
        ));
        for (column, file) in &artifacts.histograms {
            md.push_str(&format!("### {}\n\n![{}]({})\n\n", column, column, file));
        }
    }

    if !artifacts.skipped.is_empty() {
        md.push_str("## Skipped charts\n\n");
        for skipped in &artifacts.skipped {
            md.push_str(&format!("- `{}`: {}\n", skipped.name, skipped.reason));
        }
        md.push('\n');
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ColumnKind, ColumnSummary, CorrelationMatrix, DatasetSummary, MissingEntry, MissingTable,
        QualityFlags, TopCategories,
    };
    use polars::prelude::*;
    use std::path::Path;

    fn quality() -> QualityFlags {
        QualityFlags {
            n_rows: 3,
            n_cols: 1,
            quality_score: 0.47,
            max_missing_share: 1.0 / 3.0,
            too_few_rows: true,
            too_many_columns: false,
            too_many_missing: false,
            has_constant_columns: false,
            constant_columns: Vec::new(),
            has_high_cardinality_categoricals: false,
            high_cardinality_columns: Vec::new(),
        }
    }

    fn summary() -> DatasetSummary {
        DatasetSummary {
            n_rows: 3,
            n_cols: 1,
            columns: vec![ColumnSummary {
                name: "a".to_string(),
                dtype: "Int64".to_string(),
                kind: ColumnKind::Numeric,
                non_null: 2,
                missing: 1,
                missing_share: 1.0 / 3.0,
                unique: 2,
                example: Some("1".to_string()),
                numeric: None,
            }],
        }
    }

    #[test]
    fn test_sections_and_problematic_columns() {
        let df = DataFrame::empty();
        let summary = summary();
        let missing = MissingTable {
            entries: vec![MissingEntry {
                column: "a".to_string(),
                missing_count: 1,
                missing_share: 1.0 / 3.0,
            }],
        };
        let quality = quality();
        let params = ReportParams {
            source: Path::new("data/sample.csv"),
            df: &df,
            summary: &summary,
            missing: &missing,
            correlation: &CorrelationMatrix::default(),
            top_categories: &TopCategories::default(),
            quality: &quality,
        };
        let config = ReportConfig::default();

        let md = render_markdown(&params, &config, &RenderedArtifacts::default(), "2024-01-01 00:00:00");

        assert!(md.starts_with("# EDA report\n"));
        assert!(md.contains("Source file: `sample.csv`"));
        assert!(md.contains("Rows: **3**, columns: **1**"));
        assert!(md.contains("- min_missing_share: **30.00%**"));
        assert!(md.contains("- Quality score: **0.47**"));
        assert!(md.contains("- **a**: missing_count=1, missing_share=33.33%"));
        assert!(md.contains("Insufficient numeric columns for correlation."));
        assert!(md.contains("No categorical columns found."));
        // "a" is numeric but nothing was drawn for it
        assert!(md.contains("No numeric column has values to plot."));
        assert!(!md.contains("## Skipped charts"));
    }

    #[test]
    fn test_links_rendered_artifacts() {
        let df = DataFrame::empty();
        let summary = summary();
        let quality = quality();
        let params = ReportParams {
            source: Path::new("x.csv"),
            df: &df,
            summary: &summary,
            missing: &MissingTable::default(),
            correlation: &CorrelationMatrix::default(),
            top_categories: &TopCategories::default(),
            quality: &quality,
        };
        let artifacts = RenderedArtifacts {
            histograms: vec![("a".to_string(), "hist_a.png".to_string())],
            category_files: vec![("b".to_string(), "top_categories/b.csv".to_string())],
            skipped: vec![SkippedArtifact {
                name: "correlation_heatmap.png".to_string(),
                reason: "insufficient data".to_string(),
            }],
            ..Default::default()
        };

        let md = render_markdown(&params, &ReportConfig::default(), &artifacts, "now");

        assert!(md.contains("![a](hist_a.png)"));
        assert!(md.contains("- **b**: `top_categories/b.csv`"));
        assert!(md.contains("- `correlation_heatmap.png`: insufficient data"));
        assert!(md.contains("The table has no columns."));
        assert!(!md.contains("### Problematic columns"));
    }

    fn complete_params<'a>(
        df: &'a DataFrame,
        summary: &'a DatasetSummary,
        missing: &'a MissingTable,
        quality: &'a QualityFlags,
    ) -> ReportParams<'a> {
        ReportParams {
            source: Path::new("full.csv"),
            df,
            summary,
            missing,
            correlation: &EMPTY_CORRELATION,
            top_categories: &EMPTY_CATEGORIES,
            quality,
        }
    }

    static EMPTY_CORRELATION: CorrelationMatrix = CorrelationMatrix {
        columns: Vec::new(),
        values: Vec::new(),
    };
    static EMPTY_CATEGORIES: TopCategories = TopCategories { tables: Vec::new() };

    #[test]
    fn test_zero_threshold_lists_columns_without_missing_values() {
        let df = DataFrame::empty();
        let summary = summary();
        let quality = quality();
        let missing = MissingTable {
            entries: vec![
                MissingEntry {
                    column: "a".to_string(),
                    missing_count: 0,
                    missing_share: 0.0,
                },
                MissingEntry {
                    column: "b".to_string(),
                    missing_count: 0,
                    missing_share: 0.0,
                },
            ],
        };
        let config = ReportConfig {
            min_missing_share: 0.0,
            ..ReportConfig::default()
        };

        let md = render_markdown(
            &complete_params(&df, &summary, &missing, &quality),
            &config,
            &RenderedArtifacts::default(),
            "now",
        );

        assert!(md.contains("See `missing.csv`."));
        assert!(md.contains("### Problematic columns (missing_share >= 0.00%)"));
        assert!(md.contains("- **a**: missing_count=0, missing_share=0.00%"));
        assert!(md.contains("- **b**: missing_count=0, missing_share=0.00%"));
    }

    #[test]
    fn test_complete_table_reports_no_problematic_columns() {
        let df = DataFrame::empty();
        let summary = summary();
        let quality = quality();
        let missing = MissingTable {
            entries: vec![MissingEntry {
                column: "a".to_string(),
                missing_count: 0,
                missing_share: 0.0,
            }],
        };

        let md = render_markdown(
            &complete_params(&df, &summary, &missing, &quality),
            &ReportConfig::default(),
            &RenderedArtifacts::default(),
            "now",
        );

        assert!(md.contains("### Problematic columns (missing_share >= 30.00%)"));
        assert!(md.contains("No columns reach the threshold."));
    }

    #[test]
    fn test_histogram_placeholder_matches_cause() {
        let df = DataFrame::empty();
        let quality = quality();
        let missing = MissingTable::default();
        let render = |summary: &DatasetSummary| {
            render_markdown(
                &complete_params(&df, summary, &missing, &quality),
                &ReportConfig::default(),
                &RenderedArtifacts::default(),
                "now",
            )
        };

        // header-only table: the column is numeric but has no values
        let mut header_only = summary();
        header_only.n_rows = 0;
        header_only.columns[0].non_null = 0;
        let md = render(&header_only);
        assert!(md.contains("No numeric column has values to plot."));
        assert!(!md.contains("No numeric columns to plot."));

        let mut text_only = summary();
        text_only.columns[0].kind = ColumnKind::Categorical;
        assert!(render(&text_only).contains("No numeric columns to plot."));
    }
}
