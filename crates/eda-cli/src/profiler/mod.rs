//! Dataset profiling.
//!
//! This module computes the descriptive statistics a report is built from:
//! - Per-column summary (kind, counts, numeric statistics)
//! - Missing values per column
//! - Pearson correlation between numeric columns
//! - Most frequent values of categorical columns

mod categories;
mod correlation;
mod missing;
mod statistics;
mod type_inference;

use crate::error::{Result, ResultExt};
use crate::types::{ColumnSummary, CorrelationMatrix, DatasetSummary, MissingTable, TopCategories};
use crate::utils::{numeric_values, share, string_values};
use polars::prelude::*;
use std::collections::HashSet;
use tracing::debug;

use type_inference::infer_column_kind;

/// Data profiler for analyzing dataset structure and characteristics.
pub struct DataProfiler;

impl DataProfiler {
    /// Summarize every column of the dataset, in column order.
    ///
    /// An empty table yields zero column summaries.
    pub fn summarize_dataset(df: &DataFrame) -> Result<DatasetSummary> {
        let n_rows = df.height();
        let columns = df
            .get_columns()
            .iter()
            .map(|col| {
                Self::summarize_column(col.as_materialized_series(), n_rows)
                    .context(format!("Failed to summarize column '{}'", col.name()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DatasetSummary {
            n_rows,
            n_cols: df.width(),
            columns,
        })
    }

    fn summarize_column(series: &Series, n_rows: usize) -> Result<ColumnSummary> {
        let kind = infer_column_kind(series)?;

        let (non_null, unique, example, numeric) = if kind.is_numeric() {
            let values: Vec<f64> = numeric_values(series)?.into_iter().flatten().collect();
            let distinct: HashSet<u64> = values
                .iter()
                // -0.0 and 0.0 are the same value
                .map(|v| if *v == 0.0 { 0u64 } else { v.to_bits() })
                .collect();
            (
                values.len(),
                distinct.len(),
                values.first().map(|v| v.to_string()),
                statistics::numeric_stats(&values),
            )
        } else {
            let values: Vec<String> = string_values(series)?.into_iter().flatten().collect();
            let distinct: HashSet<&str> = values.iter().map(String::as_str).collect();
            (values.len(), distinct.len(), values.first().cloned(), None)
        };

        let missing = n_rows - non_null;
        debug!(
            "Column '{}': kind={}, missing={}, unique={}",
            series.name(),
            kind,
            missing,
            unique
        );

        Ok(ColumnSummary {
            name: series.name().to_string(),
            dtype: format!("{:?}", series.dtype()),
            kind,
            non_null,
            missing,
            missing_share: share(missing, n_rows),
            unique,
            example,
            numeric,
        })
    }

    /// Count and share of missing entries per column.
    pub fn missing_table(df: &DataFrame) -> Result<MissingTable> {
        missing::missing_table(df)
    }

    /// Pearson correlation between the columns `summary` marks numeric.
    ///
    /// Empty when fewer than two numeric columns exist.
    pub fn correlation_matrix(df: &DataFrame, summary: &DatasetSummary) -> Result<CorrelationMatrix> {
        correlation::correlation_matrix(df, summary)
    }

    /// The `k` most frequent values of at most `max_columns` columns that
    /// `summary` marks non-numeric, in column order.
    pub fn top_categories(
        df: &DataFrame,
        summary: &DatasetSummary,
        k: usize,
        max_columns: usize,
    ) -> Result<TopCategories> {
        categories::top_categories(df, summary, k, max_columns)
    }
}
