//! Pairwise Pearson correlation between numeric columns.

use super::statistics::{has_variance, pearson};
use crate::error::Result;
use crate::types::{CorrelationMatrix, DatasetSummary};
use crate::utils::numeric_values;
use polars::prelude::*;
use tracing::debug;

pub(crate) fn correlation_matrix(
    df: &DataFrame,
    summary: &DatasetSummary,
) -> Result<CorrelationMatrix> {
    let mut columns = Vec::new();
    let mut data = Vec::new();
    for col in summary.numeric_columns() {
        let series = df.column(&col.name)?.as_materialized_series();
        columns.push(col.name.clone());
        data.push(numeric_values(series)?);
    }

    if columns.len() < 2 {
        debug!(
            "Skipping correlation: {} numeric column(s)",
            columns.len()
        );
        return Ok(CorrelationMatrix::default());
    }

    let n = columns.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        // A column with no spread has no defined correlation, not even with itself
        values[i][i] = if has_variance(&data[i]) { 1.0 } else { f64::NAN };
        for j in (i + 1)..n {
            let r = pearson(&data[i], &data[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix { columns, values })
}
