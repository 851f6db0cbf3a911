//! Tabular artifacts, written as CSV through polars.

use crate::error::Result;
use crate::types::{CategoryTable, CorrelationMatrix, DatasetSummary, MissingTable};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Header of the index column in `correlation.csv`.
const INDEX_COLUMN: &str = "column";

/// One row per column with its kind, counts and numeric statistics.
pub fn summary_frame(summary: &DatasetSummary) -> PolarsResult<DataFrame> {
    let cols = &summary.columns;
    let stat = |f: fn(&crate::types::NumericStats) -> Option<f64>| -> Vec<Option<f64>> {
        cols.iter()
            .map(|c| c.numeric.as_ref().and_then(f))
            .collect()
    };

    DataFrame::new(vec![
        Column::new(
            "name".into(),
            cols.iter().map(|c| c.name.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "dtype".into(),
            cols.iter().map(|c| c.dtype.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "kind".into(),
            cols.iter().map(|c| c.kind.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            "non_null".into(),
            cols.iter().map(|c| c.non_null as u64).collect::<Vec<_>>(),
        ),
        Column::new(
            "missing".into(),
            cols.iter().map(|c| c.missing as u64).collect::<Vec<_>>(),
        ),
        Column::new(
            "missing_share".into(),
            cols.iter().map(|c| c.missing_share).collect::<Vec<_>>(),
        ),
        Column::new(
            "unique".into(),
            cols.iter().map(|c| c.unique as u64).collect::<Vec<_>>(),
        ),
        Column::new(
            "example".into(),
            cols.iter().map(|c| c.example.clone()).collect::<Vec<_>>(),
        ),
        Column::new("min".into(), stat(|s| Some(s.min))),
        Column::new("max".into(), stat(|s| Some(s.max))),
        Column::new("mean".into(), stat(|s| Some(s.mean))),
        Column::new("std".into(), stat(|s| s.std)),
        Column::new("q25".into(), stat(|s| Some(s.q25))),
        Column::new("q50".into(), stat(|s| Some(s.q50))),
        Column::new("q75".into(), stat(|s| Some(s.q75))),
    ])
}

pub fn missing_frame(missing: &MissingTable) -> PolarsResult<DataFrame> {
    let entries = &missing.entries;
    DataFrame::new(vec![
        Column::new(
            "column".into(),
            entries.iter().map(|e| e.column.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "missing_count".into(),
            entries.iter().map(|e| e.missing_count as u64).collect::<Vec<_>>(),
        ),
        Column::new(
            "missing_share".into(),
            entries.iter().map(|e| e.missing_share).collect::<Vec<_>>(),
        ),
    ])
}

/// The matrix with a leading index column naming each row.
pub fn correlation_frame(corr: &CorrelationMatrix) -> PolarsResult<DataFrame> {
    // the index header must not clash with a numeric column's name
    let mut index_name = INDEX_COLUMN.to_string();
    while corr.columns.contains(&index_name) {
        index_name.push('_');
    }

    let mut columns = Vec::with_capacity(corr.len() + 1);
    columns.push(Column::new(index_name.into(), corr.columns.clone()));
    for (j, name) in corr.columns.iter().enumerate() {
        let values: Vec<f64> = corr.values.iter().map(|row| row[j]).collect();
        columns.push(Column::new(name.as_str().into(), values));
    }
    DataFrame::new(columns)
}

pub fn category_frame(table: &CategoryTable) -> PolarsResult<DataFrame> {
    DataFrame::new(vec![
        Column::new(
            "value".into(),
            table.values.iter().map(|v| v.value.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "count".into(),
            table.values.iter().map(|v| v.count as u64).collect::<Vec<_>>(),
        ),
        Column::new(
            "share".into(),
            table.values.iter().map(|v| v.share).collect::<Vec<_>>(),
        ),
    ])
}

/// Write a frame as a comma separated file with a header row.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(df)?;

    debug!("Table saved: {}", path.display());
    Ok(())
}
