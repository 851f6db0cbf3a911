use crate::types::{ColumnKind, DatasetSummary, MissingTable, QualityFlags};

/// Datasets with fewer rows than this are flagged as too small.
pub const MIN_ROWS: usize = 100;
/// Datasets with more columns than this are flagged as too wide.
pub const MAX_COLUMNS: usize = 100;
/// A column missing more than this share flags the whole dataset.
pub const MAX_MISSING_SHARE: f64 = 0.5;
/// A categorical column with more distinct values than this share of the
/// row count is flagged as high-cardinality.
pub const HIGH_CARDINALITY_RATIO: f64 = 0.5;

const TOO_FEW_ROWS_PENALTY: f64 = 0.2;
const TOO_MANY_COLUMNS_PENALTY: f64 = 0.1;
const CONSTANT_COLUMNS_PENALTY: f64 = 0.1;
const HIGH_CARDINALITY_PENALTY: f64 = 0.1;

pub struct DataQualityAnalyzer;

impl DataQualityAnalyzer {
    /// Derive the quality flags and composite score.
    ///
    /// Pure function of its inputs: the same summary and missing table always
    /// produce the same flags.
    pub fn compute_flags(summary: &DatasetSummary, missing: &MissingTable) -> QualityFlags {
        let max_missing_share = missing.max_share();

        let too_few_rows = summary.n_rows < MIN_ROWS;
        let too_many_columns = summary.n_cols > MAX_COLUMNS;
        let too_many_missing = max_missing_share > MAX_MISSING_SHARE;

        let constant_columns: Vec<String> = summary
            .columns
            .iter()
            .filter(|col| col.is_constant())
            .map(|col| col.name.clone())
            .collect();

        let cardinality_limit = summary.n_rows as f64 * HIGH_CARDINALITY_RATIO;
        let high_cardinality_columns: Vec<String> = summary
            .columns
            .iter()
            .filter(|col| col.kind == ColumnKind::Categorical && col.unique as f64 > cardinality_limit)
            .map(|col| col.name.clone())
            .collect();

        let has_constant_columns = !constant_columns.is_empty();
        let has_high_cardinality_categoricals = !high_cardinality_columns.is_empty();

        let mut score = 1.0 - max_missing_share;
        if too_few_rows {
            score -= TOO_FEW_ROWS_PENALTY;
        }
        if too_many_columns {
            score -= TOO_MANY_COLUMNS_PENALTY;
        }
        if has_constant_columns {
            score -= CONSTANT_COLUMNS_PENALTY;
        }
        if has_high_cardinality_categoricals {
            score -= HIGH_CARDINALITY_PENALTY;
        }

        QualityFlags {
            n_rows: summary.n_rows,
            n_cols: summary.n_cols,
            quality_score: score.clamp(0.0, 1.0),
            max_missing_share,
            too_few_rows,
            too_many_columns,
            too_many_missing,
            has_constant_columns,
            constant_columns,
            has_high_cardinality_categoricals,
            high_cardinality_columns,
        }
    }
}
