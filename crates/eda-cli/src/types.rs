use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse type of a column, decided once when the dataset is summarized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integer or floating point values.
    Numeric,
    /// Text or any other non-numeric, non-boolean values.
    Categorical,
    /// true/false values.
    Boolean,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
            ColumnKind::Boolean => "boolean",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive statistics of the non-missing values of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation; `None` for fewer than two values.
    pub std: Option<f64>,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Physical type as reported by the loader (e.g. "Int64", "String").
    pub dtype: String,
    pub kind: ColumnKind,
    pub non_null: usize,
    pub missing: usize,
    pub missing_share: f64,
    /// Distinct non-missing values.
    pub unique: usize,
    /// First non-missing value rendered as text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Present for numeric columns with at least one value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericStats>,
}

impl ColumnSummary {
    /// A column with exactly one distinct non-missing value.
    pub fn is_constant(&self) -> bool {
        self.unique == 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub n_rows: usize,
    pub n_cols: usize,
    pub columns: Vec<ColumnSummary>,
}

impl DatasetSummary {
    pub fn numeric_columns(&self) -> impl Iterator<Item = &ColumnSummary> {
        self.columns.iter().filter(|c| c.kind.is_numeric())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingEntry {
    pub column: String,
    pub missing_count: usize,
    pub missing_share: f64,
}

/// Per-column missingness, in table column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingTable {
    pub entries: Vec<MissingEntry>,
}

impl MissingTable {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&MissingEntry> {
        self.entries.iter().find(|e| e.column == column)
    }

    /// Largest missing share over all columns, 0 for an empty table.
    pub fn max_share(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.missing_share)
            .fold(0.0, f64::max)
    }

    /// Columns whose missing share is at or above `threshold`.
    pub fn problematic(&self, threshold: f64) -> Vec<&MissingEntry> {
        self.entries
            .iter()
            .filter(|e| e.missing_share >= threshold)
            .collect()
    }
}

/// Square Pearson correlation matrix over the numeric columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `values[i][j]` is the correlation of `columns[i]` and `columns[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
    /// count / total rows
    pub share: f64,
}

/// Most frequent values of one categorical column, descending by count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable {
    pub column: String,
    pub values: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopCategories {
    pub tables: Vec<CategoryTable>,
}

impl TopCategories {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&CategoryTable> {
        self.tables.iter().find(|t| t.column == column)
    }
}

/// Dataset health heuristics derived from the summary and missing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFlags {
    pub n_rows: usize,
    pub n_cols: usize,
    /// Composite score in [0, 1], higher is healthier.
    pub quality_score: f64,
    pub max_missing_share: f64,
    pub too_few_rows: bool,
    pub too_many_columns: bool,
    pub too_many_missing: bool,
    pub has_constant_columns: bool,
    pub constant_columns: Vec<String>,
    pub has_high_cardinality_categoricals: bool,
    pub high_cardinality_columns: Vec<String>,
}
