//! Shared utilities for the EDA tool.
//!
//! This module contains common helper functions used across multiple modules
//! to reduce code duplication and ensure consistency.

use crate::types::ColumnKind;
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a physical data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Date or datetime types
    Datetime,
    /// Boolean type
    Boolean,
    /// String/text type
    String,
    /// Other/unknown types
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a floating point type (the only ones that can hold NaN).
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Check if a DataType is a datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_datetime_dtype(dtype) {
        DtypeCategory::Datetime
    } else if matches!(dtype, DataType::Boolean) {
        DtypeCategory::Boolean
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        DtypeCategory::String
    } else {
        DtypeCategory::Other
    }
}

/// Map a physical type onto the coarse column kind used by the analyzers.
///
/// Dates, strings and anything unrecognized are treated as categorical.
pub fn column_kind(dtype: &DataType) -> ColumnKind {
    match get_dtype_category(dtype) {
        DtypeCategory::Numeric => ColumnKind::Numeric,
        DtypeCategory::Boolean => ColumnKind::Boolean,
        DtypeCategory::Datetime | DtypeCategory::String | DtypeCategory::Other => {
            ColumnKind::Categorical
        }
    }
}

// =============================================================================
// Value Extraction
// =============================================================================

/// Values of a numeric Series as f64, with nulls and NaN both as `None`.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Values of any Series rendered as text, nulls as `None`.
pub fn string_values(series: &Series) -> PolarsResult<Vec<Option<String>>> {
    let str_series = series.cast(&DataType::String)?;
    Ok(str_series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Number of missing entries: nulls, plus NaN for floating point columns.
pub fn missing_count(series: &Series) -> PolarsResult<usize> {
    if is_float_dtype(series.dtype()) {
        Ok(numeric_values(series)?.iter().filter(|v| v.is_none()).count())
    } else {
        Ok(series.null_count())
    }
}

/// `count / total`, defined as 0 when `total` is 0.
#[inline]
pub fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

// =============================================================================
// Boolean Detection Utilities
// =============================================================================

/// Textual true representations. Digits are left out: "0"/"1" columns load as integers.
pub const BOOLEAN_TRUE_VALUES: [&str; 5] = ["true", "yes", "t", "y", "on"];

/// Textual false representations.
pub const BOOLEAN_FALSE_VALUES: [&str; 5] = ["false", "no", "f", "n", "off"];

/// Check if a string represents a boolean value (true or false).
pub fn is_boolean_string(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    BOOLEAN_TRUE_VALUES
        .iter()
        .chain(BOOLEAN_FALSE_VALUES.iter())
        .any(|&v| v == lower)
}

// =============================================================================
// Formatting Utilities
// =============================================================================

static UNSAFE_FILE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w.\-]+").expect("file name pattern is valid"));

/// Turn a column name into something usable as part of a file name.
///
/// Runs of characters other than letters, digits, `_`, `.` and `-` become `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned = UNSAFE_FILE_CHARS.replace_all(name.trim(), "_");
    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        "column".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Format a share in [0, 1] as a percentage with two decimals.
pub fn format_share(share: f64) -> String {
    format!("{:.2}%", share * 100.0)
}

/// Format an optional float for tables; missing or NaN values render empty.
pub fn format_opt_f64(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_nan() => "NaN".to_string(),
        Some(v) => format!("{:.4}", v),
        None => String::new(),
    }
}

/// Truncate a string to max length (in chars) with ellipsis.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// =============================================================================
// Tests
// =============================================================================
