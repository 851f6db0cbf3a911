//! Data quality heuristics.
//!
//! This module turns the dataset summary and missing-value table into a
//! fixed set of health flags and a composite score in [0, 1].

mod analyzer;

pub use analyzer::{
    DataQualityAnalyzer, HIGH_CARDINALITY_RATIO, MAX_COLUMNS, MAX_MISSING_SHARE, MIN_ROWS,
};
