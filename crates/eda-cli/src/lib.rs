//! Exploratory Data Analysis Library
//!
//! Descriptive statistics and report generation for delimited text files,
//! built on Polars.
//!
//! # Overview
//!
//! - **Loading**: CSV with a configurable separator and text encoding
//! - **Profiling**: per-column kind, counts, distinct values and numeric statistics
//! - **Missing values**: count and share of missing entries per column
//! - **Correlation**: pairwise Pearson correlation between numeric columns
//! - **Categories**: most frequent values of categorical columns
//! - **Quality heuristics**: dataset health flags and a score in [0, 1]
//! - **Reporting**: CSV tables, PNG charts and a markdown narrative
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use eda_cli::{LoadOptions, ReportCommand, ReportConfig};
//!
//! let config = ReportConfig::builder()
//!     .out_dir("reports")
//!     .title("Titanic")
//!     .top_k_categories(10)
//!     .build()?;
//!
//! let manifest = ReportCommand {
//!     path: "data/train.csv".into(),
//!     load: LoadOptions::default(),
//!     config,
//! }
//! .execute()?;
//!
//! println!("Report written to {}", manifest.report_path.display());
//! ```
//!
//! The analysis steps can also be used on their own:
//!
//! ```rust,ignore
//! use eda_cli::{DataProfiler, DataQualityAnalyzer, LoadOptions, load_csv};
//!
//! let df = load_csv("data/train.csv".as_ref(), &LoadOptions::new(';', "windows-1251"))?;
//! let summary = DataProfiler::summarize_dataset(&df)?;
//! let missing = DataProfiler::missing_table(&df)?;
//! let flags = DataQualityAnalyzer::compute_flags(&summary, &missing);
//! println!("Quality score: {:.2}", flags.quality_score);
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod loader;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use commands::{OverviewCommand, ReportCommand};
pub use config::{ConfigValidationError, LoadOptions, ReportConfig, ReportConfigBuilder};
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use loader::load_csv;
pub use profiler::DataProfiler;
pub use quality::DataQualityAnalyzer;
pub use reporting::{ReportGenerator, ReportManifest, ReportParams, SkippedArtifact};
pub use types::{
    CategoryCount, CategoryTable, ColumnKind, ColumnSummary, CorrelationMatrix, DatasetSummary,
    MissingEntry, MissingTable, NumericStats, QualityFlags, TopCategories,
};
pub use utils::{DtypeCategory, get_dtype_category, is_numeric_dtype, sanitize_file_name};
