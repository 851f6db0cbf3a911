//! Configuration types for loading a dataset and rendering a report.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic report setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default output directory for the `report` command.
pub const DEFAULT_OUT_DIR: &str = "reports";
/// Default report title.
pub const DEFAULT_TITLE: &str = "EDA report";
/// Default number of numeric columns that get a histogram.
pub const DEFAULT_MAX_HIST_COLUMNS: usize = 6;
/// Default number of categorical columns that get a top-values table.
pub const DEFAULT_MAX_CAT_COLUMNS: usize = 5;
/// Default number of top values kept per categorical column.
pub const DEFAULT_TOP_K_CATEGORIES: usize = 5;
/// Default missing share from which a column is flagged as problematic.
pub const DEFAULT_MIN_MISSING_SHARE: f64 = 0.3;

/// How to read the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Field separator. Must be a single ASCII character.
    /// Default: ','
    pub separator: char,

    /// Text encoding label (WHATWG names such as "utf-8", "windows-1251").
    /// Default: "utf-8"
    pub encoding: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            separator: ',',
            encoding: "utf-8".to_string(),
        }
    }
}

impl LoadOptions {
    pub fn new(separator: char, encoding: impl Into<String>) -> Self {
        Self {
            separator,
            encoding: encoding.into(),
        }
    }

    /// Validate the options and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        // '"' is the CSV quote character
        if !self.separator.is_ascii() || matches!(self.separator, '\n' | '\r' | '"') {
            return Err(ConfigValidationError::InvalidSeparator(self.separator));
        }
        Ok(())
    }

    /// The separator as the single byte the CSV parser expects.
    pub fn separator_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.separator as u8
    }
}

/// Configuration for the `report` command.
///
/// Use [`ReportConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use eda_cli::config::ReportConfig;
///
/// let config = ReportConfig::builder()
///     .out_dir("reports/titanic")
///     .top_k_categories(10)
///     .min_missing_share(0.2)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory all artifacts are written to.
    /// Default: "reports"
    pub out_dir: PathBuf,

    /// Title of the markdown report.
    /// Default: "EDA report"
    pub title: String,

    /// Maximum number of numeric columns that get a histogram (> 0).
    /// Default: 6
    pub max_hist_columns: usize,

    /// Maximum number of categorical columns analyzed for top values.
    /// Default: 5
    pub max_cat_columns: usize,

    /// Number of most frequent values kept per categorical column (> 0).
    /// Default: 5
    pub top_k_categories: usize,

    /// Columns with a missing share at or above this value are listed as
    /// problematic (0.0 - 1.0).
    /// Default: 0.3
    pub min_missing_share: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            title: DEFAULT_TITLE.to_string(),
            max_hist_columns: DEFAULT_MAX_HIST_COLUMNS,
            max_cat_columns: DEFAULT_MAX_CAT_COLUMNS,
            top_k_categories: DEFAULT_TOP_K_CATEGORIES,
            min_missing_share: DEFAULT_MIN_MISSING_SHARE,
        }
    }
}

impl ReportConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.top_k_categories == 0 {
            return Err(ConfigValidationError::InvalidTopK(self.top_k_categories));
        }

        if self.max_hist_columns == 0 {
            return Err(ConfigValidationError::InvalidMaxHistColumns(
                self.max_hist_columns,
            ));
        }

        if !(0.0..=1.0).contains(&self.min_missing_share) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "min_missing_share".to_string(),
                value: self.min_missing_share,
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid top-k categories: {0} (must be > 0)")]
    InvalidTopK(usize),

    #[error("Invalid max histogram columns: {0} (must be > 0)")]
    InvalidMaxHistColumns(usize),

    #[error("Invalid separator {0:?} (must be a single ASCII character other than a quote or line break)")]
    InvalidSeparator(char),
}

impl ConfigValidationError {
    /// The command-line option the error refers to.
    pub fn option(&self) -> &'static str {
        match self {
            Self::InvalidThreshold { .. } => "--min-missing-share",
            Self::InvalidTopK(_) => "--top-k-categories",
            Self::InvalidMaxHistColumns(_) => "--max-hist-columns",
            Self::InvalidSeparator(_) => "--sep",
        }
    }
}

/// Builder for [`ReportConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    out_dir: Option<PathBuf>,
    title: Option<String>,
    max_hist_columns: Option<usize>,
    max_cat_columns: Option<usize>,
    top_k_categories: Option<usize>,
    min_missing_share: Option<f64>,
}

impl ReportConfigBuilder {
    /// Set the output directory.
    pub fn out_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(path.into());
        self
    }

    /// Set the report title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the maximum number of histogrammed numeric columns.
    pub fn max_hist_columns(mut self, n: usize) -> Self {
        self.max_hist_columns = Some(n);
        self
    }

    /// Set the maximum number of analyzed categorical columns.
    pub fn max_cat_columns(mut self, n: usize) -> Self {
        self.max_cat_columns = Some(n);
        self
    }

    /// Set how many top values are kept per categorical column.
    pub fn top_k_categories(mut self, k: usize) -> Self {
        self.top_k_categories = Some(k);
        self
    }

    /// Set the problematic-column threshold.
    ///
    /// # Arguments
    /// * `share` - Value between 0.0 and 1.0 (e.g., 0.3 = 30%)
    pub fn min_missing_share(mut self, share: f64) -> Self {
        self.min_missing_share = Some(share);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ReportConfig` or an error if validation fails.
    pub fn build(self) -> Result<ReportConfig, ConfigValidationError> {
        let config = ReportConfig {
            out_dir: self
                .out_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
            title: self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            max_hist_columns: self.max_hist_columns.unwrap_or(DEFAULT_MAX_HIST_COLUMNS),
            max_cat_columns: self.max_cat_columns.unwrap_or(DEFAULT_MAX_CAT_COLUMNS),
            top_k_categories: self.top_k_categories.unwrap_or(DEFAULT_TOP_K_CATEGORIES),
            min_missing_share: self.min_missing_share.unwrap_or(DEFAULT_MIN_MISSING_SHARE),
        };

        config.validate()?;
        Ok(config)
    }
}
