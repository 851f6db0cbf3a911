//! Error types for loading, analyzing and rendering a dataset report.
//!
//! Errors fall into two groups. User errors (missing file, unreadable CSV,
//! unknown encoding, invalid option) are reported before anything is written.
//! Everything else is an internal failure that aborts the run.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigValidationError;

/// The main error type for the EDA tool.
#[derive(Error, Debug)]
pub enum EdaError {
    /// The input file does not exist.
    #[error("File '{}' not found", .0.display())]
    FileNotFound(PathBuf),

    /// The input file exists but could not be parsed as CSV.
    #[error("Failed to read CSV '{}': {reason}", path.display())]
    CsvParse { path: PathBuf, reason: String },

    /// The input bytes are not valid in the requested encoding.
    #[error("Failed to decode '{}' as {encoding} (encoding mismatch)", path.display())]
    Decode { path: PathBuf, encoding: String },

    /// The encoding label is not known.
    #[error("Unknown encoding '{0}' (option --encoding)")]
    UnknownEncoding(String),

    /// A command-line option has an invalid value.
    #[error("Invalid value for {option}: {reason}")]
    InvalidParameter { option: String, reason: String },

    /// A chart could not be drawn.
    #[error("Failed to render chart '{chart}': {reason}")]
    Chart { chart: String, reason: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EdaError>,
    },
}

impl EdaError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EdaError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Shorthand for [`EdaError::InvalidParameter`].
    pub fn invalid_parameter(option: impl Into<String>, reason: impl Into<String>) -> Self {
        EdaError::InvalidParameter {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Stable error code, used in logs and by the binary.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound(_) => "FILE_NOT_FOUND",
            Self::CsvParse { .. } => "CSV_PARSE_FAILED",
            Self::Decode { .. } => "DECODE_FAILED",
            Self::UnknownEncoding(_) => "UNKNOWN_ENCODING",
            Self::InvalidParameter { .. } => "INVALID_PARAMETER",
            Self::Chart { .. } => "CHART_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error was caused by the user's input rather than by
    /// the tool itself.
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::FileNotFound(_)
            | Self::CsvParse { .. }
            | Self::Decode { .. }
            | Self::UnknownEncoding(_)
            | Self::InvalidParameter { .. } => true,
            Self::WithContext { source, .. } => source.is_user_error(),
            _ => false,
        }
    }
}

impl From<ConfigValidationError> for EdaError {
    fn from(err: ConfigValidationError) -> Self {
        EdaError::InvalidParameter {
            option: err.option().to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias for EDA operations.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EdaError::Polars(e).with_context(context))
    }
}
