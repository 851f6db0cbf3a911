//! Reading a delimited text file into a polars DataFrame.

use crate::config::LoadOptions;
use crate::error::{EdaError, Result};
use encoding_rs::Encoding;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Load a CSV file with the given separator and text encoding.
///
/// Fails with a user-facing error when the path does not exist, the encoding
/// label is unknown, the bytes do not decode, or the text is not valid CSV.
pub fn load_csv(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    options.validate()?;

    if !path.exists() {
        return Err(EdaError::FileNotFound(path.to_path_buf()));
    }

    let encoding = Encoding::for_label(options.encoding.trim().as_bytes())
        .ok_or_else(|| EdaError::UnknownEncoding(options.encoding.clone()))?;

    info!("Loading dataset from: {}", path.display());
    let bytes = std::fs::read(path).map_err(|e| EdaError::CsvParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let (text, used_encoding, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(EdaError::Decode {
            path: path.to_path_buf(),
            encoding: used_encoding.name().to_string(),
        });
    }
    debug!(
        "Decoded {} bytes as {}",
        bytes.len(),
        used_encoding.name()
    );

    let df = parse_csv(text.into_owned().into_bytes(), options.separator_byte()).map_err(|e| {
        EdaError::CsvParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    info!("Dataset loaded successfully: {:?}", df.shape());
    Ok(df)
}

/// Parse UTF-8 CSV bytes with a header row.
///
/// Types are inferred over every row so a late non-numeric value turns the
/// column into text instead of failing the parse. Empty fields are null.
pub fn parse_csv(bytes: Vec<u8>, separator: u8) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(separator)
                .with_quote_char(Some(b'"')),
        )
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
}
