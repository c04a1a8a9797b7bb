use std::path::PathBuf;
use thiserror::Error;

/// Result type for csv2json operations
pub type Result<T> = std::result::Result<T, Csv2JsonError>;

/// Error types for csv2json operations
#[derive(Error, Debug)]
pub enum Csv2JsonError {
    /// A CSV row with the wrong number of fields or an unparsable coordinate
    #[error("Malformed row at line {line}{}: {reason}", key_suffix(.key))]
    MalformedRow {
        line: u64,
        key: Option<String>,
        reason: String,
    },

    /// The output document could not be created or written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// Tag not found in an auxiliary source
    #[error("Tag not found: {0}")]
    TagNotFound(String),

    /// Invalid tag value
    #[error("Invalid tag value: {0}")]
    InvalidValue(String),

    /// Glob filter that cannot be translated into a matcher
    #[error("Invalid file filter '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// CSV decoding error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

fn key_suffix(key: &Option<String>) -> String {
    match key {
        Some(key) => format!(" (key '{}')", key),
        None => String::new(),
    }
}

impl Csv2JsonError {
    /// Builds a [`Csv2JsonError::MalformedRow`]
    pub fn malformed(line: u64, key: Option<&str>, reason: impl Into<String>) -> Self {
        Csv2JsonError::MalformedRow {
            line,
            key: key.map(str::to_string),
            reason: reason.into(),
        }
    }

    /// Whether this error only affects a single CSV row
    pub fn is_row_error(&self) -> bool {
        matches!(self, Csv2JsonError::MalformedRow { .. })
    }

    /// Key of the malformed row, when it had one
    pub fn row_key(&self) -> Option<&str> {
        match self {
            Csv2JsonError::MalformedRow { key, .. } => key.as_deref(),
            _ => None,
        }
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for Csv2JsonError {
    fn from(e: dicom_object::ReadError) -> Self {
        Csv2JsonError::DicomError(format!("{}", e))
    }
}

impl From<dicom_core::value::ConvertValueError> for Csv2JsonError {
    fn from(e: dicom_core::value::ConvertValueError) -> Self {
        Csv2JsonError::InvalidValue(format!("{}", e))
    }
}
