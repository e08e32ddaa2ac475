//! Error types for cellbridge-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding, encoding or parsing cell values
#[derive(Debug, Error)]
pub enum Error {
    /// Cell reference without a row number
    #[error("Malformed cell address: '{0}' has no valid row number")]
    MalformedAddress(String),

    /// A shared-string cell was decoded without a shared string table
    #[error("Cell {0} references the shared string table, but the document has none")]
    MissingSharedStrings(String),

    /// Shared-string cell whose value is not an integer index
    #[error("Invalid shared string index: '{0}'")]
    InvalidSharedStringIndex(String),

    /// Shared-string index past the end of the table
    #[error("Shared string index {index} out of bounds (count: {count})")]
    SharedStringOutOfRange { index: usize, count: usize },

    /// Date cell whose value is not a serial number
    #[error("Invalid serial date: '{0}'")]
    InvalidSerialDate(String),

    /// Serial number outside the representable date range
    #[error("Serial date {0} is outside the supported range")]
    SerialDateOutOfRange(f64),

    /// Text that cannot be converted to the requested type
    #[error("'{input}' could not be converted to {target}")]
    Format { input: String, target: &'static str },

    /// A record field accessor failed while building a sheet
    #[error("Failed to read field '{field}': {message}")]
    FieldAccess { field: String, message: String },
}

impl Error {
    /// Create a format error for `input` and the named target type
    pub fn format<S: Into<String>>(input: S, target: &'static str) -> Self {
        Error::Format {
            input: input.into(),
            target,
        }
    }
}
