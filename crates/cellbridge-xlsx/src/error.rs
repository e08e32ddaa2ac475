//! Errors raised while reading or writing a spreadsheet package

use thiserror::Error;

/// Result alias for package and sheet operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Failure reading, decoding or writing a package
#[derive(Debug, Error)]
pub enum XlsxError {
    /// The file or stream could not be read or written
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// The package is not a readable zip archive
    #[error("bad package archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A package part is not well-formed XML
    #[error("bad part XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The archive is not a spreadsheet package
    #[error("not a spreadsheet package: {0}")]
    InvalidFormat(String),

    /// A part the workbook cannot do without is absent
    #[error("package part not found: {0}")]
    MissingPart(String),

    /// `read_single_sheet` on a workbook with several sheets
    #[error("Expected exactly one sheet, found {0}")]
    AmbiguousSheet(usize),

    /// A cell failed to decode or a record field failed to read
    #[error("Cell error: {0}")]
    Core(#[from] cellbridge_core::Error),
}
