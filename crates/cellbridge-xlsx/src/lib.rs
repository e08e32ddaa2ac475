//! # cellbridge-xlsx
//!
//! XLSX (Office Open XML) package handling for cellbridge.
//!
//! - [`Document`] reads a package into sheets, rows and raw cells and writes
//!   one back out
//! - [`SheetReader`] decodes cell values into rows or flat records
//! - [`WorkbookWriter`] turns a collection of [`Record`](cellbridge_core::Record)
//!   values into a single-sheet package

pub mod error;
pub mod package;
pub mod sheet_reader;
pub mod styles;
pub mod workbook_writer;

pub use error::{XlsxError, XlsxResult};
pub use package::{Document, Row, SheetEntry, Worksheet};
pub use sheet_reader::{RowCells, SheetReader, SheetRows};
pub use styles::{CellFormat, Stylesheet, BUILTIN_DATE_FORMAT};
pub use workbook_writer::{WorkbookWriter, WriteOptions};
