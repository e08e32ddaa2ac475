//! # cellbridge
//!
//! Read spreadsheet cells as display text and write collections of records
//! as XLSX workbooks.
//!
//! ## Features
//!
//! - Lazy row-by-row reads of a single-sheet workbook
//! - Flat `(sheet, column, row, formula, value)` records across all sheets
//! - Shared strings, inline strings, booleans and serial dates decoded to text
//! - Typed reads of decoded text (`parse_as`, `parse_optional`)
//! - Record export through a declared [`Schema`]
//!
//! ## Example
//!
//! ```rust
//! use cellbridge::prelude::*;
//!
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! impl Record for Person {
//!     fn schema() -> Schema<Self> {
//!         Schema::new("Person")
//!             .field("Name", |p: &Person| p.name.clone())
//!             .field("Age", |p: &Person| p.age)
//!     }
//! }
//!
//! let people = vec![Person { name: "Alice".into(), age: 30 }];
//! let bytes = WorkbookWriter::build(&people).unwrap();
//!
//! let doc = Document::from_bytes(&bytes).unwrap();
//! let records = SheetReader::read_all_sheets(&doc).unwrap();
//! assert_eq!(records[3].value, "30");
//! assert_eq!(parse_as::<i32>(&records[3].value).unwrap(), 30);
//! ```

pub mod prelude;

// Re-export core types
pub use cellbridge_core::{
    decode, encode, parse_as, parse_column, parse_optional, parse_row, CellAddress, CellType,
    DecodedCell, EncodedCell, Error, ExcelRecord, Field, FieldValue, FromCellText, RawCell,
    Record, Result, Schema, SharedStringTable, DATE_STYLE_INDEX,
};

// Re-export date helpers
pub use cellbridge_core::date;

// Re-export I/O types
pub use cellbridge_xlsx::{
    CellFormat, Document, Row, RowCells, SheetEntry, SheetReader, SheetRows, Stylesheet,
    WorkbookWriter, Worksheet, WriteOptions, XlsxError, XlsxResult,
};

use std::io::{Read, Seek};
use std::path::Path;

/// Read every cell of every sheet in the workbook at `path`
pub fn read_all_sheets<P: AsRef<Path>>(path: P) -> XlsxResult<Vec<ExcelRecord>> {
    let path = path.as_ref();
    log::debug!("reading all sheets of {}", path.display());
    let document = Document::open(path)?;
    SheetReader::read_all_sheets(&document)
}

/// Read every cell of every sheet in a workbook stream
pub fn read_all_sheets_from<R: Read + Seek>(reader: R) -> XlsxResult<Vec<ExcelRecord>> {
    let document = Document::read(reader)?;
    SheetReader::read_all_sheets(&document)
}

/// Read the rows of a single-sheet workbook at `path`.
///
/// The rows are decoded eagerly; use [`Document`] and
/// [`SheetReader::read_single_sheet`] to decode on demand.
pub fn read_single_sheet<P: AsRef<Path>>(path: P) -> XlsxResult<Vec<Vec<DecodedCell>>> {
    let document = Document::open(path)?;
    let rows = SheetReader::read_single_sheet(&document)?
        .map(RowCells::collect_row)
        .collect::<XlsxResult<Vec<_>>>()?;
    Ok(rows)
}

/// Write `items` as a single-sheet workbook at `path`
pub fn write_records<'a, T, I, P>(items: I, path: P) -> XlsxResult<()>
where
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
    P: AsRef<Path>,
{
    write_records_with(items, path, WriteOptions::default())
}

/// Write `items` as a single-sheet workbook at `path` with custom options
pub fn write_records_with<'a, T, I, P>(items: I, path: P, options: WriteOptions) -> XlsxResult<()>
where
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let document = WorkbookWriter::with_options(options).document(items)?;
    document.save(path)?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
