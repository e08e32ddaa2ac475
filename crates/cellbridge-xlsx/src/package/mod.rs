//! The spreadsheet package as a tree of sheets, rows and raw cells
//!
//! [`Document::read`] parses a package's XML parts into this tree and
//! [`Document::write`] serializes a tree back into package bytes. No cell
//! values are interpreted here; decoding is left to
//! [`SheetReader`](crate::SheetReader).

mod reader;
mod writer;

use std::fs::File;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use crate::error::XlsxResult;
use crate::styles::Stylesheet;
use cellbridge_core::{RawCell, SharedStringTable};

/// A row of raw cells in on-disk order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// The `r` attribute of `<row>`
    pub index: Option<u32>,
    /// Cells in on-disk order
    pub cells: Vec<RawCell>,
}

impl Row {
    /// Create an empty row with the given 1-based index
    pub fn new(index: u32) -> Self {
        Self {
            index: Some(index),
            cells: Vec::new(),
        }
    }

    /// Append a cell
    pub fn push(&mut self, cell: RawCell) {
        self.cells.push(cell);
    }
}

/// The `<sheetData>` of one worksheet part
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Worksheet {
    /// Rows in on-disk order
    pub rows: Vec<Row>,
}

impl Worksheet {
    /// Create an empty worksheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }
}

/// A `<sheet>` entry of the workbook and the worksheet it links to
#[derive(Debug, Clone, PartialEq)]
pub struct SheetEntry {
    /// Sheet name
    pub name: String,
    /// The `sheetId` attribute
    pub sheet_id: u32,
    /// The linked worksheet, `None` when the relationship or part is missing
    pub worksheet: Option<Worksheet>,
}

/// A parsed spreadsheet package
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    sheets: Option<Vec<SheetEntry>>,
    shared_strings: Option<SharedStringTable>,
    stylesheet: Option<Stylesheet>,
}

impl Document {
    /// Create an empty document (no sheet collection at all)
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a document from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> XlsxResult<Self> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a document from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Self> {
        reader::read_document(reader)
    }

    /// Read a document from bytes in memory
    pub fn from_bytes(bytes: &[u8]) -> XlsxResult<Self> {
        Self::read(Cursor::new(bytes))
    }

    /// Write the document to a writer
    pub fn write<W: Write + Seek>(&self, writer: W) -> XlsxResult<()> {
        writer::write_document(self, writer)
    }

    /// Write the document to a file path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        self.write(file)
    }

    /// Serialize the document into package bytes
    pub fn to_bytes(&self) -> XlsxResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write(Cursor::new(&mut buf))?;
        Ok(buf)
    }

    /// Sheet entries, `None` when the workbook has no `<sheets>` element
    pub fn sheets(&self) -> Option<&[SheetEntry]> {
        self.sheets.as_deref()
    }

    /// Number of sheet entries
    pub fn sheet_count(&self) -> usize {
        self.sheets.as_ref().map_or(0, Vec::len)
    }

    /// Append a sheet, creating the sheet collection if needed
    pub fn add_sheet<S: Into<String>>(&mut self, name: S, worksheet: Worksheet) -> &mut Self {
        let sheets = self.sheets.get_or_insert_with(Vec::new);
        let sheet_id = sheets.len() as u32 + 1;
        sheets.push(SheetEntry {
            name: name.into(),
            sheet_id,
            worksheet: Some(worksheet),
        });
        self
    }

    /// The shared string table, if the package has one
    pub fn shared_strings(&self) -> Option<&SharedStringTable> {
        self.shared_strings.as_ref()
    }

    /// Set the shared string table
    pub fn set_shared_strings(&mut self, table: SharedStringTable) -> &mut Self {
        self.shared_strings = Some(table);
        self
    }

    /// The style table, if the package has one
    pub fn stylesheet(&self) -> Option<&Stylesheet> {
        self.stylesheet.as_ref()
    }

    /// Set the style table
    pub fn set_stylesheet(&mut self, stylesheet: Stylesheet) -> &mut Self {
        self.stylesheet = Some(stylesheet);
        self
    }
}
