//! Decoding a document's cells into caller-facing records
//!
//! Single-sheet reads are lazy: rows and cells are decoded as they are pulled
//! and borrow the [`Document`] they come from, so the document must outlive
//! the iteration. Multi-sheet reads are collected eagerly.

use std::slice;

use crate::error::{XlsxError, XlsxResult};
use crate::package::{Document, Row};
use cellbridge_core::{decode, DecodedCell, ExcelRecord, RawCell, SharedStringTable};

/// Cell reader over a parsed [`Document`]
pub struct SheetReader;

impl SheetReader {
    /// Iterate the rows of the document's only sheet.
    ///
    /// Yields nothing when the workbook has no sheet collection, no sheets,
    /// or when the sheet's worksheet part cannot be resolved. A workbook with
    /// more than one sheet is an error.
    pub fn read_single_sheet(document: &Document) -> XlsxResult<SheetRows<'_>> {
        let Some(sheets) = document.sheets() else {
            return Ok(SheetRows::empty());
        };

        let entry = match sheets {
            [] => return Ok(SheetRows::empty()),
            [entry] => entry,
            _ => return Err(XlsxError::AmbiguousSheet(sheets.len())),
        };

        match &entry.worksheet {
            Some(worksheet) => Ok(SheetRows {
                rows: worksheet.rows.iter(),
                shared_strings: document.shared_strings(),
            }),
            None => {
                log::debug!("sheet '{}' has no worksheet part", entry.name);
                Ok(SheetRows::empty())
            }
        }
    }

    /// Decode every cell of every sheet, in sheet, row and cell order.
    ///
    /// Sheets whose worksheet part cannot be resolved are skipped.
    pub fn read_all_sheets(document: &Document) -> XlsxResult<Vec<ExcelRecord>> {
        let shared_strings = document.shared_strings();
        let mut records = Vec::new();

        for entry in document.sheets().unwrap_or(&[]) {
            let Some(worksheet) = &entry.worksheet else {
                log::debug!("skipping sheet '{}' without worksheet part", entry.name);
                continue;
            };

            for row in &worksheet.rows {
                for cell in &row.cells {
                    records.push(ExcelRecord {
                        sheet: entry.name.clone(),
                        column: cell.column_name().to_string(),
                        row: cell.row_index()?,
                        formula: cell.formula_text().to_string(),
                        value: decode(cell, shared_strings)?,
                    });
                }
            }
        }

        Ok(records)
    }
}

fn decode_cell(cell: &RawCell, shared_strings: Option<&SharedStringTable>) -> XlsxResult<DecodedCell> {
    Ok(DecodedCell {
        column: cell.column_name().to_string(),
        value: decode(cell, shared_strings)?,
    })
}

/// Lazy iterator over the rows of a sheet
#[derive(Debug, Clone)]
pub struct SheetRows<'a> {
    rows: slice::Iter<'a, Row>,
    shared_strings: Option<&'a SharedStringTable>,
}

impl<'a> SheetRows<'a> {
    fn empty() -> Self {
        let rows: &'a [Row] = &[];
        Self {
            rows: rows.iter(),
            shared_strings: None,
        }
    }
}

impl<'a> Iterator for SheetRows<'a> {
    type Item = RowCells<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().map(|row| RowCells {
            cells: row.cells.iter(),
            shared_strings: self.shared_strings,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

/// Lazy iterator over the decoded cells of one row
#[derive(Debug, Clone)]
pub struct RowCells<'a> {
    cells: slice::Iter<'a, RawCell>,
    shared_strings: Option<&'a SharedStringTable>,
}

impl RowCells<'_> {
    /// Decode the remaining cells of the row, stopping at the first failure
    pub fn collect_row(self) -> XlsxResult<Vec<DecodedCell>> {
        self.collect()
    }
}

impl Iterator for RowCells<'_> {
    type Item = XlsxResult<DecodedCell>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cells
            .next()
            .map(|cell| decode_cell(cell, self.shared_strings))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}
