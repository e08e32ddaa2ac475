//! Writing record collections as a single-sheet workbook

use std::io::{Seek, Write};

use crate::error::XlsxResult;
use crate::package::{Document, Row, Worksheet};
use crate::styles::{Stylesheet, BUILTIN_DATE_FORMAT};
use cellbridge_core::{encode, CellAddress, CellType, RawCell, Record, Schema};

/// Options for [`WorkbookWriter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Sheet name; the schema name when `None`
    pub sheet_name: Option<String>,
    /// Number format applied to date cells
    pub date_format_id: u32,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sheet_name: None,
            date_format_id: BUILTIN_DATE_FORMAT,
        }
    }
}

impl WriteOptions {
    /// Override the sheet name
    pub fn with_sheet_name<S: Into<String>>(mut self, name: S) -> Self {
        self.sheet_name = Some(name.into());
        self
    }

    /// Override the date number format
    pub fn with_date_format(mut self, num_fmt_id: u32) -> Self {
        self.date_format_id = num_fmt_id;
        self
    }
}

/// Record writer producing a one-sheet document
///
/// Row 1 holds the field names of the record's [`Schema`]; each record then
/// fills one row with its encoded field values, in schema order.
#[derive(Debug, Clone, Default)]
pub struct WorkbookWriter {
    options: WriteOptions,
}

impl WorkbookWriter {
    /// Create a writer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Build package bytes for the given records with default options
    pub fn build<'a, T, I>(items: I) -> XlsxResult<Vec<u8>>
    where
        T: Record + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        Self::new().to_bytes(items)
    }

    /// Build the in-memory document for the given records
    pub fn document<'a, T, I>(&self, items: I) -> XlsxResult<Document>
    where
        T: Record + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        self.document_with_schema(&T::schema(), items)
    }

    /// Build the in-memory document using an explicit schema
    pub fn document_with_schema<'a, T, I>(&self, schema: &Schema<T>, items: I) -> XlsxResult<Document>
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut worksheet = Worksheet::new();

        let mut header = Row::new(1);
        for (col, name) in schema.header().enumerate() {
            header.push(
                RawCell::new(CellAddress::from_indices(col, 0).to_string())
                    .with_type(CellType::String)
                    .with_value(name),
            );
        }
        worksheet.push(header);

        for (i, item) in items.into_iter().enumerate() {
            let row_idx = i + 1;
            let mut row = Row::new(row_idx as u32 + 1);
            for (col, value) in schema.values(item)?.iter().enumerate() {
                let reference = CellAddress::from_indices(col, row_idx).to_string();
                row.push(encode(value).into_raw_cell(reference));
            }
            worksheet.push(row);
        }

        let sheet_name = self
            .options
            .sheet_name
            .clone()
            .unwrap_or_else(|| schema.name().to_string());
        log::debug!(
            "built sheet '{}' with {} data rows",
            sheet_name,
            worksheet.rows.len() - 1
        );

        let mut document = Document::new();
        document
            .set_stylesheet(Stylesheet::with_date_format(self.options.date_format_id))
            .add_sheet(sheet_name, worksheet);
        Ok(document)
    }

    /// Build package bytes for the given records
    pub fn to_bytes<'a, T, I>(&self, items: I) -> XlsxResult<Vec<u8>>
    where
        T: Record + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        self.document(items)?.to_bytes()
    }

    /// Write the package for the given records to a writer
    pub fn write<'a, T, I, W>(&self, items: I, writer: W) -> XlsxResult<()>
    where
        T: Record + 'a,
        I: IntoIterator<Item = &'a T>,
        W: Write + Seek,
    {
        self.document(items)?.write(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XlsxError;
    use crate::SheetReader;
    use cellbridge_core::DATE_STYLE_INDEX;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    struct Person {
        name: String,
        age: i32,
        joined: NaiveDate,
    }

    impl Record for Person {
        fn schema() -> Schema<Self> {
            Schema::new("Person")
                .field("Name", |p: &Person| p.name.clone())
                .field("Age", |p: &Person| p.age)
                .field("Joined", |p: &Person| p.joined)
        }
    }

    fn alice() -> Person {
        Person {
            name: "Alice".into(),
            age: 30,
            joined: NaiveDate::from_ymd_opt(2021, 5, 1).unwrap(),
        }
    }

    fn only_sheet(doc: &Document) -> &Worksheet {
        doc.sheets().unwrap()[0].worksheet.as_ref().unwrap()
    }

    #[test]
    fn test_header_row_from_schema() {
        let doc = WorkbookWriter::new().document::<Person, _>(&[]).unwrap();
        let ws = only_sheet(&doc);

        assert_eq!(doc.sheets().unwrap()[0].name, "Person");
        assert_eq!(ws.rows.len(), 1);
        assert_eq!(
            ws.rows[0].cells,
            vec![
                RawCell::new("A1").with_type(CellType::String).with_value("Name"),
                RawCell::new("B1").with_type(CellType::String).with_value("Age"),
                RawCell::new("C1").with_type(CellType::String).with_value("Joined"),
            ]
        );
    }

    #[test]
    fn test_data_row_encoding() {
        let doc = WorkbookWriter::new().document(&[alice()]).unwrap();
        let row = &only_sheet(&doc).rows[1];

        assert_eq!(row.index, Some(2));
        assert_eq!(row.cells[0].cell_type, Some(CellType::String));
        assert_eq!(row.cells[1].value.as_deref(), Some("30"));
        assert_eq!(row.cells[2].reference, "C2");
        assert_eq!(row.cells[2].cell_type, Some(CellType::Date));
        assert_eq!(row.cells[2].style, Some(DATE_STYLE_INDEX));
        assert_eq!(row.cells[2].value.as_deref(), Some("44317"));
    }

    #[test]
    fn test_decodes_back_through_reader() {
        let bytes = WorkbookWriter::build(&[alice()]).unwrap();
        let doc = Document::from_bytes(&bytes).unwrap();

        let values: Vec<Vec<String>> = SheetReader::read_single_sheet(&doc)
            .unwrap()
            .map(|row| {
                row.collect_row()
                    .unwrap()
                    .into_iter()
                    .map(|c| c.value)
                    .collect()
            })
            .collect();

        assert_eq!(
            values,
            vec![
                vec!["Name", "Age", "Joined"],
                vec!["Alice", "30", "2021-05-01 00:00:00"],
            ]
        );
    }

    #[test]
    fn test_options_override_sheet_name_and_format() {
        let writer = WorkbookWriter::with_options(
            WriteOptions::default()
                .with_sheet_name("People")
                .with_date_format(22),
        );
        let doc = writer.document(&[alice()]).unwrap();

        assert_eq!(doc.sheets().unwrap()[0].name, "People");
        let formats = doc.stylesheet().unwrap().cell_formats();
        assert_eq!(formats[DATE_STYLE_INDEX as usize].num_fmt_id, 22);
    }

    #[test]
    fn test_field_failure_aborts_build() {
        let schema = Schema::new("Broken")
            .field("Name", |p: &Person| p.name.clone())
            .try_field("Age", |p: &Person| {
                if p.age > 0 {
                    Err("age is hidden")
                } else {
                    Ok(p.age)
                }
            });

        let err = WorkbookWriter::new()
            .document_with_schema(&schema, &[alice()])
            .unwrap_err();
        assert!(matches!(
            err,
            XlsxError::Core(cellbridge_core::Error::FieldAccess { .. })
        ));
    }
}
