//! Reading hand-built packages.

use crate::common::*;
use cellbridge_core::{parse_as, DecodedCell, Error, ExcelRecord};
use cellbridge_xlsx::{Document, SheetReader, XlsxError};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

fn single_rows(bytes: &[u8]) -> Vec<Vec<DecodedCell>> {
    let doc = Document::from_bytes(bytes).unwrap();
    SheetReader::read_single_sheet(&doc)
        .unwrap()
        .map(|row| row.collect_row().unwrap())
        .collect()
}

#[test]
fn reads_shared_strings_numbers_and_booleans() {
    let rows = single_rows(&single_sheet(
        r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>
           <row r="2"><c r="A2"><v>42.5</v></c><c r="B2" t="b"><v>1</v></c><c r="C2" t="b"><v>0</v></c></row>"#,
        Some(&["Name", "Active"]),
    ));

    assert_eq!(
        rows,
        vec![
            vec![DecodedCell::new("A", "Name"), DecodedCell::new("B", "Active")],
            vec![
                DecodedCell::new("A", "42.5"),
                DecodedCell::new("B", "TRUE"),
                DecodedCell::new("C", "FALSE"),
            ],
        ]
    );
}

#[test]
fn reads_inline_and_formula_strings() {
    let rows = single_rows(&single_sheet(
        r#"<row r="1">
             <c r="A1" t="inlineStr"><is><t>Hello</t></is></c>
             <c r="B1" t="inlineStr"><is><r><t>Rich </t></r><r><t>text</t></r></is></c>
             <c r="C1" t="str"><f>CONCAT("a","b")</f><v>ab</v></c>
           </row>"#,
        None,
    ));

    assert_eq!(
        rows[0],
        vec![
            DecodedCell::new("A", "Hello"),
            DecodedCell::new("B", "Rich text"),
            DecodedCell::new("C", "ab"),
        ]
    );
}

#[test]
fn reads_date_cells_as_text() {
    let rows = single_rows(&single_sheet(
        r#"<row r="1"><c r="A1" t="d" s="1"><v>44317</v></c><c r="B1" t="d"><v>44927.5</v></c></row>"#,
        None,
    ));

    assert_eq!(rows[0][0].value, "2021-05-01 00:00:00");
    assert_eq!(rows[0][1].value, "2023-01-01 12:00:00");
}

#[test]
fn raw_serial_parses_as_datetime() {
    let bytes = single_sheet(r#"<row r="1"><c r="A1" t="d" s="1"><v>44317</v></c></row>"#, None);
    let doc = Document::from_bytes(&bytes).unwrap();
    let raw = &doc.sheets().unwrap()[0].worksheet.as_ref().unwrap().rows[0].cells[0];

    assert_eq!(
        parse_as::<chrono::NaiveDateTime>(raw.value_text()).unwrap(),
        NaiveDate::from_ymd_opt(2021, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    );
}

#[test]
fn shared_string_without_table_fails_on_pull() {
    let bytes = single_sheet(r#"<row r="1"><c r="A1" t="s"><v>0</v></c></row>"#, None);
    let doc = Document::from_bytes(&bytes).unwrap();

    let mut rows = SheetReader::read_single_sheet(&doc).unwrap();
    let err = rows.next().unwrap().next().unwrap().unwrap_err();
    assert!(matches!(err, XlsxError::Core(Error::MissingSharedStrings(_))));
}

#[test]
fn empty_cells_decode_to_empty_text() {
    let rows = single_rows(&single_sheet(
        r#"<row r="1"><c r="A1"/><c r="B1" s="0"></c></row>"#,
        None,
    ));
    assert_eq!(
        rows[0],
        vec![DecodedCell::new("A", ""), DecodedCell::new("B", "")]
    );
}

#[test]
fn workbook_without_sheets_reads_empty() {
    let workbook = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"/>"#;
    let rels = workbook_rels(&[]);
    let bytes = package(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", workbook),
        ("xl/_rels/workbook.xml.rels", rels.as_str()),
    ]);

    let doc = Document::from_bytes(&bytes).unwrap();
    assert!(doc.sheets().is_none());
    assert_eq!(SheetReader::read_single_sheet(&doc).unwrap().count(), 0);
    assert!(SheetReader::read_all_sheets(&doc).unwrap().is_empty());
}

#[test]
fn sheet_with_missing_part_reads_empty() {
    let workbook = workbook_xml(&[("Ghost", "rId1")]);
    let rels = workbook_rels(&[("rId1", "worksheets/sheet1.xml")]);
    let bytes = package(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", rels.as_str()),
    ]);

    let doc = Document::from_bytes(&bytes).unwrap();
    assert_eq!(doc.sheet_count(), 1);
    assert_eq!(SheetReader::read_single_sheet(&doc).unwrap().count(), 0);
}

#[test]
fn reads_all_sheets_in_order() {
    let workbook = workbook_xml(&[("Sales", "rId1"), ("Costs", "rId2")]);
    let rels = workbook_rels(&[
        ("rId1", "worksheets/sheet1.xml"),
        ("rId2", "worksheets/sheet2.xml"),
        ("rId3", "sharedStrings.xml"),
    ]);
    let sst = shared_strings_xml(&["Widget"]);
    let sheet1 = worksheet_xml(
        r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1"><f>2*3</f><v>6</v></c></row>
           <row r="2"><c r="A2"><v>10</v></c></row>
           <row r="3"><c r="A3"><v>11</v></c></row>"#,
    );
    let sheet2 = worksheet_xml(
        r#"<row r="4"><c r="C4" t="b"><v>1</v></c></row>
           <row r="5"><c r="C5" t="b"><v>0</v></c></row>
           <row r="9"><c r="A9" t="str"><v>last</v></c></row>"#,
    );
    let bytes = package(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", rels.as_str()),
        ("xl/sharedStrings.xml", sst.as_str()),
        ("xl/worksheets/sheet1.xml", sheet1.as_str()),
        ("xl/worksheets/sheet2.xml", sheet2.as_str()),
    ]);

    let doc = Document::from_bytes(&bytes).unwrap();
    assert!(matches!(
        SheetReader::read_single_sheet(&doc),
        Err(XlsxError::AmbiguousSheet(2))
    ));

    let records = SheetReader::read_all_sheets(&doc).unwrap();
    let record = |sheet: &str, column: &str, row, formula: &str, value: &str| ExcelRecord {
        sheet: sheet.into(),
        column: column.into(),
        row,
        formula: formula.into(),
        value: value.into(),
    };
    assert_eq!(
        records,
        vec![
            record("Sales", "A", 1, "", "Widget"),
            record("Sales", "B", 1, "2*3", "6"),
            record("Sales", "A", 2, "", "10"),
            record("Sales", "A", 3, "", "11"),
            record("Costs", "C", 4, "", "TRUE"),
            record("Costs", "C", 5, "", "FALSE"),
            record("Costs", "A", 9, "", "last"),
        ]
    );
}

#[test]
fn rejects_non_package_bytes() {
    let bytes = package(&[("hello.txt", "not a spreadsheet")]);
    assert!(matches!(
        Document::from_bytes(&bytes),
        Err(XlsxError::InvalidFormat(_))
    ));
}
