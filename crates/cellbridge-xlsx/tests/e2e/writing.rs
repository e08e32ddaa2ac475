//! Writing records and reading them back.

use cellbridge_core::{ExcelRecord, Record, Schema};
use cellbridge_xlsx::{Document, SheetReader, WorkbookWriter};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

struct Order {
    id: u32,
    customer: Option<String>,
    paid: bool,
    total: f64,
    placed: NaiveDate,
}

impl Record for Order {
    fn schema() -> Schema<Self> {
        Schema::new("Orders")
            .field("Id", |o: &Order| o.id)
            .field("Customer", |o: &Order| o.customer.clone())
            .field("Paid", |o: &Order| o.paid)
            .field("Total", |o: &Order| o.total)
            .field("Placed", |o: &Order| o.placed)
    }
}

fn records(bytes: &[u8]) -> Vec<ExcelRecord> {
    let doc = Document::from_bytes(bytes).unwrap();
    SheetReader::read_all_sheets(&doc).unwrap()
}

#[test]
fn empty_collection_writes_header_only() {
    let bytes = WorkbookWriter::build::<Order, _>(Vec::new()).unwrap();
    let records = records(&bytes);

    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|r| r.row == 1 && r.sheet == "Orders"));
    assert_eq!(
        records.iter().map(|r| r.value.as_str()).collect::<Vec<_>>(),
        ["Id", "Customer", "Paid", "Total", "Placed"]
    );
}

#[test]
fn values_round_trip_as_text() {
    let orders = vec![
        Order {
            id: 7,
            customer: Some("Ada & Co".into()),
            paid: true,
            total: 19.99,
            placed: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        },
        Order {
            id: 8,
            customer: None,
            paid: false,
            total: 0.5,
            placed: NaiveDate::from_ymd_opt(1899, 12, 30).unwrap(),
        },
    ];

    let bytes = WorkbookWriter::build(&orders).unwrap();
    let rows: Vec<Vec<String>> = records(&bytes)
        .chunks(5)
        .map(|row| row.iter().map(|r| r.value.clone()).collect())
        .collect();

    assert_eq!(
        rows,
        vec![
            vec!["Id", "Customer", "Paid", "Total", "Placed"],
            vec!["7", "Ada & Co", "TRUE", "19.99", "2023-01-01 00:00:00"],
            vec!["8", "", "FALSE", "0.5", "1899-12-30 00:00:00"],
        ]
    );
}

#[test]
fn written_package_keeps_date_style() {
    let schema = Schema::new("Dates").field("When", |d: &NaiveDate| *d);
    let dates = [NaiveDate::from_ymd_opt(2021, 5, 1).unwrap()];
    let doc = WorkbookWriter::new()
        .document_with_schema(&schema, &dates)
        .unwrap();

    let reread = Document::from_bytes(&doc.to_bytes().unwrap()).unwrap();
    let sheet = &reread.sheets().unwrap()[0];
    let cell = &sheet.worksheet.as_ref().unwrap().rows[1].cells[0];

    assert_eq!(sheet.name, "Dates");
    assert_eq!(cell.style, Some(1));
    assert_eq!(cell.value.as_deref(), Some("44317"));
    assert_eq!(reread.stylesheet().unwrap().cell_formats()[1].num_fmt_id, 14);
}
