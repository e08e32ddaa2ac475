//! Package serialization: a [`Document`] tree into ZIP/XML parts

use std::io::{Seek, Write};

use super::{Document, SheetEntry, Worksheet};
use crate::error::XlsxResult;
use cellbridge_core::{CellType, RawCell, SharedStringTable};

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Relationship ids of the workbook part: one per sheet, then styles and
/// shared strings when present
struct WorkbookRels {
    styles: Option<usize>,
    shared_strings: Option<usize>,
}

impl WorkbookRels {
    fn for_document(document: &Document) -> Self {
        let mut next = document.sheet_count() + 1;
        let mut take = |present: bool| {
            present.then(|| {
                next += 1;
                next - 1
            })
        };
        Self {
            styles: take(document.stylesheet.is_some()),
            shared_strings: take(document.shared_strings.is_some()),
        }
    }
}

pub(super) fn write_document<W: Write + Seek>(document: &Document, writer: W) -> XlsxResult<()> {
    let mut zip = zip::ZipWriter::new(writer);
    let sheets = document.sheets().unwrap_or(&[]);
    let rels = WorkbookRels::for_document(document);

    write_content_types(&mut zip, document)?;
    write_root_rels(&mut zip)?;
    write_workbook_xml(&mut zip, document)?;
    write_workbook_rels(&mut zip, sheets.len(), &rels)?;

    if let Some(stylesheet) = &document.stylesheet {
        write_part(&mut zip, "xl/styles.xml", &stylesheet.to_styles_xml())?;
    }
    if let Some(table) = &document.shared_strings {
        write_part(&mut zip, "xl/sharedStrings.xml", &shared_strings_xml(table))?;
    }

    for (i, entry) in sheets.iter().enumerate() {
        write_worksheet(&mut zip, i, entry)?;
    }

    zip.finish()?;
    log::debug!("wrote package with {} sheet(s)", sheets.len());
    Ok(())
}

fn write_part<W: Write + Seek>(
    zip: &mut zip::ZipWriter<W>,
    name: &str,
    content: &str,
) -> XlsxResult<()> {
    let options = zip::write::SimpleFileOptions::default();
    zip.start_file(name, options)?;
    zip.write_all(content.as_bytes())?;
    Ok(())
}

fn write_content_types<W: Write + Seek>(
    zip: &mut zip::ZipWriter<W>,
    document: &Document,
) -> XlsxResult<()> {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    );

    if document.stylesheet.is_some() {
        content.push_str(
            r#"
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );
    }
    if document.shared_strings.is_some() {
        content.push_str(
            r#"
    <Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
        );
    }

    // Add an override for each worksheet
    for i in 0..document.sheet_count() {
        content.push_str(&format!(
            r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            i + 1
        ));
    }

    content.push_str("\n</Types>");
    write_part(zip, "[Content_Types].xml", &content)
}

fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
    let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;
    write_part(zip, "_rels/.rels", content)
}

fn write_workbook_xml<W: Write + Seek>(
    zip: &mut zip::ZipWriter<W>,
    document: &Document,
) -> XlsxResult<()> {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );

    if let Some(sheets) = document.sheets() {
        content.push_str("\n    <sheets>");
        for (i, sheet) in sheets.iter().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape_xml(&sheet.name),
                sheet.sheet_id,
                i + 1
            ));
        }
        content.push_str("\n    </sheets>");
    }

    content.push_str("\n</workbook>");
    write_part(zip, "xl/workbook.xml", &content)
}

fn write_workbook_rels<W: Write + Seek>(
    zip: &mut zip::ZipWriter<W>,
    sheet_count: usize,
    rels: &WorkbookRels,
) -> XlsxResult<()> {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );

    for i in 0..sheet_count {
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i + 1,
            i + 1
        ));
    }

    if let Some(id) = rels.styles {
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            id
        ));
    }
    if let Some(id) = rels.shared_strings {
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
            id
        ));
    }

    content.push_str("\n</Relationships>");
    write_part(zip, "xl/_rels/workbook.xml.rels", &content)
}

fn shared_strings_xml(table: &SharedStringTable) -> String {
    let mut content = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">"#,
        table.len()
    );
    for s in table.iter() {
        content.push_str(&format!(
            "\n    <si><t xml:space=\"preserve\">{}</t></si>",
            escape_xml(s)
        ));
    }
    content.push_str("\n</sst>");
    content
}

fn cell_xml(cell: &RawCell) -> String {
    let mut xml = String::from("<c");
    if !cell.reference.is_empty() {
        xml.push_str(&format!(" r=\"{}\"", escape_xml(&cell.reference)));
    }
    if let Some(style) = cell.style.filter(|s| *s != 0) {
        xml.push_str(&format!(" s=\"{}\"", style));
    }
    if let Some(ty) = cell.cell_type {
        xml.push_str(&format!(" t=\"{}\"", ty.xlsx_tag()));
    }

    let formula = cell.formula.as_deref();
    let inline = cell
        .inline_text
        .as_deref()
        .filter(|_| cell.cell_type == Some(CellType::InlineString));

    if formula.is_none() && cell.value.is_none() && inline.is_none() {
        xml.push_str("/>");
        return xml;
    }

    xml.push('>');
    if let Some(f) = formula {
        xml.push_str(&format!("<f>{}</f>", escape_xml(f)));
    }
    if let Some(v) = &cell.value {
        xml.push_str(&format!("<v>{}</v>", escape_xml(v)));
    }
    if let Some(text) = inline {
        xml.push_str(&format!(
            "<is><t xml:space=\"preserve\">{}</t></is>",
            escape_xml(text)
        ));
    }
    xml.push_str("</c>");
    xml
}

fn worksheet_xml(worksheet: &Worksheet) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>"#,
    );

    for row in &worksheet.rows {
        let open = match row.index {
            Some(r) => format!("\n        <row r=\"{}\">", r),
            None => String::from("\n        <row>"),
        };
        content.push_str(&open);
        for cell in &row.cells {
            content.push_str("\n            ");
            content.push_str(&cell_xml(cell));
        }
        content.push_str("\n        </row>");
    }

    content.push_str("\n    </sheetData>\n</worksheet>");
    content
}

fn write_worksheet<W: Write + Seek>(
    zip: &mut zip::ZipWriter<W>,
    index: usize,
    entry: &SheetEntry,
) -> XlsxResult<()> {
    let empty = Worksheet::new();
    let worksheet = entry.worksheet.as_ref().unwrap_or(&empty);
    write_part(
        zip,
        &format!("xl/worksheets/sheet{}.xml", index + 1),
        &worksheet_xml(worksheet),
    )
}
