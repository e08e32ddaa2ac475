//! Package fixtures built from literal XML parts.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
</Types>"#;

pub const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

/// Zip the given `(path, xml)` parts into package bytes.
pub fn package(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, xml) in parts {
        zip.start_file(*name, options).expect("start part");
        zip.write_all(xml.as_bytes()).expect("write part");
    }
    zip.finish().expect("finish package").into_inner()
}

/// `workbook.xml` declaring the given `(name, relationship id)` sheets.
pub fn workbook_xml(sheets: &[(&str, &str)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    for (i, (name, rid)) in sheets.iter().enumerate() {
        xml.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="{}"/>"#,
            name,
            i + 1,
            rid
        ));
    }
    xml.push_str("</sheets></workbook>");
    xml
}

/// `workbook.xml.rels` mapping `(relationship id, target)` pairs.
pub fn workbook_rels(targets: &[(&str, &str)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (rid, target) in targets {
        let kind = if target.starts_with("worksheets/") {
            "worksheet"
        } else if *target == "sharedStrings.xml" {
            "sharedStrings"
        } else {
            "styles"
        };
        xml.push_str(&format!(
            r#"<Relationship Id="{rid}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/{kind}" Target="{target}"/>"#
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// A worksheet part wrapping the given `<row>` markup.
pub fn worksheet_xml(rows: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{rows}</sheetData></worksheet>"#
    )
}

/// A shared string table holding the given plain strings.
pub fn shared_strings_xml(strings: &[&str]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">"#,
        strings.len()
    );
    for s in strings {
        xml.push_str(&format!("<si><t>{s}</t></si>"));
    }
    xml.push_str("</sst>");
    xml
}

/// A single-sheet package with an optional shared string table.
pub fn single_sheet(rows: &str, shared: Option<&[&str]>) -> Vec<u8> {
    let workbook = workbook_xml(&[("Sheet1", "rId1")]);
    let mut targets = vec![("rId1", "worksheets/sheet1.xml")];
    if shared.is_some() {
        targets.push(("rId2", "sharedStrings.xml"));
    }
    let rels = workbook_rels(&targets);
    let sheet = worksheet_xml(rows);
    let sst = shared.map(shared_strings_xml);

    let mut parts = vec![
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", rels.as_str()),
        ("xl/worksheets/sheet1.xml", sheet.as_str()),
    ];
    if let Some(sst) = &sst {
        parts.push(("xl/sharedStrings.xml", sst.as_str()));
    }
    package(&parts)
}
