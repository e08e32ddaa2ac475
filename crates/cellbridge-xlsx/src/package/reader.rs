//! Package parsing: ZIP container and XML parts into a [`Document`] tree

use std::io::{BufReader, Read, Seek};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::{Document, Row, SheetEntry, Worksheet};
use crate::error::{XlsxError, XlsxResult};
use crate::styles::{read_styles_xml, Stylesheet};
use cellbridge_core::{CellType, RawCell, SharedStringTable};

const DEFAULT_WORKBOOK_PATH: &str = "xl/workbook.xml";

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// `_x000d_` is CR, `_x000a_` LF, `_x005f_` an escaped underscore. Anything
/// that is not exactly `_x` + four hex digits + `_` is kept as-is.
fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push('_');
                rest = &candidate[1..];
            }
        }
    }
    result.push_str(rest);

    result
}

#[derive(Debug)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

#[derive(Debug)]
struct SheetDef {
    name: String,
    sheet_id: u32,
    r_id: Option<String>,
}

/// Which text node of a cell is being collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellText {
    Value,
    Formula,
    Inline,
}

pub(super) fn read_document<R: Read + Seek>(reader: R) -> XlsxResult<Document> {
    let mut archive = zip::ZipArchive::new(reader)?;

    // Verify this is an OPC package
    if archive.by_name("[Content_Types].xml").is_err() {
        return Err(XlsxError::InvalidFormat(
            "Missing [Content_Types].xml".into(),
        ));
    }

    let workbook_path = find_workbook_path(&mut archive)?;
    let base_dir = parent_dir(&workbook_path);
    let rels = read_relationships(&mut archive, &rels_path_for(&workbook_path))?;

    let part_path = |rel_suffix: &str, fallback: &str| -> String {
        rels.iter()
            .find(|r| r.rel_type.ends_with(rel_suffix))
            .map(|r| resolve_target(base_dir, &r.target))
            .unwrap_or_else(|| format!("{}{}", base_dir, fallback))
    };

    let shared_strings_path = part_path("/sharedStrings", "sharedStrings.xml");
    let shared_strings = read_shared_strings(&mut archive, &shared_strings_path)?;
    let stylesheet = read_stylesheet(&mut archive, &part_path("/styles", "styles.xml"))?;

    let sheets = match read_workbook_xml(&mut archive, &workbook_path)? {
        Some(defs) => {
            log::debug!("workbook lists {} sheet(s)", defs.len());
            let mut sheets = Vec::with_capacity(defs.len());
            for def in defs {
                let worksheet = match def.r_id.as_deref().filter(|id| !id.is_empty()) {
                    Some(r_id) => {
                        read_linked_worksheet(&mut archive, &rels, base_dir, r_id, &def.name)?
                    }
                    None => {
                        log::debug!("sheet '{}' has no relationship id", def.name);
                        None
                    }
                };
                sheets.push(SheetEntry {
                    name: def.name,
                    sheet_id: def.sheet_id,
                    worksheet,
                });
            }
            Some(sheets)
        }
        None => {
            log::debug!("workbook has no <sheets> element");
            None
        }
    };

    Ok(Document {
        sheets,
        shared_strings,
        stylesheet,
    })
}

fn read_linked_worksheet<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    rels: &[Relationship],
    base_dir: &str,
    r_id: &str,
    sheet_name: &str,
) -> XlsxResult<Option<Worksheet>> {
    let Some(rel) = rels
        .iter()
        .find(|r| r.id == r_id && r.rel_type.ends_with("/worksheet"))
    else {
        log::warn!(
            "sheet '{}' links to unknown worksheet relationship {}",
            sheet_name,
            r_id
        );
        return Ok(None);
    };

    let path = resolve_target(base_dir, &rel.target);
    if archive.by_name(&path).is_err() {
        log::warn!("worksheet part {} for sheet '{}' is missing", path, sheet_name);
        return Ok(None);
    }
    read_worksheet(archive, &path).map(Some)
}

/// Locate the workbook part through `_rels/.rels`
fn find_workbook_path<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<String> {
    let rels = read_relationships(archive, "_rels/.rels")?;
    let path = rels
        .iter()
        .find(|r| r.rel_type.ends_with("/officeDocument"))
        .map(|r| resolve_target("", &r.target))
        .unwrap_or_else(|| DEFAULT_WORKBOOK_PATH.to_string());

    if archive.by_name(&path).is_err() {
        return Err(XlsxError::MissingPart(path));
    }
    Ok(path)
}

fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..=idx],
        None => "",
    }
}

fn rels_path_for(part: &str) -> String {
    let dir = parent_dir(part);
    format!("{}_rels/{}.rels", dir, &part[dir.len()..])
}

/// Resolve a relationship target against the directory of its source part
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

fn attr_string(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|s| s.to_string()))
}

/// Read a `.rels` part; a missing part has no relationships
fn read_relationships<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    path: &str,
) -> XlsxResult<Vec<Relationship>> {
    let file = match archive.by_name(path) {
        Ok(f) => f,
        Err(_) => {
            log::debug!("no relationship part at {}", path);
            return Ok(Vec::new());
        }
    };

    let mut xml_reader = Reader::from_reader(BufReader::new(file));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut rels = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                if let (Some(id), Some(rel_type), Some(target)) = (
                    attr_string(&e, b"Id"),
                    attr_string(&e, b"Type"),
                    attr_string(&e, b"Target"),
                ) {
                    rels.push(Relationship {
                        id,
                        rel_type,
                        target,
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Read the sheet list of the workbook part.
///
/// Returns `None` when the workbook has no `<sheets>` element.
fn read_workbook_xml<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    path: &str,
) -> XlsxResult<Option<Vec<SheetDef>>> {
    let file = archive
        .by_name(path)
        .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

    let mut xml_reader = Reader::from_reader(BufReader::new(file));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut sheets: Option<Vec<SheetDef>> = None;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"sheets" => {
                    sheets.get_or_insert_with(Vec::new);
                }
                b"sheet" => {
                    let mut def = SheetDef {
                        name: String::new(),
                        sheet_id: 0,
                        r_id: None,
                    };
                    for attr in e.attributes().flatten() {
                        let value = attr.unescape_value().ok().map(|s| s.to_string());
                        match attr.key.as_ref() {
                            b"name" => def.name = value.unwrap_or_default(),
                            b"sheetId" => {
                                def.sheet_id =
                                    value.and_then(|v| v.parse().ok()).unwrap_or_default()
                            }
                            // Relationship id, usually prefixed `r:`
                            _ if attr.key.local_name().as_ref() == b"id"
                                && attr.key.prefix().is_some() =>
                            {
                                def.r_id = value;
                            }
                            _ => {}
                        }
                    }
                    sheets.get_or_insert_with(Vec::new).push(def);
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Read the shared string table, `None` when the package has none
fn read_shared_strings<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    path: &str,
) -> XlsxResult<Option<SharedStringTable>> {
    let file = match archive.by_name(path) {
        Ok(f) => f,
        Err(_) => return Ok(None),
    };

    // Whitespace inside <t> is significant, so text is not trimmed
    let mut xml_reader = Reader::from_reader(BufReader::new(file));

    let mut buf = Vec::new();
    let mut table = SharedStringTable::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_t = false;
    let mut in_phonetic = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"rPh" if in_si => in_phonetic = true,
                b"t" if in_si && !in_phonetic => in_t = true,
                _ => {}
            },
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                table.push(String::new());
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"si" => {
                    table.push(decode_excel_escapes(&current));
                    in_si = false;
                }
                b"rPh" => in_phonetic = false,
                b"t" => in_t = false,
                _ => {}
            },
            Ok(Event::Text(e)) if in_t => {
                current.push_str(&e.unescape()?);
            }
            Ok(Event::CData(e)) if in_t => {
                current.push_str(&String::from_utf8_lossy(&e));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    log::debug!("read {} shared string(s) from {}", table.len(), path);
    Ok(Some(table))
}

fn read_stylesheet<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    path: &str,
) -> XlsxResult<Option<Stylesheet>> {
    match archive.by_name(path) {
        Ok(file) => read_styles_xml(file).map(Some),
        Err(_) => Ok(None),
    }
}

/// Build a raw cell from the attributes of a `<c>` element
fn cell_from_attrs(e: &BytesStart) -> RawCell {
    let mut cell = RawCell::default();

    for attr in e.attributes().flatten() {
        let Ok(value) = attr.unescape_value() else {
            continue;
        };
        match attr.key.as_ref() {
            b"r" => cell.reference = value.to_string(),
            b"t" => {
                cell.cell_type = CellType::from_xlsx(&value);
                if cell.cell_type.is_none() {
                    log::debug!("unknown cell type '{}', decoding verbatim", value);
                }
            }
            b"s" => cell.style = value.parse().ok(),
            _ => {}
        }
    }

    cell
}

fn row_from_attrs(e: &BytesStart) -> Row {
    Row {
        index: attr_string(e, b"r").and_then(|r| r.parse().ok()),
        cells: Vec::new(),
    }
}

fn push_text(cell: &mut RawCell, target: CellText, text: &str) {
    let slot = match target {
        CellText::Value => &mut cell.value,
        CellText::Formula => &mut cell.formula,
        CellText::Inline => &mut cell.inline_text,
    };
    slot.get_or_insert_with(String::new).push_str(text);
}

/// Read the rows of a worksheet part
fn read_worksheet<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    path: &str,
) -> XlsxResult<Worksheet> {
    let file = archive
        .by_name(path)
        .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

    let mut xml_reader = Reader::from_reader(BufReader::new(file));

    let mut buf = Vec::new();
    let mut worksheet = Worksheet::new();

    // Current row/cell state
    let mut current_row: Option<Row> = None;
    let mut current_cell: Option<RawCell> = None;
    let mut text_target: Option<CellText> = None;
    let mut in_inline_str = false;
    let mut in_phonetic = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"row" => current_row = Some(row_from_attrs(&e)),
                b"c" if current_row.is_some() => current_cell = Some(cell_from_attrs(&e)),
                b"v" if current_cell.is_some() => text_target = Some(CellText::Value),
                b"f" if current_cell.is_some() => text_target = Some(CellText::Formula),
                b"is" => {
                    if let Some(cell) = current_cell.as_mut() {
                        in_inline_str = true;
                        cell.inline_text.get_or_insert_with(String::new);
                    }
                }
                b"rPh" if in_inline_str => in_phonetic = true,
                b"t" if in_inline_str && !in_phonetic => text_target = Some(CellText::Inline),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"row" => worksheet.push(row_from_attrs(&e)),
                b"c" => {
                    if let Some(row) = current_row.as_mut() {
                        row.push(cell_from_attrs(&e));
                    }
                }
                b"v" => {
                    if let Some(cell) = current_cell.as_mut() {
                        push_text(cell, CellText::Value, "");
                    }
                }
                b"f" => {
                    if let Some(cell) = current_cell.as_mut() {
                        push_text(cell, CellText::Formula, "");
                    }
                }
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"row" => {
                    if let Some(row) = current_row.take() {
                        worksheet.push(row);
                    }
                }
                b"c" => {
                    if let (Some(mut cell), Some(row)) = (current_cell.take(), current_row.as_mut())
                    {
                        if let Some(text) = cell.inline_text.take() {
                            cell.inline_text = Some(decode_excel_escapes(&text));
                        }
                        row.push(cell);
                    }
                    text_target = None;
                    in_inline_str = false;
                }
                b"v" | b"f" => text_target = None,
                b"t" if text_target == Some(CellText::Inline) => text_target = None,
                b"rPh" => in_phonetic = false,
                b"is" => in_inline_str = false,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if let (Some(target), Some(cell)) = (text_target, current_cell.as_mut()) {
                    push_text(cell, target, &e.unescape()?);
                }
            }
            Ok(Event::CData(e)) => {
                if let (Some(target), Some(cell)) = (text_target, current_cell.as_mut()) {
                    push_text(cell, target, &String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    log::debug!("read {} row(s) from {}", worksheet.rows.len(), path);
    Ok(worksheet)
}
