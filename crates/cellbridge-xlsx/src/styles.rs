//! XLSX styles (styles.xml) read/write helpers
//!
//! Only the cell format table (`cellXfs`) is modelled: enough to tag date
//! cells with a number format.

use std::io::{BufReader, Read};

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};

/// Built-in number format for short dates (`m/d/yyyy`)
pub const BUILTIN_DATE_FORMAT: u32 = 14;

/// One entry of `cellXfs`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellFormat {
    /// Number format id (0 = General)
    pub num_fmt_id: u32,
    /// Whether the number format is applied
    pub apply_number_format: bool,
}

impl CellFormat {
    /// A format applying the given number format
    pub fn number_format(num_fmt_id: u32) -> Self {
        Self {
            num_fmt_id,
            apply_number_format: true,
        }
    }
}

/// The cell format table of a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    cell_formats: Vec<CellFormat>,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self {
            cell_formats: vec![CellFormat::default()],
        }
    }
}

impl Stylesheet {
    /// The default format plus one date format at index 1
    pub fn with_date_format(num_fmt_id: u32) -> Self {
        Self {
            cell_formats: vec![CellFormat::default(), CellFormat::number_format(num_fmt_id)],
        }
    }

    /// Cell formats; index 0 is the default
    pub fn cell_formats(&self) -> &[CellFormat] {
        &self.cell_formats
    }

    /// Register a format, returning its style index
    pub fn push(&mut self, format: CellFormat) -> u32 {
        self.cell_formats.push(format);
        self.cell_formats.len() as u32 - 1
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <fonts count="1">
    <font><sz val="11"/><name val="Calibri"/><family val="2"/></font>
  </fonts>
  <fills count="2">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
  </fills>
  <borders count="1">
    <border><left/><right/><top/><bottom/><diagonal/></border>
  </borders>
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        xml.push_str(&format!(
            "\n  <cellXfs count=\"{}\">",
            self.cell_formats.len()
        ));
        for format in &self.cell_formats {
            let apply = if format.apply_number_format {
                " applyNumberFormat=\"1\""
            } else {
                ""
            };
            xml.push_str(&format!(
                "\n    <xf numFmtId=\"{}\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"{}/>",
                format.num_fmt_id, apply
            ));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
</styleSheet>"#,
        );
        xml
    }
}

/// Read the `cellXfs` table of a styles part
pub(crate) fn read_styles_xml<R: Read>(reader: R) -> XlsxResult<Stylesheet> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut cell_formats = Vec::new();
    let mut in_cell_xfs = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"cellXfs" => in_cell_xfs = true,
            Ok(Event::End(e)) if e.local_name().as_ref() == b"cellXfs" => in_cell_xfs = false,
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if in_cell_xfs && e.local_name().as_ref() == b"xf" =>
            {
                let mut format = CellFormat::default();
                for attr in e.attributes().flatten() {
                    let Ok(value) = attr.unescape_value() else {
                        continue;
                    };
                    match attr.key.as_ref() {
                        b"numFmtId" => format.num_fmt_id = value.parse().unwrap_or(0),
                        b"applyNumberFormat" => {
                            format.apply_number_format = value == "1" || value == "true"
                        }
                        _ => {}
                    }
                }
                cell_formats.push(format);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if cell_formats.is_empty() {
        return Ok(Stylesheet::default());
    }
    Ok(Stylesheet { cell_formats })
}
