//! Cell value codec
//!
//! [`decode`] turns a raw `<c>` record into its display text; [`encode`] turns a
//! record field into the value text, type tag and style of a new cell.

use crate::cell::{CellType, RawCell, SharedStringTable};
use crate::date;
use crate::error::{Error, Result};
use crate::value::FieldValue;

/// Style index of the date format registered by writers
pub const DATE_STYLE_INDEX: u32 = 1;

/// Decode a raw cell into its display text.
///
/// - `Date`: the serial number rendered as `YYYY-MM-DD HH:MM:SS`
/// - `SharedString`: the referenced table entry
/// - `Boolean`: `"0"` is `FALSE`, anything else is `TRUE`
/// - `InlineString`: the text inside `<is>`
/// - everything else: the `<v>` text verbatim (empty when absent)
///
/// ```
/// use cellbridge_core::{decode, CellType, RawCell};
///
/// let cell = RawCell::new("A1").with_type(CellType::Boolean).with_value("0");
/// assert_eq!(decode(&cell, None).unwrap(), "FALSE");
/// ```
pub fn decode(cell: &RawCell, shared_strings: Option<&SharedStringTable>) -> Result<String> {
    let raw = cell.value_text();

    match cell.cell_type {
        Some(CellType::Date) => date::format_serial(raw),
        Some(CellType::SharedString) => {
            let table = shared_strings
                .ok_or_else(|| Error::MissingSharedStrings(cell.reference.clone()))?;
            table.resolve(raw).map(str::to_string)
        }
        Some(CellType::Boolean) => Ok(if raw == "0" { "FALSE" } else { "TRUE" }.to_string()),
        Some(CellType::InlineString) => Ok(cell.inline_text.clone().unwrap_or_default()),
        _ => Ok(raw.to_string()),
    }
}

/// The on-disk form of an encoded value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodedCell {
    /// Type tag, `None` for null values
    pub cell_type: Option<CellType>,
    /// `<v>` text, `None` for null values
    pub value: Option<String>,
    /// Style index (only set for dates)
    pub style: Option<u32>,
}

impl EncodedCell {
    fn typed(cell_type: CellType, value: String) -> Self {
        Self {
            cell_type: Some(cell_type),
            value: Some(value),
            style: None,
        }
    }

    /// Attach the value to a cell reference
    pub fn into_raw_cell<S: Into<String>>(self, reference: S) -> RawCell {
        RawCell {
            reference: reference.into(),
            cell_type: self.cell_type,
            value: self.value,
            style: self.style,
            ..Default::default()
        }
    }
}

/// Encode a field value for writing.
///
/// Dates become serial numbers with type `Date` and the date style, booleans
/// `1`/`0`, numbers their decimal text, strings and other values their text.
/// Non-finite doubles (`NaN`, `inf`) have no numeric cell form and are written
/// as strings. Null produces an empty cell.
///
/// ```
/// use cellbridge_core::{encode, CellType, FieldValue};
///
/// let cell = encode(&FieldValue::Boolean(true));
/// assert_eq!(cell.cell_type, Some(CellType::Boolean));
/// assert_eq!(cell.value.as_deref(), Some("1"));
/// ```
pub fn encode(value: &FieldValue) -> EncodedCell {
    match value {
        FieldValue::DateTime(dt) => EncodedCell {
            style: Some(DATE_STYLE_INDEX),
            ..EncodedCell::typed(CellType::Date, date::datetime_to_serial(*dt).to_string())
        },
        FieldValue::DateTimeOffset(dt) => EncodedCell {
            style: Some(DATE_STYLE_INDEX),
            ..EncodedCell::typed(
                CellType::Date,
                date::offset_datetime_to_serial(dt).to_string(),
            )
        },
        FieldValue::Boolean(b) => {
            EncodedCell::typed(CellType::Boolean, if *b { "1" } else { "0" }.to_string())
        }
        FieldValue::Double(n) if !n.is_finite() => {
            EncodedCell::typed(CellType::String, n.to_string())
        }
        FieldValue::Double(n) => EncodedCell::typed(CellType::Number, n.to_string()),
        FieldValue::Decimal(d) => EncodedCell::typed(CellType::Number, d.to_string()),
        FieldValue::Int(i) => EncodedCell::typed(CellType::Number, i.to_string()),
        FieldValue::String(s) => EncodedCell::typed(CellType::String, s.clone()),
        FieldValue::Null => EncodedCell::default(),
        FieldValue::Other(s) => EncodedCell::typed(CellType::String, s.clone()),
    }
}
