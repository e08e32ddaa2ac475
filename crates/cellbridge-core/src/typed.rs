//! Conversion of decoded cell text into typed scalars

use crate::date::serial_to_datetime;
use crate::error::{Error, Result};
use chrono::NaiveDateTime;

/// Types that can be read from a cell's raw numeric text
pub trait FromCellText: Sized {
    /// Name used in format errors
    const TYPE_NAME: &'static str;

    /// Parse `input`
    fn from_cell_text(input: &str) -> Result<Self>;
}

fn parse_number(input: &str, target: &'static str) -> Result<f64> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::format(input, target))
}

impl FromCellText for NaiveDateTime {
    const TYPE_NAME: &'static str = "DateTime";

    /// Interpret `input` as a serial date
    fn from_cell_text(input: &str) -> Result<Self> {
        serial_to_datetime(parse_number(input, Self::TYPE_NAME)?)
    }
}

impl FromCellText for i32 {
    const TYPE_NAME: &'static str = "Int32";

    /// Accept any number with a zero fractional part, e.g. `"30"` or `"30.0"`
    fn from_cell_text(input: &str) -> Result<Self> {
        let n = parse_number(input, Self::TYPE_NAME)?;
        if n.fract() != 0.0 || n < i32::MIN as f64 || n > i32::MAX as f64 {
            return Err(Error::format(input, Self::TYPE_NAME));
        }
        Ok(n as i32)
    }
}

/// Parse decoded cell text as `T`.
///
/// ```
/// use cellbridge_core::parse_as;
/// use chrono::NaiveDateTime;
///
/// assert_eq!(parse_as::<i32>("30").unwrap(), 30);
/// let dt: NaiveDateTime = parse_as("44927").unwrap();
/// assert_eq!(dt.to_string(), "2023-01-01 00:00:00");
/// ```
pub fn parse_as<T: FromCellText>(input: &str) -> Result<T> {
    T::from_cell_text(input)
}

/// Like [`parse_as`], but empty input yields `None`
pub fn parse_optional<T: FromCellText>(input: &str) -> Result<Option<T>> {
    if input.is_empty() {
        return Ok(None);
    }
    parse_as(input).map(Some)
}
