//! Runtime field values handed to the encoder

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// A record field's value, tagged by kind.
///
/// Writers build one of these per field before handing it to
/// [`encode`](crate::codec::encode).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Calendar date-time without an offset
    DateTime(NaiveDateTime),
    /// Date-time with a UTC offset
    DateTimeOffset(DateTime<FixedOffset>),
    /// Boolean
    Boolean(bool),
    /// Floating point number
    Double(f64),
    /// Fixed-point decimal
    Decimal(Decimal),
    /// Integer
    Int(i64),
    /// Text
    String(String),
    /// No value
    Null,
    /// Any other value, already rendered with its `Display` impl
    Other(String),
}

impl FieldValue {
    /// Wrap a value of an unsupported kind by its display rendering
    pub fn other<T: fmt::Display>(value: T) -> Self {
        FieldValue::Other(value.to_string())
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Get the kind name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::DateTime(_) => "datetime",
            FieldValue::DateTimeOffset(_) => "datetime_offset",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Double(_) => "double",
            FieldValue::Decimal(_) => "decimal",
            FieldValue::Int(_) => "int",
            FieldValue::String(_) => "string",
            FieldValue::Null => "null",
            FieldValue::Other(_) => "other",
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Null
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(v: NaiveDateTime) -> Self {
        FieldValue::DateTime(v)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        FieldValue::DateTime(v.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(v: DateTime<FixedOffset>) -> Self {
        FieldValue::DateTimeOffset(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::DateTimeOffset(v.fixed_offset())
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Boolean(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Double(v)
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::Double(v as f64)
    }
}

impl From<Decimal> for FieldValue {
    fn from(v: Decimal) -> Self {
        FieldValue::Decimal(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldValue {
                fn from(v: $t) -> Self {
                    FieldValue::Int(v as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::String(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(v: &String) -> Self {
        FieldValue::String(v.clone())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}
