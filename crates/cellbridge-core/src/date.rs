//! Serial date arithmetic (1900 date system)
//!
//! Spreadsheets store dates as a floating-point day count. Day 0 is
//! 1899-12-30, so serial 1 is 1899-12-31 and serial 61 is 1900-03-01.
//! Spreadsheet applications count a non-existent 1900-02-29 as serial 60, so
//! serials 1 to 59 decode here one day before the date they display, and
//! serial 60 decodes to 1900-02-28. From serial 61 on both agree.
//!
//! The fractional part is the time of day. For negative serials the fraction
//! still counts forward from the start of the (earlier) integral day, so
//! `-1.25` is 1899-12-29 06:00.

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Smallest serial accepted (exclusive): 0100-01-01
const MIN_SERIAL: f64 = -657_435.0;

/// Largest serial accepted (exclusive): 10000-01-01
const MAX_SERIAL: f64 = 2_958_466.0;

/// Format used when rendering decoded date cells
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Convert a serial day count to a calendar date-time
pub fn serial_to_datetime(serial: f64) -> Result<NaiveDateTime> {
    if !(serial > MIN_SERIAL && serial < MAX_SERIAL) {
        return Err(Error::SerialDateOutOfRange(serial));
    }

    let rounding = if serial >= 0.0 { 0.5 } else { -0.5 };
    let mut millis = (serial * MILLIS_PER_DAY as f64 + rounding) as i64;
    if millis < 0 {
        millis -= (millis % MILLIS_PER_DAY) * 2;
    }

    epoch()
        .and_then(|base| base.checked_add_signed(Duration::milliseconds(millis)))
        .ok_or(Error::SerialDateOutOfRange(serial))
}

/// Convert a calendar date-time to a serial day count
pub fn datetime_to_serial(dt: NaiveDateTime) -> f64 {
    let Some(base) = epoch() else {
        return 0.0;
    };

    let mut millis = (dt - base).num_milliseconds();
    if millis < 0 {
        let frac = millis % MILLIS_PER_DAY;
        if frac != 0 {
            millis -= (MILLIS_PER_DAY + frac) * 2;
        }
    }
    millis as f64 / MILLIS_PER_DAY as f64
}

/// Serial day count of an instant, taken in UTC
pub fn offset_datetime_to_serial(dt: &DateTime<FixedOffset>) -> f64 {
    datetime_to_serial(dt.naive_utc())
}

/// Parse serial text and render it as `YYYY-MM-DD HH:MM:SS`
pub fn format_serial(text: &str) -> Result<String> {
    let serial: f64 = text
        .trim()
        .parse()
        .map_err(|_| Error::InvalidSerialDate(text.to_string()))?;
    Ok(serial_to_datetime(serial)?
        .format(DATE_TIME_FORMAT)
        .to_string())
}
