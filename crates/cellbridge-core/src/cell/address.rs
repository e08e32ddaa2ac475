//! Cell address parsing ("C12" -> column "C", row 12)

use crate::error::{Error, Result};
use lazy_regex::regex_find;
use std::fmt;

/// Extract the column letters from a cell reference.
///
/// Returns the first run of ASCII letters found anywhere in `reference`, or an
/// empty string when there is none. Case is preserved.
///
/// ```
/// use cellbridge_core::cell::parse_column;
///
/// assert_eq!(parse_column("C12"), "C");
/// assert_eq!(parse_column("$ab$7"), "ab");
/// assert_eq!(parse_column(""), "");
/// ```
pub fn parse_column(reference: &str) -> &str {
    regex_find!(r"[A-Za-z]+", reference).unwrap_or("")
}

/// Extract the row number from a cell reference.
///
/// Takes the first run of digits found anywhere in `reference`. A reference
/// without digits (including the empty reference) is malformed.
///
/// ```
/// use cellbridge_core::cell::parse_row;
///
/// assert_eq!(parse_row("C12").unwrap(), 12);
/// assert!(parse_row("C").is_err());
/// ```
pub fn parse_row(reference: &str) -> Result<u32> {
    let digits = regex_find!(r"[0-9]+", reference).unwrap_or("");
    digits
        .parse::<u32>()
        .map_err(|_| Error::MalformedAddress(reference.to_string()))
}

/// A cell address split into its column letters and 1-based row number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAddress {
    /// Column letters, as written in the reference
    pub column: String,
    /// Row number (1-based)
    pub row: u32,
}

impl CellAddress {
    /// Create a new address
    pub fn new<S: Into<String>>(column: S, row: u32) -> Self {
        Self {
            column: column.into(),
            row,
        }
    }

    /// Create an address from 0-based column and row indices
    pub fn from_indices(col: usize, row: usize) -> Self {
        Self {
            column: column_to_letters(col),
            row: row as u32 + 1,
        }
    }

    /// Parse a reference such as `"AB123"`.
    ///
    /// The column part is permissive (empty when missing); a missing row
    /// number is an error.
    pub fn parse(reference: &str) -> Result<Self> {
        Ok(Self {
            column: parse_column(reference).to_string(),
            row: parse_row(reference)?,
        })
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

/// Convert a 0-based column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
pub fn column_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col + 1;

    while n > 0 {
        n -= 1;
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_simple_reference() {
        let addr = CellAddress::parse("C12").unwrap();
        assert_eq!(addr.column, "C");
        assert_eq!(addr.row, 12);
        assert_eq!(addr.to_string(), "C12");
    }

    #[test]
    fn test_parse_column_is_unanchored() {
        assert_eq!(parse_column("$XFD$1048576"), "XFD");
        assert_eq!(parse_column("12AB"), "AB");
        assert_eq!(parse_column("42"), "");
    }

    #[test]
    fn test_parse_column_preserves_case() {
        assert_eq!(parse_column("aB3"), "aB");
    }

    #[test]
    fn test_parse_row_takes_first_digit_run() {
        assert_eq!(parse_row("A1B2").unwrap(), 1);
        assert_eq!(parse_row("R0").unwrap(), 0);
    }

    #[test]
    fn test_parse_row_without_digits_fails() {
        let err = parse_row("ABC").unwrap_err();
        assert!(matches!(err, Error::MalformedAddress(ref s) if s == "ABC"));
        assert!(parse_row("").is_err());
        assert!(CellAddress::parse("").is_err());
    }

    #[test]
    fn test_parse_row_overflow_fails() {
        assert!(parse_row("A99999999999").is_err());
    }

    #[test]
    fn test_column_to_letters() {
        assert_eq!(column_to_letters(0), "A");
        assert_eq!(column_to_letters(25), "Z");
        assert_eq!(column_to_letters(26), "AA");
        assert_eq!(column_to_letters(701), "ZZ");
        assert_eq!(column_to_letters(702), "AAA");
        assert_eq!(CellAddress::from_indices(27, 0).to_string(), "AB1");
    }

    proptest! {
        #[test]
        fn prop_reference_splits_into_letters_and_digits(
            letters in "[A-Za-z]{1,3}",
            row in 1u32..=1_048_576,
        ) {
            let reference = format!("{letters}{row}");
            prop_assert_eq!(parse_column(&reference), letters.as_str());
            prop_assert_eq!(parse_row(&reference).unwrap(), row);
        }
    }
}
