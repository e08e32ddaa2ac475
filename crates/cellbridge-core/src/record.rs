//! Decoded, caller-facing cell records

/// One decoded cell of a single-sheet read: column letters and display text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedCell {
    /// Column letters of the cell reference
    pub column: String,
    /// Decoded display text
    pub value: String,
}

impl DecodedCell {
    /// Create a new decoded cell
    pub fn new<C: Into<String>, V: Into<String>>(column: C, value: V) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// One decoded cell of a multi-sheet read, fully qualified
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExcelRecord {
    /// Name of the sheet the cell came from
    pub sheet: String,
    /// Column letters
    pub column: String,
    /// Row number (1-based)
    pub row: u32,
    /// Formula text, empty when the cell has none
    pub formula: String,
    /// Decoded display text
    pub value: String,
}
