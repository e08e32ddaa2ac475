//! Raw cell records as they appear in a worksheet part

use super::address::{parse_column, parse_row, CellAddress};
use super::kind::CellType;
use crate::error::Result;

/// One `<c>` element of a worksheet, before any decoding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCell {
    /// The `r` attribute (empty when the cell has none)
    pub reference: String,
    /// The `t` attribute, `None` when absent or unrecognised
    pub cell_type: Option<CellType>,
    /// Text of `<v>`
    pub value: Option<String>,
    /// Text of `<f>`
    pub formula: Option<String>,
    /// Concatenated text of `<is>`
    pub inline_text: Option<String>,
    /// The `s` attribute
    pub style: Option<u32>,
}

impl RawCell {
    /// Create a cell with a reference and no content
    pub fn new<S: Into<String>>(reference: S) -> Self {
        Self {
            reference: reference.into(),
            ..Default::default()
        }
    }

    /// Set the cell type
    pub fn with_type(mut self, cell_type: CellType) -> Self {
        self.cell_type = Some(cell_type);
        self
    }

    /// Set the `<v>` text
    pub fn with_value<S: Into<String>>(mut self, value: S) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the formula text
    pub fn with_formula<S: Into<String>>(mut self, formula: S) -> Self {
        self.formula = Some(formula.into());
        self
    }

    /// Set the inline string text
    pub fn with_inline_text<S: Into<String>>(mut self, text: S) -> Self {
        self.inline_text = Some(text.into());
        self
    }

    /// Set the style index
    pub fn with_style(mut self, style: u32) -> Self {
        self.style = Some(style);
        self
    }

    /// Column letters of the reference (empty if it has none)
    pub fn column_name(&self) -> &str {
        parse_column(&self.reference)
    }

    /// Row number of the reference
    pub fn row_index(&self) -> Result<u32> {
        parse_row(&self.reference)
    }

    /// Parsed address
    pub fn address(&self) -> Result<CellAddress> {
        CellAddress::parse(&self.reference)
    }

    /// Formula text, or empty
    pub fn formula_text(&self) -> &str {
        self.formula.as_deref().unwrap_or("")
    }

    /// `<v>` text, or empty
    pub fn value_text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}
