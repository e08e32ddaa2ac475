//! Cell data type tags

use std::fmt;

/// The data type of a cell, as stored in the `t` attribute of `<c>`.
///
/// A cell without a `t` attribute is a number. Formula text is independent of
/// the type and may accompany any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellType {
    /// Numeric value (`n`, or no tag at all)
    #[default]
    Number,
    /// Formula string result (`str`)
    String,
    /// Index into the shared string table (`s`)
    SharedString,
    /// `0` / `1` (`b`)
    Boolean,
    /// Date value (`d`)
    Date,
    /// Rich text embedded in the cell (`inlineStr`)
    InlineString,
    /// Error literal such as `#N/A` (`e`)
    Error,
}

impl CellType {
    /// Parse from an XLSX type tag
    pub fn from_xlsx(tag: &str) -> Option<Self> {
        match tag {
            "n" => Some(CellType::Number),
            "str" => Some(CellType::String),
            "s" => Some(CellType::SharedString),
            "b" => Some(CellType::Boolean),
            "d" => Some(CellType::Date),
            "inlineStr" => Some(CellType::InlineString),
            "e" => Some(CellType::Error),
            _ => None,
        }
    }

    /// Get the XLSX type tag
    pub fn xlsx_tag(&self) -> &'static str {
        match self {
            CellType::Number => "n",
            CellType::String => "str",
            CellType::SharedString => "s",
            CellType::Boolean => "b",
            CellType::Date => "d",
            CellType::InlineString => "inlineStr",
            CellType::Error => "e",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xlsx_tag())
    }
}
