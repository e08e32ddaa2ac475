//! Shared string table

use crate::error::{Error, Result};

/// The document-level list of deduplicated strings (`xl/sharedStrings.xml`).
///
/// Cells of type [`CellType::SharedString`](super::CellType::SharedString)
/// hold a zero-based index into this table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStringTable {
    strings: Vec<String>,
}

impl SharedStringTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Append a string, returning its index
    pub fn push<S: Into<String>>(&mut self, s: S) -> usize {
        self.strings.push(s.into());
        self.strings.len() - 1
    }

    /// Get the entry at `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    /// Resolve the raw `<v>` text of a shared-string cell.
    ///
    /// The text must be an integer index within bounds.
    pub fn resolve(&self, raw: &str) -> Result<&str> {
        let index: usize = raw
            .trim()
            .parse()
            .map_err(|_| Error::InvalidSharedStringIndex(raw.to_string()))?;
        self.get(index).ok_or(Error::SharedStringOutOfRange {
            index,
            count: self.strings.len(),
        })
    }

    /// Iterate over entries in index order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for SharedStringTable {
    fn from(strings: Vec<String>) -> Self {
        Self { strings }
    }
}

impl<S: Into<String>> FromIterator<S> for SharedStringTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            strings: iter.into_iter().map(Into::into).collect(),
        }
    }
}
