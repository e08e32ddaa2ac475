//! # cellbridge-core
//!
//! Cell value model and type coercion for the cellbridge spreadsheet bridge.
//!
//! This crate has no I/O. It provides:
//! - [`RawCell`], [`CellType`], [`SharedStringTable`] - cells as stored on disk
//! - [`decode`] / [`encode`] - conversion between raw cells and values
//! - [`parse_column`] / [`parse_row`] - splitting a reference such as `"C12"`
//! - [`parse_as`] / [`parse_optional`] - typed reads of decoded text
//! - [`Schema`] and [`Record`] - declared field lists for writing records
//!
//! ## Example
//!
//! ```rust
//! use cellbridge_core::{decode, CellType, RawCell, SharedStringTable};
//!
//! let strings: SharedStringTable = ["Hello"].into_iter().collect();
//! let cell = RawCell::new("B3")
//!     .with_type(CellType::SharedString)
//!     .with_value("0");
//!
//! assert_eq!(cell.column_name(), "B");
//! assert_eq!(cell.row_index().unwrap(), 3);
//! assert_eq!(decode(&cell, Some(&strings)).unwrap(), "Hello");
//! ```

pub mod cell;
pub mod codec;
pub mod date;
pub mod error;
pub mod record;
pub mod schema;
pub mod typed;
pub mod value;

// Re-exports for convenience
pub use cell::{parse_column, parse_row, CellAddress, CellType, RawCell, SharedStringTable};
pub use codec::{decode, encode, EncodedCell, DATE_STYLE_INDEX};
pub use error::{Error, Result};
pub use record::{DecodedCell, ExcelRecord};
pub use schema::{Field, Record, Schema};
pub use typed::{parse_as, parse_optional, FromCellText};
pub use value::FieldValue;
