//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location split into column letters and row number
//! - [`CellType`] - The on-disk type tag of a cell
//! - [`RawCell`] - An undecoded `<c>` record
//! - [`SharedStringTable`] - The document's shared strings

mod address;
mod kind;
mod raw;
mod shared;

pub use address::{column_to_letters, parse_column, parse_row, CellAddress};
pub use kind::CellType;
pub use raw::RawCell;
pub use shared::SharedStringTable;
