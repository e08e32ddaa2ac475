//! Prelude module - common imports for cellbridge users
//!
//! ```rust
//! use cellbridge::prelude::*;
//! ```

pub use crate::{
    // Reading
    Document,
    SheetReader,
    DecodedCell,
    ExcelRecord,
    parse_as,
    parse_optional,

    // Writing
    FieldValue,
    Record,
    Schema,
    WorkbookWriter,
    WriteOptions,

    // Error types
    Error,
    Result,
    XlsxError,
    XlsxResult,
};
