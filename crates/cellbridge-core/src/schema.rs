//! Declared field lists for record types
//!
//! A [`Schema`] names a record type and lists its fields in column order, each
//! with an accessor producing a [`FieldValue`]. Writers use it in place of
//! runtime type inspection.
//!
//! ```
//! use cellbridge_core::{FieldValue, Record, Schema};
//!
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! impl Record for Person {
//!     fn schema() -> Schema<Self> {
//!         Schema::new("Person")
//!             .field("Name", |p: &Person| p.name.clone())
//!             .field("Age", |p: &Person| p.age)
//!     }
//! }
//!
//! let schema = Person::schema();
//! let alice = Person { name: "Alice".into(), age: 30 };
//! assert_eq!(schema.header().collect::<Vec<_>>(), ["Name", "Age"]);
//! assert_eq!(schema.values(&alice).unwrap()[1], FieldValue::Int(30));
//! ```

use crate::error::{Error, Result};
use crate::value::FieldValue;
use std::fmt;

type Accessor<T> = Box<dyn Fn(&T) -> std::result::Result<FieldValue, String>>;

/// A named field and its accessor
pub struct Field<T> {
    name: String,
    accessor: Accessor<T>,
}

impl<T> Field<T> {
    /// Field name (used as the column header)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read this field from `item`
    pub fn get(&self, item: &T) -> Result<FieldValue> {
        (self.accessor)(item).map_err(|message| Error::FieldAccess {
            field: self.name.clone(),
            message,
        })
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("name", &self.name).finish()
    }
}

/// The ordered field list of a record type
#[derive(Debug)]
pub struct Schema<T> {
    name: String,
    fields: Vec<Field<T>>,
}

impl<T> Schema<T> {
    /// Create an empty schema named `name`
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field whose accessor cannot fail
    pub fn field<V, F>(mut self, name: &str, accessor: F) -> Self
    where
        V: Into<FieldValue>,
        F: Fn(&T) -> V + 'static,
    {
        self.fields.push(Field {
            name: name.to_string(),
            accessor: Box::new(move |item| Ok(accessor(item).into())),
        });
        self
    }

    /// Add a field whose accessor may fail
    pub fn try_field<V, E, F>(mut self, name: &str, accessor: F) -> Self
    where
        V: Into<FieldValue>,
        E: fmt::Display,
        F: Fn(&T) -> std::result::Result<V, E> + 'static,
    {
        self.fields.push(Field {
            name: name.to_string(),
            accessor: Box::new(move |item| {
                accessor(item).map(Into::into).map_err(|e| e.to_string())
            }),
        });
        self
    }

    /// Schema (and sheet) name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in column order
    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in column order
    pub fn header(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::name)
    }

    /// Read every field of `item`, stopping at the first failure
    pub fn values(&self, item: &T) -> Result<Vec<FieldValue>> {
        self.fields.iter().map(|f| f.get(item)).collect()
    }
}

/// A type that can be written as a sheet row
pub trait Record: Sized {
    /// The type's field list; its name becomes the sheet name
    fn schema() -> Schema<Self>;
}
