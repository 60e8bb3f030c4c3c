//! Field access for the two supported record shapes.
//!
//! Every query and mutation is written against the [`Accessor`] trait, never
//! against a concrete record type. Two accessors ship with the crate:
//!
//! - [`KeyAccessor`] reads and writes entries of a [`Document`].
//! - [`AttrAccessor`] reads and writes named attributes of any type that
//!   implements [`Attributes`].

use std::borrow::Cow;

use crate::error::{Result, SiftError};
use crate::value::{Document, Value};

/// Read/write capability for one record shape.
///
/// Accessors are stateless. A missing field is reported with the error
/// native to the record shape ([`SiftError::MissingKey`] for documents,
/// [`SiftError::MissingAttribute`] for objects); the engine never swallows
/// or rewrites it.
pub trait Accessor<R> {
    /// Reads `field` from `record`.
    ///
    /// Borrowing accessors hand out `Cow::Borrowed`; accessors that build
    /// the value on the fly return `Cow::Owned`.
    fn read<'r>(&self, record: &'r R, field: &str) -> Result<Cow<'r, Value>>;

    /// Writes `value` into `field` of `record`.
    fn write(&self, record: &mut R, field: &str, value: Value) -> Result<()>;
}

/// Accessor for string-keyed [`Document`] records.
///
/// Writing a key that does not exist yet inserts it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyAccessor;

impl Accessor<Document> for KeyAccessor {
    fn read<'r>(&self, record: &'r Document, field: &str) -> Result<Cow<'r, Value>> {
        record
            .get(field)
            .map(Cow::Borrowed)
            .ok_or_else(|| SiftError::MissingKey {
                key: field.to_string(),
            })
    }

    fn write(&self, record: &mut Document, field: &str, value: Value) -> Result<()> {
        record.insert(field.to_string(), value);
        Ok(())
    }
}

/// Trait for attribute-bearing records.
///
/// # Example
///
/// ```
/// use sift::{Attributes, Result, SiftError, Value};
///
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// impl Attributes for Person {
///     fn attribute(&self, name: &str) -> Option<Value> {
///         match name {
///             "name" => Some(Value::from(&self.name)),
///             "age" => Some(Value::from(self.age)),
///             _ => None,
///         }
///     }
///
///     fn set_attribute(&mut self, name: &str, value: Value) -> Result<()> {
///         match name {
///             "age" => {
///                 self.age = i64::try_from(value)
///                     .map_err(|v| SiftError::invalid_attribute(name, "integer", &v))?;
///                 Ok(())
///             }
///             _ => Err(SiftError::ReadOnlyAttribute { attribute: name.to_string() }),
///         }
///     }
/// }
/// ```
pub trait Attributes {
    /// Returns the value of an attribute, or `None` if the record has no
    /// attribute of that name.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Assigns an attribute.
    ///
    /// The default implementation treats every attribute as read-only.
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<()> {
        let _ = value;
        Err(SiftError::ReadOnlyAttribute {
            attribute: name.to_string(),
        })
    }
}

/// Accessor for records implementing [`Attributes`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttrAccessor;

impl<R: Attributes> Accessor<R> for AttrAccessor {
    fn read<'r>(&self, record: &'r R, field: &str) -> Result<Cow<'r, Value>> {
        record
            .attribute(field)
            .map(Cow::Owned)
            .ok_or_else(|| SiftError::MissingAttribute {
                attribute: field.to_string(),
            })
    }

    fn write(&self, record: &mut R, field: &str, value: Value) -> Result<()> {
        if record.attribute(field).is_none() {
            return Err(SiftError::MissingAttribute {
                attribute: field.to_string(),
            });
        }
        record.set_attribute(field, value)
    }
}
