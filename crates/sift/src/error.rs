//! Error types for the sift crate.

use thiserror::Error;

use crate::value::Value;

/// Errors that can occur when compiling filters, reading fields or
/// running container operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SiftError {
    /// Both an explicit mapping and named arguments were given.
    #[error("ambiguous query: pass either a mapping or named arguments, not both")]
    AmbiguousQuery,

    /// An operation that needs at least one match found none.
    #[error("no record matches {filter}")]
    NotFound { filter: String },

    /// A document has no entry for the requested key.
    #[error("missing key '{key}'")]
    MissingKey { key: String },

    /// A record does not expose the requested attribute.
    #[error("record has no attribute '{attribute}'")]
    MissingAttribute { attribute: String },

    /// The attribute exists but cannot be written.
    #[error("attribute '{attribute}' is read-only")]
    ReadOnlyAttribute { attribute: String },

    /// A write supplied a value of the wrong type for the attribute.
    #[error("attribute '{attribute}' expects {expected}, got {found}")]
    InvalidAttribute {
        attribute: String,
        expected: &'static str,
        found: &'static str,
    },

    /// `sum` met a value that is not a number.
    #[error("cannot sum field '{field}': found {found} value")]
    NotNumeric { field: String, found: &'static str },

    /// Two field values could not be ordered against each other.
    #[error("cannot order field '{field}': {left} vs {right}")]
    Unorderable {
        field: String,
        left: String,
        right: String,
    },
}

impl SiftError {
    /// Builds an [`SiftError::InvalidAttribute`] from the offending value.
    ///
    /// Meant for [`Attributes::set_attribute`](crate::Attributes::set_attribute)
    /// implementations.
    pub fn invalid_attribute(attribute: &str, expected: &'static str, found: &Value) -> Self {
        SiftError::InvalidAttribute {
            attribute: attribute.to_string(),
            expected,
            found: found.type_name(),
        }
    }

    pub(crate) fn unorderable(field: &str, left: &Value, right: &Value) -> Self {
        SiftError::Unorderable {
            field: field.to_string(),
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

/// Result type for sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;
