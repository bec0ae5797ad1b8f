//! Construction-time errors for the dynamic projection adapter.

use thiserror::Error;

use crate::dynamic::DataType;

/// Why a pair shape and projection could not be adapted.
///
/// All variants surface at query definition, before any row is processed;
/// re-invoking with the same inputs deterministically yields the same
/// outcome.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdaptError {
    /// A selector named a field the pair schema does not declare.
    #[error("Unknown field: {0}")]
    UnknownField(String),
    /// A selector indexed past the end of the pair schema.
    #[error("Field index {index} out of bounds for pair shape of {len} fields")]
    FieldIndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of fields the shape declares.
        len: usize,
    },
    /// The outer and item selectors resolved to the same field.
    #[error("Outer and item selectors both resolve to field '{0}'")]
    SelectorsCollide(String),
    /// A projection parameter type does not match the resolved field type.
    #[error("Type mismatch for field '{field}': projection expects {expected:?}, pair shape declares {actual:?}")]
    TypeMismatch {
        /// Name of the resolved field.
        field: String,
        /// Parameter type the projection declares.
        expected: DataType,
        /// Type the pair shape declares for the field.
        actual: DataType,
    },
    /// The item field cannot hold the unmatched-row default.
    #[error("Item field '{0}' must be nullable to carry unmatched outer rows")]
    ItemNotNullable(String),
}
