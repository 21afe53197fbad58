//! Error classification shared by every layer of the store.

use std::fmt;

/// Broad category of a failure, independent of which layer raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad command shape, column definition, or clause syntax.
    MalformedInput,
    /// Unknown table.
    NotFound,
    /// Duplicate table or column name, or use of the reserved `ID` column.
    Conflict,
    /// Value cannot be converted to the declared column type.
    TypeCoercion,
    /// Insert value count does not match the table's columns.
    ArityMismatch,
    /// A stored document failed to parse.
    StorageCorruption,
    /// A stored document could not be written.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MalformedInput => "malformed input",
            Self::NotFound => "not found",
            Self::Conflict => "conflict",
            Self::TypeCoercion => "type coercion",
            Self::ArityMismatch => "arity mismatch",
            Self::StorageCorruption => "storage corruption",
            Self::Io => "i/o",
        };
        f.write_str(name)
    }
}
