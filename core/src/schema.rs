//! Table definition, removal and listing against an in-memory [`Catalog`].
//!
//! These functions only mutate the catalog they are given; persisting it is
//! the caller's job. A failed call leaves the catalog exactly as it was.
//!
//! # Examples
//!
//! ```
//! use flatfile_core::*;
//!
//! let mut catalog = Catalog::new();
//! create_table(&mut catalog, "users", &["name:str", "age:int"]).unwrap();
//! assert_eq!(catalog.get("users").unwrap().summary(), "ID:int, name:str, age:int");
//!
//! // Reserved key column
//! let err = create_table(&mut catalog, "t", &["id:int"]).unwrap_err();
//! assert!(matches!(err, SchemaError::ReservedColumn(_)));
//!
//! assert_eq!(list_tables(&catalog), "- users");
//! ```

use thiserror::Error;

use crate::error::ErrorKind;
use crate::validate::{ValidationError, validate_column_definition};
use crate::{Catalog, ID_COLUMN, TableSchema};

/// Text returned by [`list_tables`] for an empty catalog.
pub const NO_TABLES_MESSAGE: &str = "No tables defined.";

/// Schema management errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Table name is empty or whitespace-only.
    #[error("table name cannot be empty")]
    EmptyTableName,
    /// A table with this name already exists.
    #[error("table \"{0}\" already exists")]
    TableExists(String),
    /// No table with this name exists.
    #[error("table \"{0}\" does not exist")]
    TableNotFound(String),
    /// User tried to declare the engine-managed `ID` column.
    #[error("column \"{0}\" is reserved: ID is created automatically")]
    ReservedColumn(String),
    /// The same column name was declared twice.
    #[error("column \"{0}\" is declared more than once")]
    DuplicateColumn(String),
    /// A column definition failed validation.
    #[error(transparent)]
    InvalidColumn(#[from] ValidationError),
}

impl SchemaError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyTableName => ErrorKind::MalformedInput,
            Self::TableExists(_) | Self::ReservedColumn(_) | Self::DuplicateColumn(_) => {
                ErrorKind::Conflict
            }
            Self::TableNotFound(_) => ErrorKind::NotFound,
            Self::InvalidColumn(err) => err.kind(),
        }
    }
}

/// Defines a new table and registers it in `catalog`.
///
/// The schema starts with `ID:int` and appends each definition in order.
/// Returns a message listing the resulting `name:type` pairs.
///
/// # Errors
///
/// - [`SchemaError::EmptyTableName`] for a blank name.
/// - [`SchemaError::TableExists`] if the name is taken.
/// - [`SchemaError::InvalidColumn`] for a malformed definition.
/// - [`SchemaError::ReservedColumn`] for a column named `ID` in any case.
/// - [`SchemaError::DuplicateColumn`] for a repeated column name.
pub fn create_table<S: AsRef<str>>(
    catalog: &mut Catalog,
    table: &str,
    column_defs: &[S],
) -> Result<String, SchemaError> {
    if table.trim().is_empty() {
        return Err(SchemaError::EmptyTableName);
    }
    if catalog.contains(table) {
        return Err(SchemaError::TableExists(table.to_string()));
    }

    let mut schema = TableSchema::new();
    for def in column_defs {
        let (name, ty) = validate_column_definition(def.as_ref())?;
        if name.eq_ignore_ascii_case(ID_COLUMN) {
            return Err(SchemaError::ReservedColumn(name));
        }
        if schema.contains(&name) {
            return Err(SchemaError::DuplicateColumn(name));
        }
        schema.push(name, ty);
    }

    let message = format!(
        "Table \"{table}\" created with columns: {}",
        schema.summary()
    );
    catalog.insert(table.to_string(), schema);
    Ok(message)
}

/// Removes a table definition from `catalog`.
///
/// The table's record document is left in place.
pub fn drop_table(catalog: &mut Catalog, table: &str) -> Result<String, SchemaError> {
    catalog
        .remove(table)
        .ok_or_else(|| SchemaError::TableNotFound(table.to_string()))?;
    Ok(format!("Table \"{table}\" dropped."))
}

/// Lists table names, one `- name` line each, in creation order.
pub fn list_tables(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return NO_TABLES_MESSAGE.to_string();
    }
    catalog
        .table_names()
        .map(|name| format!("- {name}"))
        .collect::<Vec<_>>()
        .join("\n")
}
