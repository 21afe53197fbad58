//! Data model for the flat-file record store.
//!
//! This module defines the catalog of table schemas, the typed column values
//! stored in records, and the records themselves. All types serialize to the
//! JSON layout used on disk:
//!
//! - catalog: `{"users": {"columns": {"ID": "int", "name": "str"}}}`
//! - record set: `[{"ID": 1, "name": "Ann"}]`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::validate::ValidationError;

/// Name of the engine-managed primary key column present in every table.
pub const ID_COLUMN: &str = "ID";

/// Column type names accepted in column definitions.
pub const SUPPORTED_TYPES: [&str; 3] = ["int", "str", "bool"];

/// Declared type of a table column.
///
/// # Examples
///
/// ```
/// use flatfile_core::ColumnType;
///
/// let ty: ColumnType = "INT".parse().unwrap();
/// assert_eq!(ty, ColumnType::Int);
/// assert_eq!(ty.to_string(), "int");
/// assert!("float".parse::<ColumnType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 64-bit signed integer.
    Int,
    /// Free-form text.
    Str,
    /// Boolean.
    Bool,
}

impl ColumnType {
    /// Returns the lowercase type tag used in definitions and on disk.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Str => "str",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "int" => Ok(Self::Int),
            "str" => Ok(Self::Str),
            "bool" => Ok(Self::Bool),
            other => Err(ValidationError::UnknownType(other.to_string())),
        }
    }
}

/// A typed column value.
///
/// Serialized untagged, so `Integer(30)` is stored as the JSON number `30`,
/// `Boolean(true)` as `true` and `Text("Ann")` as `"Ann"`.
///
/// # Examples
///
/// ```
/// use flatfile_core::{ColumnType, Value};
///
/// let v = Value::from(30_i64);
/// assert_eq!(v.column_type(), ColumnType::Int);
/// assert_eq!(serde_json::to_string(&v).unwrap(), "30");
/// assert_eq!(Value::from("Ann").to_string(), "Ann");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Text(String),
}

impl Value {
    /// Returns the column type this value belongs to.
    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::Integer(_) => ColumnType::Int,
            Self::Boolean(_) => ColumnType::Bool,
            Self::Text(_) => ColumnType::Str,
        }
    }

    /// Returns the integer payload, if any.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Ordered column layout of one table.
///
/// Always starts with `ID:int`. Build one through
/// [`create_table`](crate::create_table); the constructor here only yields
/// the mandatory key column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    #[serde(with = "crate::ordered")]
    columns: Vec<(String, ColumnType)>,
}

impl TableSchema {
    /// Creates a schema holding only the `ID:int` column.
    pub fn new() -> Self {
        Self {
            columns: vec![(ID_COLUMN.to_string(), ColumnType::Int)],
        }
    }

    pub(crate) fn push(&mut self, name: String, ty: ColumnType) {
        self.columns.push((name, ty));
    }

    /// Iterates over all columns, `ID` first.
    pub fn columns(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.columns.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    /// Iterates over the user-declared columns, skipping `ID`.
    pub fn user_columns(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.columns().filter(|(name, _)| *name != ID_COLUMN)
    }

    /// Returns the column names in declared order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Looks up the declared type of `column`.
    pub fn column_type(&self, column: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, ty)| *ty)
    }

    /// Returns `true` if the schema declares `column` (exact match).
    pub fn contains(&self, column: &str) -> bool {
        self.column_type(column).is_some()
    }

    /// Number of columns including `ID`.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// A schema always holds at least `ID`; this only reports `true` for
    /// hand-edited catalogs that dropped it.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Formats the columns as `name:type` pairs separated by `", "`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatfile_core::TableSchema;
    ///
    /// assert_eq!(TableSchema::new().summary(), "ID:int");
    /// ```
    pub fn summary(&self) -> String {
        self.columns
            .iter()
            .map(|(name, ty)| format!("{name}:{ty}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for TableSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// All table schemas, keyed by table name in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tables: Vec<(String, TableSchema)>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a table schema by exact name.
    pub fn get(&self, table: &str) -> Option<&TableSchema> {
        self.tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, schema)| schema)
    }

    /// Returns `true` if a table named `table` exists.
    pub fn contains(&self, table: &str) -> bool {
        self.get(table).is_some()
    }

    pub(crate) fn insert(&mut self, table: String, schema: TableSchema) {
        self.tables.push((table, schema));
    }

    pub(crate) fn remove(&mut self, table: &str) -> Option<TableSchema> {
        let pos = self.tables.iter().position(|(name, _)| name == table)?;
        Some(self.tables.remove(pos).1)
    }

    /// Iterates over table names in creation order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over `(name, schema)` pairs in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableSchema)> {
        self.tables.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if no tables are defined.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::ordered::serialize(&self.tables, serializer)
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::ordered::deserialize(deserializer).map(|tables| Self { tables })
    }
}

/// One row: column name to typed value, in column order.
///
/// # Examples
///
/// ```
/// use flatfile_core::{Record, Value};
///
/// let mut record = Record::with_id(7);
/// record.set("name", Value::from("Ann"));
/// assert_eq!(record.id(), Some(7));
/// assert_eq!(record.get("name"), Some(&Value::from("Ann")));
/// assert_eq!(
///     serde_json::to_string(&record).unwrap(),
///     r#"{"ID":7,"name":"Ann"}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Creates a record holding only its `ID`.
    pub fn with_id(id: i64) -> Self {
        Self {
            fields: vec![(ID_COLUMN.to_string(), Value::Integer(id))],
        }
    }

    /// Builds a record from `(column, value)` pairs.
    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut record = Self::default();
        for (column, value) in fields {
            record.set(column, value);
        }
        record
    }

    /// Returns the record's `ID`, or `None` if it is missing or not an integer.
    pub fn id(&self) -> Option<i64> {
        self.get(ID_COLUMN).and_then(Value::as_integer)
    }

    /// Looks up a field by exact column name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Sets a field, replacing an existing value in place or appending.
    pub fn set(&mut self, column: impl Into<String>, value: Value) {
        let column = column.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Iterates over `(column, value)` pairs.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record holds no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::ordered::serialize(&self.fields, serializer)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::ordered::deserialize(deserializer).map(|fields| Self { fields })
    }
}
