//! Record engine: insert, select, update, delete and info over one table.
//!
//! Each operation looks the table up in the catalog it is given, reloads the
//! table's full record set from [`Storage`], and writes the full set back
//! after a mutation. Nothing is cached between calls.
//!
//! # Example
//!
//! ```no_run
//! use flatfile_core::{Catalog, Filter, Value, create_table};
//! use flatfile_db::{Storage, records};
//!
//! let storage = Storage::new("db_meta.json", "data");
//! let mut catalog = Catalog::new();
//! create_table(&mut catalog, "users", &["name:str", "age:int"]).unwrap();
//! storage.save_catalog(&catalog).unwrap();
//!
//! let id = records::insert(&storage, &catalog, "users", &[Value::from("\"Ann\""), Value::from("30")]).unwrap();
//! let ann = records::select(&storage, &catalog, "users", Some(&Filter::new().with("ID", id))).unwrap();
//! assert_eq!(ann.len(), 1);
//! ```

use std::fmt;

use flatfile_core::{Catalog, ColumnType, Filter, ID_COLUMN, Record, TableSchema, Value, validate_value};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::storage::Storage;

/// Summary of one table returned by [`info`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<(String, ColumnType)>,
    pub record_count: usize,
}

impl fmt::Display for TableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self
            .columns
            .iter()
            .map(|(name, ty)| format!("{name}:{ty}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "Table: {}", self.name)?;
        writeln!(f, "Columns: {columns}")?;
        write!(f, "Records: {}", self.record_count)
    }
}

fn schema_for<'a>(catalog: &'a Catalog, table: &str) -> Result<&'a TableSchema> {
    catalog
        .get(table)
        .ok_or_else(|| StoreError::TableNotFound(table.to_string()))
}

fn next_id(records: &[Record]) -> Result<i64> {
    match records.iter().filter_map(Record::id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(StoreError::IdExhausted(max)),
    }
}

/// Appends one record to `table` and returns its assigned `ID`.
///
/// `values` line up positionally with the table's columns after `ID`. The new
/// `ID` is one more than the largest existing `ID`, or 1 for an empty table,
/// so deleted IDs are never reused.
///
/// # Errors
///
/// - [`StoreError::TableNotFound`] if `table` is not in the catalog.
/// - [`StoreError::ArityMismatch`] if the value count is wrong.
/// - [`StoreError::Validation`] for the first value that does not coerce; the
///   record set is left unchanged.
/// - [`StoreError::IdExhausted`] if the largest stored `ID` is `i64::MAX`.
/// - [`StoreError::IoError`] or [`StoreError::JsonError`] if the write fails.
pub fn insert(storage: &Storage, catalog: &Catalog, table: &str, values: &[Value]) -> Result<i64> {
    let schema = schema_for(catalog, table)?;
    let expected = schema.user_columns().count();
    if values.len() != expected {
        return Err(StoreError::ArityMismatch {
            expected,
            received: values.len(),
        });
    }

    let mut records = storage.load_records(table).into_inner();
    let id = next_id(&records)?;

    let mut record = Record::with_id(id);
    for ((column, ty), raw) in schema.user_columns().zip(values) {
        record.set(column, validate_value(raw, ty)?);
    }

    records.push(record);
    storage.save_records(table, &records)?;
    debug!(table, id, "Inserted record");
    Ok(id)
}

/// Returns the records of `table` matching `filter`, in storage order.
///
/// `None` returns every record. Filter values are coerced to the declared
/// column types before comparison; see [`Filter::resolve`].
pub fn select(
    storage: &Storage,
    catalog: &Catalog,
    table: &str,
    filter: Option<&Filter>,
) -> Result<Vec<Record>> {
    let schema = schema_for(catalog, table)?;
    let records = storage.load_records(table).into_inner();

    let Some(filter) = filter else {
        return Ok(records);
    };
    let filter = filter.resolve(schema);
    Ok(records.into_iter().filter(|r| filter.matches(r)).collect())
}

/// Applies `assignments` to every record of `table` matching `filter` and
/// returns the number of matched records.
///
/// An assignment is skipped for a record that lacks the column, for the `ID`
/// column, and for a value that does not coerce to the column type. The
/// remaining assignments still apply. The record set is only written when at
/// least one record matched.
pub fn update(
    storage: &Storage,
    catalog: &Catalog,
    table: &str,
    assignments: &[(String, Value)],
    filter: &Filter,
) -> Result<usize> {
    let schema = schema_for(catalog, table)?;
    let filter = filter.resolve(schema);
    let mut records = storage.load_records(table).into_inner();

    let mut matched = 0;
    for record in records.iter_mut().filter(|r| filter.matches(r)) {
        matched += 1;
        for (column, raw) in assignments {
            if column == ID_COLUMN || record.get(column).is_none() {
                continue;
            }
            let Some(ty) = schema.column_type(column) else {
                continue;
            };
            match validate_value(raw, ty) {
                Ok(value) => record.set(column.as_str(), value),
                Err(e) => debug!(table, column = %column, error = %e, "Skipped assignment"),
            }
        }
    }

    if matched > 0 {
        storage.save_records(table, &records)?;
    }
    debug!(table, matched, "Updated records");
    Ok(matched)
}

/// Removes every record of `table` matching `filter` and returns how many
/// were removed. The record set is only written when the count is non-zero.
pub fn delete(storage: &Storage, catalog: &Catalog, table: &str, filter: &Filter) -> Result<usize> {
    let schema = schema_for(catalog, table)?;
    let filter = filter.resolve(schema);
    let records = storage.load_records(table).into_inner();

    let before = records.len();
    let kept: Vec<Record> = records.into_iter().filter(|r| !filter.matches(r)).collect();
    let removed = before - kept.len();

    if removed > 0 {
        storage.save_records(table, &kept)?;
    }
    debug!(table, removed, "Deleted records");
    Ok(removed)
}

/// Describes `table`: its columns and its current record count, freshly
/// read from storage.
pub fn info(storage: &Storage, catalog: &Catalog, table: &str) -> Result<TableInfo> {
    let schema = schema_for(catalog, table)?;
    let record_count = storage.load_records(table).value.len();
    Ok(TableInfo {
        name: table.to_string(),
        columns: schema
            .columns()
            .map(|(name, ty)| (name.to_string(), ty))
            .collect(),
        record_count,
    })
}
