//! Core types and schema management for a flat-file record store.
//!
//! This crate defines the in-memory model shared by storage and the command
//! shell:
//!
//! - [`Catalog`]: every table schema, keyed by table name in creation order.
//! - [`TableSchema`]: ordered `name:type` columns, always led by `ID:int`.
//! - [`Record`]: one row mapping column names to typed [`Value`]s.
//! - [`Filter`]: WHERE-style exact-equality conditions over records.
//!
//! Validation ([`validate_column_definition`], [`validate_value`]) turns raw
//! operator text into checked definitions and typed values. Schema management
//! ([`create_table`], [`drop_table`], [`list_tables`]) mutates a catalog value
//! passed in by the caller; nothing here touches the filesystem.
//!
//! # Example
//!
//! ```
//! use flatfile_core::*;
//!
//! let mut catalog = Catalog::new();
//! create_table(&mut catalog, "users", &["name:str", "age:int"]).unwrap();
//!
//! let schema = catalog.get("users").unwrap();
//! let mut record = Record::with_id(1);
//! for ((column, ty), raw) in schema.user_columns().zip(["\"Ann\"", "30"]) {
//!     record.set(column, validate_value(&Value::from(raw), ty).unwrap());
//! }
//!
//! assert!(Filter::new().with("age", 30_i64).matches(&record));
//! assert_eq!(record.get("name"), Some(&Value::from("Ann")));
//! ```

mod error;
mod filter;
mod ordered;
mod schema;
mod types;
mod validate;

pub use error::ErrorKind;
pub use filter::Filter;
pub use schema::{NO_TABLES_MESSAGE, SchemaError, create_table, drop_table, list_tables};
pub use types::*;
pub use validate::{ValidationError, validate_column_definition, validate_value};
