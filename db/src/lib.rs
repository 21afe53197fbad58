//! JSON document storage and the record engine for the flat-file store.
//!
//! This crate persists the [`Catalog`](flatfile_core::Catalog) as one JSON
//! document and each table's records as one JSON array in
//! `<data_dir>/<table>.json`, and implements insert/select/update/delete over
//! those record sets.
//!
//! # Quick start
//!
//! ```no_run
//! use flatfile_core::{Filter, Value, create_table};
//! use flatfile_db::{Storage, StoreConfig, records};
//!
//! let storage = Storage::from_config(&StoreConfig::default());
//!
//! // Schema changes go through the catalog, which the caller saves.
//! let mut catalog = storage.load_catalog().into_inner();
//! create_table(&mut catalog, "users", &["name:str", "age:int"]).unwrap();
//! storage.save_catalog(&catalog).unwrap();
//!
//! // Record operations load and save their own record set.
//! records::insert(&storage, &catalog, "users", &[Value::from("Ann"), Value::from("30")]).unwrap();
//! let adults = records::select(&storage, &catalog, "users", Some(&Filter::new().with("age", 30_i64))).unwrap();
//! println!("{} match", adults.len());
//! ```
//!
//! Every call rereads and rewrites whole documents. There is no locking: two
//! processes writing the same files can lose each other's changes.

mod config;
mod error;
pub mod records;
mod storage;

pub use config::{DEFAULT_CATALOG_PATH, DEFAULT_DATA_DIR, StoreConfig};
pub use error::{Result, StoreError};
pub use records::TableInfo;
pub use storage::{LoadStatus, Loaded, Storage};
