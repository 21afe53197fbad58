//! Whole-document JSON persistence for the catalog and record sets.
//!
//! Every load reads an entire file and every save rewrites it. A missing file
//! loads as an empty value. An unreadable or undecodable file also loads as an
//! empty value, but with [`LoadStatus::Recovered`] and a warning, so callers
//! can tell it apart from a fresh store.
//!
//! # Example
//!
//! ```no_run
//! use flatfile_db::{LoadStatus, Storage};
//!
//! let storage = Storage::new("db_meta.json", "data");
//! let loaded = storage.load_catalog();
//! if let LoadStatus::Recovered { reason } = &loaded.status {
//!     eprintln!("catalog was unreadable: {reason}");
//! }
//! let catalog = loaded.into_inner();
//! storage.save_catalog(&catalog).unwrap();
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};

use flatfile_core::{Catalog, Record};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::config::StoreConfig;
use crate::error::Result;

/// How a document load ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The file does not exist yet; the value is the empty default.
    Missing,
    /// The file was read and decoded.
    Loaded,
    /// The file exists but could not be read or decoded; the value is the
    /// empty default and the stored content is ignored.
    Recovered { reason: String },
}

/// A loaded document together with how it was obtained.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub value: T,
    pub status: LoadStatus,
}

impl<T> Loaded<T> {
    /// Discards the status and returns the value.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Returns `true` if the document was unreadable and replaced by a default.
    pub fn is_recovered(&self) -> bool {
        matches!(self.status, LoadStatus::Recovered { .. })
    }
}

/// Locations of the catalog document and the record documents.
#[derive(Debug, Clone)]
pub struct Storage {
    catalog_path: PathBuf,
    data_dir: PathBuf,
}

impl Storage {
    /// Creates a storage adapter for the given catalog file and data directory.
    ///
    /// Nothing is touched on disk until the first save.
    pub fn new(catalog_path: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            data_dir: data_dir.into(),
        }
    }

    /// Creates a storage adapter from a [`StoreConfig`].
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.catalog_path.clone(), config.data_dir.clone())
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the record document for `table`.
    pub fn record_path(&self, table: &str) -> PathBuf {
        self.data_dir.join(format!("{table}.json"))
    }

    /// Loads the catalog, falling back to an empty one.
    pub fn load_catalog(&self) -> Loaded<Catalog> {
        load_document(&self.catalog_path)
    }

    /// Writes the whole catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::StoreError::IoError) or
    /// [`JsonError`](crate::StoreError::JsonError) if the write fails.
    pub fn save_catalog(&self, catalog: &Catalog) -> Result<()> {
        write_document(&self.catalog_path, catalog)
    }

    /// Loads the record set of `table`, falling back to an empty one.
    pub fn load_records(&self, table: &str) -> Loaded<Vec<Record>> {
        load_document(&self.record_path(table))
    }

    /// Writes the whole record set of `table`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::StoreError::IoError) or
    /// [`JsonError`](crate::StoreError::JsonError) if the write fails.
    pub fn save_records(&self, table: &str, records: &[Record]) -> Result<()> {
        write_document(&self.record_path(table), records)
    }
}

fn load_document<T>(path: &Path) -> Loaded<T>
where
    T: DeserializeOwned + Default,
{
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == IoErrorKind::NotFound => {
            debug!(path = %path.display(), "Document missing, using empty default");
            return Loaded {
                value: T::default(),
                status: LoadStatus::Missing,
            };
        }
        Err(e) => return recovered(path, e.to_string()),
    };

    match serde_json::from_reader(BufReader::new(file)) {
        Ok(value) => {
            debug!(path = %path.display(), "Loaded document");
            Loaded {
                value,
                status: LoadStatus::Loaded,
            }
        }
        Err(e) => recovered(path, e.to_string()),
    }
}

fn recovered<T: Default>(path: &Path, reason: String) -> Loaded<T> {
    warn!(path = %path.display(), reason = %reason, "Document is unreadable, continuing with an empty value");
    Loaded {
        value: T::default(),
        status: LoadStatus::Recovered { reason },
    }
}

fn write_document<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let result = try_write(path, value);
    match &result {
        Ok(()) => debug!(path = %path.display(), "Wrote document"),
        Err(e) => error!(path = %path.display(), error = %e, "Failed to write document"),
    }
    result
}

fn try_write<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
