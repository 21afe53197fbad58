//! Store configuration.
//!
//! Defines where the catalog document and the per-table record documents
//! live. The configuration can be loaded from a YAML file; every field is
//! optional and falls back to its default.
//!
//! # Example YAML
//!
//! ```yaml
//! catalog_path: db_meta.json
//! data_dir: data
//! history_file: .flatdb_history
//! ```

use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default catalog document path.
pub const DEFAULT_CATALOG_PATH: &str = "db_meta.json";

/// Default directory holding one `<table>.json` record document per table.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Storage locations for a store.
///
/// # Examples
///
/// ```
/// # use flatfile_db::StoreConfig;
/// let config: StoreConfig = serde_yaml::from_str("data_dir: /tmp/records").unwrap();
/// assert_eq!(config.data_dir.to_str(), Some("/tmp/records"));
/// assert_eq!(config.catalog_path.to_str(), Some("db_meta.json"));
/// assert!(config.history_file.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the catalog document.
    pub catalog_path: PathBuf,
    /// Directory of the record documents.
    pub data_dir: PathBuf,
    /// Interactive shell history file; history is not kept when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_file: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            history_file: None,
        }
    }
}

impl StoreConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::StoreError::IoError) if the file cannot be
    /// read, or [`YamlError`](crate::StoreError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.catalog_path, PathBuf::from("db_meta.json"));
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.history_file.is_none());
    }

    #[test]
    fn test_deserialize_complete() {
        let yaml = r#"
catalog_path: /var/lib/flatdb/meta.json
data_dir: /var/lib/flatdb/tables
history_file: /home/op/.flatdb_history
"#;
        let config: StoreConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("/var/lib/flatdb/meta.json"));
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/flatdb/tables"));
        assert_eq!(
            config.history_file,
            Some(PathBuf::from("/home/op/.flatdb_history"))
        );
    }

    #[test]
    fn test_deserialize_empty_document_uses_defaults() {
        let config: StoreConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flatdb.yml");
        std::fs::write(&path, "data_dir: tables\nhistory_file: history\n").unwrap();

        let loaded = StoreConfig::load(&path).unwrap();
        assert_eq!(
            loaded,
            StoreConfig {
                catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
                data_dir: PathBuf::from("tables"),
                history_file: Some(PathBuf::from("history")),
            }
        );
    }

    #[test]
    fn test_load_malformed_file_is_yaml_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flatdb.yml");
        std::fs::write(&path, "data_dir: [unclosed\n").unwrap();

        let err = StoreConfig::load(&path).unwrap_err();
        assert!(matches!(err, crate::StoreError::YamlError(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StoreConfig::load(dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, crate::StoreError::IoError(_)));
    }
}
