//! JSON array storage.
//!
//! Each dataset file is a single JSON array; each element is one record.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use super::{StorageConfig, StorageError};
use crate::models::Record;

/// Reader for one dataset file.
#[derive(Debug, Clone)]
pub struct JsonArrayReader {
    path: PathBuf,
}

impl JsonArrayReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create a reader for a named dataset in the data directory.
    pub fn for_dataset(config: &StorageConfig, name: &str) -> Self {
        Self::new(config.dataset_path(name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all records from the file.
    ///
    /// Array elements that are not objects are skipped with a warning; a
    /// missing file, unreadable file or non-array document is an error.
    pub fn read_all(&self) -> Result<Vec<Record>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }

        let contents = fs::read_to_string(&self.path)?;
        let records = parse_records(&contents, &self.path)?;

        debug!("Read {} records from {:?}", records.len(), self.path);
        Ok(records)
    }
}

/// Parse a JSON array document into records.
pub fn parse_records(contents: &str, origin: &Path) -> Result<Vec<Record>, StorageError> {
    let document: Value = serde_json::from_str(contents)?;
    records_from_value(document, origin)
}

/// Convert an already parsed JSON document into records.
pub fn records_from_value(document: Value, origin: &Path) -> Result<Vec<Record>, StorageError> {
    let Value::Array(items) = document else {
        return Err(StorageError::NotAnArray(origin.to_path_buf()));
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(object) => records.push(Record::from_json_object(object)),
            other => warn!(
                "Skipping element {} in {:?}: expected object, found {}",
                index,
                origin,
                json_kind(&other)
            ),
        }
    }
    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
