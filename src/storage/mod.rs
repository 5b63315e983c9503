//! Filesystem access to the statistics data directory.
//!
//! Every dataset is one JSON file in the data directory, holding an array
//! of flat objects:
//! - `Summary.json`, `All_Players.json`, leaderboards, ...
//! - any extra `*.json` file dropped next to them

mod json;

pub use json::*;

use std::path::PathBuf;
use thiserror::Error;

use crate::models::SourceFile;

/// Errors that can occur while reading a dataset source.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Expected a JSON array of objects in {0}")]
    NotAnArray(PathBuf),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Path of the JSON file backing the named dataset.
    pub fn dataset_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", name))
    }

    pub fn source_path(&self, source: SourceFile) -> PathBuf {
        self.data_dir.join(source.filename())
    }

    /// All `*.json` files in the data directory, sorted by path.
    pub fn discover(&self) -> Result<Vec<PathBuf>, StorageError> {
        let pattern = self.data_dir.join("*.json");
        let mut paths: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .collect();
        paths.sort();
        Ok(paths)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
