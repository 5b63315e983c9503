//! Dataset registry.
//!
//! Owns every loaded dataset for the life of the process. Consumers get
//! shared `Arc<Dataset>` handles; loading a name again swaps the handle and
//! leaves readers of the old one untouched.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::models::{Dataset, Record, SourceFile};
use crate::storage::{records_from_value, JsonArrayReader, StorageConfig, StorageError};

/// Something records can be read from.
pub trait DatasetSource {
    fn read_records(&self) -> Result<Vec<Record>, StorageError>;

    /// Where the records come from, for logs and listings.
    fn origin(&self) -> Option<PathBuf> {
        None
    }
}

impl DatasetSource for JsonArrayReader {
    fn read_records(&self) -> Result<Vec<Record>, StorageError> {
        self.read_all()
    }

    fn origin(&self) -> Option<PathBuf> {
        Some(self.path().to_path_buf())
    }
}

impl DatasetSource for Value {
    fn read_records(&self) -> Result<Vec<Record>, StorageError> {
        records_from_value(self.clone(), Path::new("<inline>"))
    }
}

impl DatasetSource for Vec<Record> {
    fn read_records(&self) -> Result<Vec<Record>, StorageError> {
        Ok(self.clone())
    }
}

/// Outcome of reading a source, before it is collapsed for callers.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Dataset),
    Failed(StorageError),
}

impl LoadOutcome {
    pub fn read(name: &str, source: &dyn DatasetSource) -> Self {
        match source.read_records() {
            Ok(records) => LoadOutcome::Loaded(Dataset::new(name, records)),
            Err(e) => LoadOutcome::Failed(e),
        }
    }

    /// Collapse to a dataset, substituting an empty one on failure.
    pub fn into_dataset(self, name: &str) -> Dataset {
        match self {
            LoadOutcome::Loaded(dataset) => dataset,
            LoadOutcome::Failed(e) => {
                warn!("Failed to load dataset {}: {}", name, e);
                Dataset::empty(name)
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    dataset: Arc<Dataset>,
    loaded_at: DateTime<Utc>,
    source: Option<PathBuf>,
    failed: bool,
}

/// Listing entry for a loaded dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    pub name: String,
    pub records: usize,
    pub columns: Vec<String>,
    pub loaded_at: DateTime<Utc>,
    pub source: Option<PathBuf>,
    pub load_failed: bool,
}

/// Named datasets, safe for concurrent readers.
#[derive(Debug, Default)]
pub struct DatasetRegistry {
    entries: RwLock<HashMap<String, Entry>>,
}

impl DatasetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every dataset in the data directory.
    ///
    /// Known dashboard datasets are always registered, empty when their
    /// file is missing. Other `*.json` files are registered by file stem.
    pub fn from_storage(storage: &StorageConfig) -> Self {
        let registry = Self::new();
        registry.load_dir(storage);
        registry
    }

    /// Read a source and register it under `name`. Never fails: a source that
    /// cannot be read yields an empty dataset.
    pub fn load(&self, name: &str, source: &dyn DatasetSource) -> Arc<Dataset> {
        let outcome = LoadOutcome::read(name, source);
        let failed = matches!(outcome, LoadOutcome::Failed(_));
        let dataset = Arc::new(outcome.into_dataset(name));

        let entry = Entry {
            dataset: Arc::clone(&dataset),
            loaded_at: Utc::now(),
            source: source.origin(),
            failed,
        };
        self.write().insert(name.to_string(), entry);

        debug!("Registered dataset {} ({} records)", name, dataset.len());
        dataset
    }

    /// Load all datasets found in the data directory. Returns how many
    /// datasets loaded with at least one record.
    pub fn load_dir(&self, storage: &StorageConfig) -> usize {
        let mut names: Vec<String> = SourceFile::ALL
            .iter()
            .map(|s| s.name().to_string())
            .collect();

        match storage.discover() {
            Ok(paths) => {
                for path in paths {
                    let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned())
                    else {
                        continue;
                    };
                    if !names.contains(&stem) {
                        names.push(stem);
                    }
                }
            }
            Err(e) => warn!("Could not scan {:?}: {}", storage.data_dir, e),
        }

        let mut populated = 0;
        for name in &names {
            let reader = JsonArrayReader::for_dataset(storage, name);
            if !self.load(name, &reader).is_empty() {
                populated += 1;
            }
        }

        info!(
            "Loaded {} of {} datasets from {:?}",
            populated,
            names.len(),
            storage.data_dir
        );
        populated
    }

    /// The named dataset, or an empty one if it was never loaded.
    pub fn get(&self, name: &str) -> Arc<Dataset> {
        self.read()
            .get(name)
            .map(|e| Arc::clone(&e.dataset))
            .unwrap_or_else(|| Arc::new(Dataset::empty(name)))
    }

    pub fn source(&self, source: SourceFile) -> Arc<Dataset> {
        self.get(source.name())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Registered dataset names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn info(&self) -> Vec<DatasetInfo> {
        let entries = self.read();
        let mut infos: Vec<DatasetInfo> = entries
            .iter()
            .map(|(name, e)| DatasetInfo {
                name: name.clone(),
                records: e.dataset.len(),
                columns: crate::view::columns(e.dataset.records()),
                loaded_at: e.loaded_at,
                source: e.source.clone(),
                load_failed: e.failed,
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Writers only ever swap whole entries, so a poisoned lock is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Entry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}
