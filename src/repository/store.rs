//! Generic whole-collection snapshot persistence.
//!
//! Every mutation of a collection rewrites its full JSON snapshot; there is
//! no incremental or append format. The snapshot carries the collection's
//! identifier sequence so identifiers stay monotonic across removals and
//! restarts.

use std::fs;
use std::io::Write;
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Persisted form of one collection: its records in insertion order plus the
/// next identifier sequence number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub next_seq: u64,
    pub records: Vec<T>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            next_seq: 1,
            records: Vec::new(),
        }
    }
}

/// JSON file store for one entity type.
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Load the snapshot from disk. A missing file is an empty collection,
    /// not an error (first run).
    pub fn load(&self) -> AppResult<Snapshot<T>> {
        if !self.path.exists() {
            return Ok(Snapshot::default());
        }

        let bytes = fs::read(&self.path).map_err(|e| {
            tracing::error!("Failed to read snapshot {}: {}", self.path.display(), e);
            AppError::Persistence(format!("read {}", self.path.display()))
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!("Corrupt snapshot {}: {}", self.path.display(), e);
            AppError::Persistence(format!("parse {}", self.path.display()))
        })
    }

    /// Write the full snapshot durably: serialize to a temp file next to the
    /// target, then rename over it so readers never observe a partial write.
    pub fn save(&self, snapshot: &Snapshot<T>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    tracing::error!("Failed to create {}: {}", parent.display(), e);
                    AppError::Persistence(format!("create dir {}", parent.display()))
                })?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        let write_result = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            serde_json::to_writer_pretty(&mut file, snapshot)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            file.flush()?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        })();

        write_result.map_err(|e| {
            let _ = fs::remove_file(&tmp);
            tracing::error!("Failed to write snapshot {}: {}", self.path.display(), e);
            AppError::Persistence(format!("write {}", self.path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    fn sample_items() -> Vec<Item> {
        vec![
            Item {
                id: "BK000001".to_string(),
                title: "The Hobbit".to_string(),
                author: "Tolkien".to_string(),
                category: "Fantasy".to_string(),
                quantity: 2,
                description: None,
            },
            Item {
                id: "BK000002".to_string(),
                title: "Dune".to_string(),
                author: "Herbert".to_string(),
                category: "SF".to_string(),
                quantity: 1,
                description: Some("First edition".to_string()),
            },
        ]
    }

    #[test]
    fn missing_file_loads_as_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<Item> = JsonStore::new(dir.path().join("items.json"));

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.next_seq, 1);
        assert!(snapshot.records.is_empty());
    }

    #[test]
    fn save_then_load_reproduces_the_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<Item> = JsonStore::new(dir.path().join("items.json"));

        let snapshot = Snapshot {
            next_seq: 3,
            records: sample_items(),
        };
        store.save(&snapshot).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.next_seq, 3);
        assert_eq!(loaded.records, snapshot.records);
    }

    #[test]
    fn save_fails_when_target_is_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        // The snapshot path itself is a directory: the rename cannot succeed.
        let store: JsonStore<Item> = JsonStore::new(dir.path());

        let err = store.save(&Snapshot::default()).unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
    }
}
