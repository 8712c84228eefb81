//! Shared storage for saved thumbnails.
//!
//! Provides a thread-safe [`ThumbnailStore`] shared across HTTP handlers.
//! The store assigns persistence identity (a record ID) on save and can
//! optionally mirror every record to a data directory as JSON.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ThumbnailDocument;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("Thumbnail not found: {0}")]
    ThumbnailNotFound(String),
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// One persisted thumbnail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailRecord {
    /// Store-assigned identifier.
    pub id: String,
    /// Title, taken from the document metadata at save time.
    pub title: String,
    /// The video this thumbnail was created for, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    /// The saved document value.
    pub document: ThumbnailDocument,
    /// Creation time, Unix milliseconds.
    pub created_at: u64,
    /// Last update time, Unix milliseconds.
    pub updated_at: u64,
}

/// Thread-safe thumbnail storage shared across handlers.
///
/// # Example
///
/// ```
/// use studio_core::{ThumbnailDocument, ThumbnailStore};
///
/// let store = ThumbnailStore::new();
/// let id = store.save(ThumbnailDocument::new(), None);
/// assert!(store.get(&id).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThumbnailStore {
    records: Arc<RwLock<HashMap<String, ThumbnailRecord>>>,
    /// Optional data directory for filesystem persistence.
    data_dir: Option<PathBuf>,
}

impl ThumbnailStore {
    /// Create an in-memory store with no persistence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that mirrors records to `data_dir` as JSON files.
    ///
    /// The directory is created if it doesn't exist. Existing records are
    /// not loaded automatically; call [`Self::load_all`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            data_dir: Some(data_dir),
        })
    }

    /// Save a document, assigning a fresh record ID.
    ///
    /// The record title is taken from the document metadata.
    #[must_use]
    pub fn save(&self, document: ThumbnailDocument, video_id: Option<String>) -> String {
        let id = Uuid::new_v4().to_string();
        let now = current_timestamp_ms();
        let record = ThumbnailRecord {
            id: id.clone(),
            title: document.metadata.title.clone(),
            video_id,
            document,
            created_at: now,
            updated_at: now,
        };
        {
            let mut records = self
                .records
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            records.insert(id.clone(), record.clone());
        }
        self.persist_record(&record);
        id
    }

    /// Get a record by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<ThumbnailRecord> {
        let records = self
            .records
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        records.get(id).cloned()
    }

    /// Replace the document of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ThumbnailNotFound`] if the record does not
    /// exist.
    pub fn update(&self, id: &str, document: ThumbnailDocument) -> Result<(), StoreError> {
        let record = {
            let mut records = self
                .records
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let record = records
                .get_mut(id)
                .ok_or_else(|| StoreError::ThumbnailNotFound(id.to_string()))?;
            record.title = document.metadata.title.clone();
            record.document = document;
            record.updated_at = current_timestamp_ms();
            record.clone()
        };
        self.persist_record(&record);
        Ok(())
    }

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ThumbnailNotFound`] if the record does not
    /// exist.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        {
            let mut records = self
                .records
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            records
                .remove(id)
                .ok_or_else(|| StoreError::ThumbnailNotFound(id.to_string()))?;
        }
        self.remove_record_file(id);
        Ok(())
    }

    /// All records, most recently updated first.
    #[must_use]
    pub fn list(&self) -> Vec<ThumbnailRecord> {
        let records = self
            .records
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut list: Vec<_> = records.values().cloned().collect();
        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
        list
    }

    /// Number of stored records.
    #[must_use]
    pub fn count(&self) -> usize {
        let records = self
            .records
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        records.len()
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Load all persisted records from the data directory into memory.
    ///
    /// Returns the IDs that were loaded. Files that fail to parse are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory is configured or it can't be
    /// read.
    pub fn load_all(&self) -> Result<Vec<String>, StoreError> {
        let data_dir = self.data_dir.as_ref().ok_or_else(|| {
            StoreError::Serialization("No data directory configured".to_string())
        })?;
        let mut loaded = Vec::new();
        for entry in std::fs::read_dir(data_dir)? {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            let contents = std::fs::read_to_string(&path)?;
            match serde_json::from_str::<ThumbnailRecord>(&contents) {
                Ok(record) => {
                    let mut records = self
                        .records
                        .write()
                        .unwrap_or_else(std::sync::PoisonError::into_inner);
                    loaded.push(record.id.clone());
                    records.insert(record.id.clone(), record);
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable record {}: {e}", path.display());
                }
            }
        }
        Ok(loaded)
    }

    /// Write a record to disk as JSON.
    ///
    /// No-op if the store was created without a data directory.
    fn persist_record(&self, record: &ThumbnailRecord) {
        let Some(ref data_dir) = self.data_dir else {
            return;
        };
        let json = match serde_json::to_string_pretty(record) {
            Ok(j) => j,
            Err(e) => {
                tracing::warn!("Failed to serialize record {}: {e}", record.id);
                return;
            }
        };
        let path = data_dir.join(format!("{}.json", sanitize_filename(&record.id)));
        if let Err(e) = std::fs::write(&path, json) {
            tracing::warn!(
                "Failed to persist record {} to {}: {e}",
                record.id,
                path.display()
            );
        }
    }

    /// Remove a record's file from disk.
    ///
    /// No-op if the store has no data directory or the file doesn't exist.
    fn remove_record_file(&self, id: &str) {
        let Some(ref data_dir) = self.data_dir else {
            return;
        };
        let path = data_dir.join(format!("{}.json", sanitize_filename(id)));
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!("Failed to delete record file {}: {e}", path.display());
            }
        }
    }
}

/// Sanitize a record ID for use as a filename.
///
/// Replaces any character that is not alphanumeric, `-`, or `_` with `_`.
fn sanitize_filename(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Get the current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| {
        // Timestamp will not exceed u64 max for millennia
        #[allow(clippy::cast_possible_truncation)]
        {
            d.as_millis() as u64
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Element;

    fn sample_document(title: &str) -> ThumbnailDocument {
        let mut doc = ThumbnailDocument::new();
        doc.metadata.title = title.to_string();
        doc.add_element(Element::text(1))
    }

    #[test]
    fn test_save_assigns_id_and_title() {
        let store = ThumbnailStore::new();
        let id = store.save(sample_document("My Thumb"), None);

        let record = store.get(&id).expect("record exists");
        assert_eq!(record.id, id);
        assert_eq!(record.title, "My Thumb");
        assert_eq!(record.document.element_count(), 1);
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_get_unknown_returns_none() {
        let store = ThumbnailStore::new();
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_update_replaces_document() {
        let store = ThumbnailStore::new();
        let id = store.save(sample_document("Before"), None);

        store
            .update(&id, sample_document("After"))
            .expect("should update");

        let record = store.get(&id).expect("record exists");
        assert_eq!(record.title, "After");
    }

    #[test]
    fn test_update_unknown_fails() {
        let store = ThumbnailStore::new();
        let result = store.update("missing", sample_document("x"));
        assert!(matches!(result, Err(StoreError::ThumbnailNotFound(_))));
    }

    #[test]
    fn test_delete_removes_record() {
        let store = ThumbnailStore::new();
        let id = store.save(sample_document("Doomed"), None);

        store.delete(&id).expect("should delete");
        assert!(store.get(&id).is_none());
        assert!(matches!(
            store.delete(&id),
            Err(StoreError::ThumbnailNotFound(_))
        ));
    }

    #[test]
    fn test_list_newest_first() {
        let store = ThumbnailStore::new();
        let first = store.save(sample_document("one"), None);
        let second = store.save(sample_document("two"), None);

        // Touch the first record so it becomes the most recent; the
        // millisecond clock needs a beat to move on fast machines.
        std::thread::sleep(std::time::Duration::from_millis(5));
        store
            .update(&first, sample_document("one updated"))
            .expect("update");

        let list = store.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, first);
        assert_eq!(list[1].id, second);
    }

    #[test]
    fn test_video_id_is_kept() {
        let store = ThumbnailStore::new();
        let id = store.save(sample_document("vid"), Some("dQw4w9WgXcQ".to_string()));
        let record = store.get(&id).expect("exists");
        assert_eq!(record.video_id.as_deref(), Some("dQw4w9WgXcQ"));
    }

    // -----------------------------------------------------------------------
    // Persistence tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_persistence_save_and_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let id = {
            let store = ThumbnailStore::with_data_dir(dir.path()).expect("store");
            store.save(sample_document("Persisted"), None)
        };
        // Store dropped; only disk files remain

        let store2 = ThumbnailStore::with_data_dir(dir.path()).expect("store2");
        let loaded = store2.load_all().expect("load");
        assert_eq!(loaded, vec![id.clone()]);

        let record = store2.get(&id).expect("record survived");
        assert_eq!(record.title, "Persisted");
        assert_eq!(record.document.element_count(), 1);
    }

    #[test]
    fn test_persistence_delete_removes_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ThumbnailStore::with_data_dir(dir.path()).expect("store");
        let id = store.save(sample_document("Doomed"), None);

        let path = dir.path().join(format!("{id}.json"));
        assert!(path.exists(), "record file written on save");

        store.delete(&id).expect("delete");
        assert!(!path.exists());
    }

    #[test]
    fn test_persistence_skips_unreadable_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ThumbnailStore::with_data_dir(dir.path()).expect("store");
        store.save(sample_document("good"), None);
        std::fs::write(dir.path().join("broken.json"), "{not json").expect("write");

        let store2 = ThumbnailStore::with_data_dir(dir.path()).expect("store2");
        let loaded = store2.load_all().expect("load");
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_load_all_without_data_dir_fails() {
        let store = ThumbnailStore::new();
        assert!(store.load_all().is_err());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("simple"), "simple");
        assert_eq!(sanitize_filename("with-dash"), "with-dash");
        assert_eq!(sanitize_filename("has/slash"), "has_slash");
        assert_eq!(sanitize_filename("a.b.c"), "a_b_c");
    }
}
