//! Draft persistence
//!
//! The create form autosaves its field values so a half-filled form
//! survives navigation. Storage goes through a small key-value interface;
//! the production backend writes one JSON file per key, tests use the
//! in-memory backend. One fixed key, no eviction; the entry lives until a
//! successful submission clears it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use super::error::CoreError;
use super::models::TransactionDraft;

/// Storage key for the create-form draft
pub const DRAFT_KEY: &str = "transaction_draft";

// ==================== Key-Value Interface ====================

/// Minimal durable key-value store
pub trait KvStore: Send + Sync {
    /// Read a value; `Ok(None)` when the key has never been written
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    /// Write a value, overwriting any existing entry
    fn put(&self, key: &str, value: &str) -> Result<(), CoreError>;
    /// Remove a value; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

/// File-backed store: one `<key>.json` file per key under a directory
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), CoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests
#[derive(Default)]
pub struct MemoryKvStore {
    data: RwLock<HashMap<String, String>>,
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.data.read().unwrap().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.data
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.data.write().unwrap().remove(key);
        Ok(())
    }
}

// ==================== Draft Store ====================

/// Draft persistence on top of a key-value backend
pub struct DraftStore {
    store: Arc<dyn KvStore>,
}

impl DraftStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Load the saved draft, if any. A corrupt entry is logged and treated
    /// as absent so the form still renders.
    pub fn load(&self) -> Result<Option<TransactionDraft>, CoreError> {
        let Some(raw) = self.store.get(DRAFT_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(draft) => Ok(Some(draft)),
            Err(e) => {
                log::warn!(target: "txweb::draft", "Discarding corrupt draft: {}", e);
                Ok(None)
            }
        }
    }

    /// Persist the draft, overwriting any previous entry
    pub fn save(&self, draft: &TransactionDraft) -> Result<(), CoreError> {
        let json = serde_json::to_string(draft).map_err(|e| CoreError::InternalError {
            message: format!("Failed to encode draft: {}", e),
        })?;
        self.store.put(DRAFT_KEY, &json)
    }

    /// Remove the draft (successful submission)
    pub fn clear(&self) -> Result<(), CoreError> {
        self.store.remove(DRAFT_KEY)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TransactionDraft {
        TransactionDraft {
            to_address: "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb".to_string(),
            amount: "1.0".to_string(),
            gas_limit: "21000".to_string(),
            gas_price: String::new(),
        }
    }

    #[test]
    fn test_save_load_clear_round_trip() {
        let store = DraftStore::new(Arc::new(MemoryKvStore::default()));
        assert!(store.load().unwrap().is_none());

        store.save(&draft()).unwrap();
        assert_eq!(store.load().unwrap(), Some(draft()));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites() {
        let store = DraftStore::new(Arc::new(MemoryKvStore::default()));
        store.save(&draft()).unwrap();

        let mut updated = draft();
        updated.amount = "2.0".to_string();
        store.save(&updated).unwrap();

        assert_eq!(store.load().unwrap().unwrap().amount, "2.0");
    }

    #[test]
    fn test_corrupt_entry_is_discarded() {
        let backend = Arc::new(MemoryKvStore::default());
        backend.put(DRAFT_KEY, "{not json").unwrap();

        let store = DraftStore::new(backend);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_clearing_missing_draft_is_ok() {
        let store = DraftStore::new(Arc::new(MemoryKvStore::default()));
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!(
            "txweb-draft-test-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);

        let store = DraftStore::new(Arc::new(FileKvStore::new(dir.clone())));
        assert!(store.load().unwrap().is_none());
        store.save(&draft()).unwrap();
        assert_eq!(store.load().unwrap(), Some(draft()));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
