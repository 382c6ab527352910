//! Blob encoding shared by the stores.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::storage::KeyValueStore;

/// Read a JSON array from `key`, falling back to empty on any failure.
pub fn load_list<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Vec<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No saved state, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read saved state, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => items,
        Err(e) => {
            warn!(
                key,
                error = %e,
                blob = %raw.chars().take(200).collect::<String>(),
                "Saved state does not match schema, starting empty"
            );
            Vec::new()
        }
    }
}

/// Rewrite the whole blob under `key`.
pub fn save_list<T: Serialize>(storage: &dyn KeyValueStore, key: &str, items: &[T]) {
    let json = match serde_json::to_string(items) {
        Ok(json) => json,
        Err(e) => {
            warn!(key, error = %e, "Failed to encode state");
            return;
        }
    };

    if let Err(e) = storage.set(key, &json) {
        warn!(key, error = %e, "Failed to persist state");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    #[derive(Debug)]
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Poisoned)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    #[test]
    fn test_load_missing_key() {
        let store = MemoryStore::new();
        assert!(load_list::<u32>(&store, "cart").is_empty());
    }

    #[test]
    fn test_load_malformed_blob() {
        for blob in ["{not json", "null", "{\"id\": 1}", "[\"a\"]", ""] {
            let store = MemoryStore::with_entries([("cart", blob)]);
            assert!(load_list::<u32>(&store, "cart").is_empty(), "blob: {blob}");
        }
    }

    #[test]
    fn test_load_unreadable_store() {
        assert!(load_list::<u32>(&BrokenStore, "cart").is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        save_list(&store, "cart", &[3_u32, 1, 2]);
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[3,1,2]"));
        assert_eq!(load_list::<u32>(&store, "cart"), vec![3, 1, 2]);
    }

    #[test]
    fn test_save_to_broken_store_does_not_panic() {
        save_list(&BrokenStore, "cart", &[1_u32]);
    }
}
