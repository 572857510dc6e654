//! Integration tests for durable storage
//!
//! Tests the file-backed store and typed persisted values

use atelier::storage::{FileStore, KeyValueStore, PersistedValue, StorageError};
use atelier::theme::{THEME_KEY, load_theme, save_theme};
use atelier::types::ThemeMode;
use std::sync::Arc;

mod file_store_tests {
    use super::*;

    #[test]
    fn test_storage_set_and_get() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path());
        let value = r#"{"name": "test", "count": 42}"#;

        store.set("test_key", value).expect("Failed to set storage");

        assert_eq!(store.get("test_key").unwrap(), Some(value.to_string()));
    }

    #[test]
    fn test_storage_get_nonexistent() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path().join("never-created"));
        assert_eq!(store.get("nonexistent_key").unwrap(), None);
    }

    #[test]
    fn test_storage_remove() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path());

        store.set("to_delete", "value").expect("Failed to set");
        assert!(store.get("to_delete").unwrap().is_some());

        store.remove("to_delete").expect("Failed to delete");
        assert!(store.get("to_delete").unwrap().is_none());

        // Removing a missing key is not an error.
        store.remove("to_delete").expect("Failed to delete twice");
    }

    #[test]
    fn test_storage_sanitizes_keys() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path());

        store.set("../escape/attempt", "contained").expect("Failed to set");

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].starts_with(dir.path()));
        assert_eq!(
            store.get("../escape/attempt").unwrap(),
            Some("contained".to_string())
        );
    }

    #[test]
    fn test_storage_overwrites_value() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path());

        store.set("key", "first").unwrap();
        store.set("key", "second").unwrap();
        assert_eq!(store.get("key").unwrap(), Some("second".to_string()));
    }
}

mod persisted_value_tests {
    use super::*;

    #[test]
    fn test_persisted_value_on_disk() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));
        let value = PersistedValue::<Vec<String>>::new(store.clone(), "labels");

        assert_eq!(value.load().unwrap(), None);
        value
            .save(&vec!["Walnut".to_string(), "Marble Tile".to_string()])
            .unwrap();

        let again = PersistedValue::<Vec<String>>::new(store, "labels");
        assert_eq!(
            again.load().unwrap(),
            Some(vec!["Walnut".to_string(), "Marble Tile".to_string()])
        );
    }

    #[test]
    fn test_persisted_value_rejects_garbage() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));
        store.set("labels", "[1, 2,").unwrap();

        let value = PersistedValue::<Vec<String>>::new(store, "labels");
        assert!(matches!(value.load(), Err(StorageError::Serialization(_))));
    }
}

mod theme_tests {
    use super::*;

    #[test]
    fn test_theme_preference_persists() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path());

        assert_eq!(load_theme(&store), ThemeMode::Light);
        save_theme(&store, ThemeMode::Dark);
        assert_eq!(load_theme(&FileStore::new(dir.path())), ThemeMode::Dark);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_light() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path());
        store.set(THEME_KEY, "\"sepia\"").unwrap();
        assert_eq!(load_theme(&store), ThemeMode::Light);
    }
}
