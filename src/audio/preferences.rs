use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use crate::error::AppError;

/// Small string key/value store that survives across sessions.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat JSON object in a file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<HashMap<String, String>, AppError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut values) => values.remove(key),
            Err(e) => {
                tracing::warn!("Ignoring unreadable preferences at {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut values = self.load().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&values)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryPreferenceStore::default();
        assert_eq!(store.get("k"), None);
        store.set("k", "true").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("true"));
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        FilePreferenceStore::new(&path).set("bg-audio-enabled", "false").unwrap();

        let reopened = FilePreferenceStore::new(&path);
        assert_eq!(reopened.get("bg-audio-enabled").as_deref(), Some("false"));
        assert_eq!(reopened.get("other"), None);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("absent.json"));
        assert_eq!(store.get("bg-audio-enabled"), None);
    }

    #[test]
    fn file_store_recovers_from_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        let store = FilePreferenceStore::new(&path);
        assert_eq!(store.get("bg-audio-enabled"), None);
        store.set("bg-audio-enabled", "true").unwrap();
        assert_eq!(store.get("bg-audio-enabled").as_deref(), Some("true"));
    }
}
