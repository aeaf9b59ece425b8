//! Durable key-value storage for client state.
//!
//! The session store only talks to the [`Storage`] trait, so the JSON file
//! used by the CLI can be swapped for [`MemoryStorage`] in tests.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::fs::atomic_write;
use crate::i18n::Language;
use crate::paths;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key for the authenticated username.
pub const USERNAME_KEY: &str = "username";
/// Storage key for the UI language tag.
pub const LANGUAGE_KEY: &str = "app_language";

/// A string key-value store that survives process restarts.
///
/// Batch operations either apply every entry or leave the store untouched.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()>;
    fn remove_many(&mut self, keys: &[&str]) -> Result<()>;

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key, value)])
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.remove_many(&[key])
    }
}

/// In-memory storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.entries.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.entries.remove(*key);
        }
        Ok(())
    }
}

/// Storage backed by a flat JSON object on disk.
///
/// The file is read once on open and rewritten atomically on every change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens the default state file at `$XDG_DATA_HOME/quip/state.json`.
    pub fn open_default() -> Result<Self> {
        Self::open(paths::data_dir().join("state.json"))
    }

    /// Opens the state file at `path`. A missing file is an empty store.
    pub fn open(path: PathBuf) -> Result<Self> {
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse state file: {}", path.display()))?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read state file: {}", path.display()));
            }
        };

        Ok(Self { path, entries })
    }

    pub const fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Writes `entries` to disk and adopts them once the write succeeded.
    fn commit(&mut self, entries: BTreeMap<String, String>) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(&entries).context("Failed to serialize state")?;
        atomic_write(&self.path, &contents)?;
        self.entries = entries;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        let mut next = self.entries.clone();
        for (key, value) in entries {
            next.insert((*key).to_string(), (*value).to_string());
        }
        self.commit(next)
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<()> {
        let mut next = self.entries.clone();
        let mut changed = false;
        for key in keys {
            changed |= next.remove(*key).is_some();
        }
        if changed {
            self.commit(next)?;
        }
        Ok(())
    }
}

/// Reads the persisted UI language, if any.
///
/// An unrecognized tag is ignored rather than treated as an error.
pub fn load_language<S: Storage + ?Sized>(storage: &S) -> Option<Language> {
    let tag = storage.get(LANGUAGE_KEY)?;
    match tag.parse() {
        Ok(language) => Some(language),
        Err(_) => {
            tracing::warn!(%tag, "ignoring unknown persisted language");
            None
        }
    }
}

pub fn save_language<S: Storage + ?Sized>(storage: &mut S, language: Language) -> Result<()> {
    storage.set(LANGUAGE_KEY, language.code())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_language_round_trip() {
        let mut storage = MemoryStorage::new();
        assert!(load_language(&storage).is_none());

        save_language(&mut storage, Language::En).unwrap();
        assert_eq!(storage.get(LANGUAGE_KEY), Some("en".to_string()));
        assert_eq!(load_language(&storage), Some(Language::En));
    }

    #[test]
    fn test_unknown_language_ignored() {
        let mut storage = MemoryStorage::new();
        storage.set(LANGUAGE_KEY, "klingon").unwrap();
        assert!(load_language(&storage).is_none());
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get(TOKEN_KEY).is_none());

        storage.set(TOKEN_KEY, "abc").unwrap();
        assert_eq!(storage.get(TOKEN_KEY), Some("abc".to_string()));

        storage.remove(TOKEN_KEY).unwrap();
        assert!(storage.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path().join("state.json")).unwrap();

        assert!(storage.get(USERNAME_KEY).is_none());
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        let mut storage = FileStorage::open(path.clone()).unwrap();
        storage.set(TOKEN_KEY, "abc").unwrap();
        storage.set(LANGUAGE_KEY, "en").unwrap();

        let reopened = FileStorage::open(path).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY), Some("abc".to_string()));
        assert_eq!(reopened.get(LANGUAGE_KEY), Some("en".to_string()));
    }

    #[test]
    fn test_file_storage_remove_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        let mut storage = FileStorage::open(path.clone()).unwrap();
        storage.set(TOKEN_KEY, "abc").unwrap();
        storage.remove(TOKEN_KEY).unwrap();

        let reopened = FileStorage::open(path).unwrap();
        assert!(reopened.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_file_storage_batch_write_persists_together() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        let mut storage = FileStorage::open(path.clone()).unwrap();
        storage
            .set_many(&[(TOKEN_KEY, "abc"), (USERNAME_KEY, "ana")])
            .unwrap();

        let mut reopened = FileStorage::open(path.clone()).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY), Some("abc".to_string()));
        assert_eq!(reopened.get(USERNAME_KEY), Some("ana".to_string()));

        reopened.remove_many(&[TOKEN_KEY, USERNAME_KEY]).unwrap();
        let reopened = FileStorage::open(path).unwrap();
        assert!(reopened.get(TOKEN_KEY).is_none());
        assert!(reopened.get(USERNAME_KEY).is_none());
    }

    #[test]
    fn test_file_storage_failed_write_keeps_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        let mut storage = FileStorage::open(path.clone()).unwrap();
        storage.set(TOKEN_KEY, "old").unwrap();
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let result = storage.set_many(&[(TOKEN_KEY, "abc"), (USERNAME_KEY, "ana")]);
        assert!(result.is_err());
        assert_eq!(storage.get(TOKEN_KEY), Some("old".to_string()));
        assert!(storage.get(USERNAME_KEY).is_none());
    }

    #[test]
    fn test_file_storage_rejects_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();

        let result = FileStorage::open(path);
        assert!(result.unwrap_err().to_string().contains("parse"));
    }
}
