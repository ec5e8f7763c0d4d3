use std::{
    collections::HashMap,
    fs,
    io::{ErrorKind, Write},
    path::PathBuf,
};

use log::{debug, error, info, trace, warn};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::{seed_folders, seed_notes, Folder, JotError, Note, Result, Theme};

/// Key holding the JSON array of notes.
pub const NOTES_KEY: &str = "notes_app_data";
/// Key holding the JSON array of folders.
pub const FOLDERS_KEY: &str = "folders_app_data";
/// Key holding the raw theme string.
pub const THEME_KEY: &str = "theme";

/// A flat string key-value store, the backing medium for [`Persistence`].
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if it was never set
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`, replacing files atomically.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            debug!("Data directory does not exist, creating: {}", self.dir.display());
            fs::create_dir_all(&self.dir).map_err(|e| {
                error!("Failed to create data directory: {}", e);
                JotError::DirectoryError {
                    path: self.dir.clone(),
                }
            })?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        trace!("Reading key '{}' from {}", key, path.display());

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                Err(JotError::Io(e))
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.path_for(key);
        let storage_error = |e: std::io::Error| {
            error!("Failed to write key '{}' to {}: {}", key, path.display(), e);
            JotError::Storage {
                key: key.to_string(),
                message: e.to_string(),
            }
        };

        // Write next to the target so the final rename stays on one filesystem
        let mut temp_file = NamedTempFile::new_in(&self.dir).map_err(storage_error)?;
        temp_file.write_all(value.as_bytes()).map_err(storage_error)?;
        temp_file.flush().map_err(storage_error)?;
        temp_file.persist(&path).map_err(|e| storage_error(e.error))?;

        debug!("Wrote {} bytes for key '{}'", value.len(), key);
        Ok(())
    }
}

/// Volatile store, mostly useful for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the application's collections through a [`KeyValueStore`].
///
/// Loads never fail: missing or malformed data is replaced by the seed
/// dataset (or the default theme). Saves overwrite the whole collection.
#[derive(Debug)]
pub struct Persistence<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_notes(&self) -> Vec<Note> {
        let notes = self.load_or_else(NOTES_KEY, seed_notes);
        info!("Loaded {} notes", notes.len());
        notes
    }

    pub fn save_notes(&mut self, notes: &[Note]) -> Result<()> {
        self.save_json(NOTES_KEY, notes)
    }

    pub fn load_folders(&self) -> Vec<Folder> {
        self.load_or_else(FOLDERS_KEY, seed_folders)
    }

    pub fn save_folders(&mut self, folders: &[Folder]) -> Result<()> {
        self.save_json(FOLDERS_KEY, folders)
    }

    /// The stored theme, or [`Theme::System`] if unset or unrecognized.
    pub fn load_theme(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("Ignoring unknown theme '{}'", raw.trim());
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Failed to read theme, using default: {}", e);
                Theme::default()
            }
        }
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<()> {
        debug!("Saving theme: {}", theme);
        self.store.set(THEME_KEY, theme.as_str())
    }

    fn load_or_else<T, F>(&self, key: &str, fallback: F) -> Vec<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Vec<T>,
    {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No data stored under '{}', using seed data", key);
                return fallback();
            }
            Err(e) => {
                warn!("Failed to read '{}', using seed data: {}", key, e);
                return fallback();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                warn!("Malformed data under '{}', using seed data: {}", key, e);
                fallback()
            }
        }
    }

    fn save_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).map_err(|e| {
            error!("Failed to serialize '{}': {}", key, e);
            JotError::Serialization(e)
        })?;
        self.store.set(key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoteDraft, NoteStore};

    fn sample_notes() -> Vec<Note> {
        let mut store = NoteStore::default();
        store.create(NoteDraft::new("Groceries", "milk, eggs").tags(vec!["home".into(), "home".into()]));
        let id = store.create(NoteDraft::new("", "").folder("work"));
        store.toggle_pin(&id).unwrap();
        store.notes().to_vec()
    }

    #[test]
    fn notes_round_trip() {
        let mut persistence = Persistence::new(MemoryStore::new());
        let notes = sample_notes();

        persistence.save_notes(&notes).unwrap();
        assert_eq!(persistence.load_notes(), notes);
    }

    #[test]
    fn wire_format_uses_camel_case_and_iso_strings() {
        let mut persistence = Persistence::new(MemoryStore::new());
        persistence.save_notes(&sample_notes()).unwrap();

        let raw = persistence.store().get(NOTES_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value[0];
        assert!(first["isPinned"].is_boolean());
        assert_eq!(first["folderId"], "work");
        assert!(first["createdAt"].as_str().unwrap().ends_with('Z'));
        assert!(value[1]["folderId"].is_null());
    }

    #[test]
    fn missing_or_corrupt_notes_fall_back_to_seed() {
        let mut persistence = Persistence::new(MemoryStore::new());
        let seed_ids: Vec<String> = seed_notes().into_iter().map(|n| n.id).collect();

        let loaded: Vec<String> = persistence.load_notes().into_iter().map(|n| n.id).collect();
        assert_eq!(loaded, seed_ids);

        persistence.store.set(NOTES_KEY, "[{\"id\": 3").unwrap();
        let loaded: Vec<String> = persistence.load_notes().into_iter().map(|n| n.id).collect();
        assert_eq!(loaded, seed_ids);

        persistence.store.set(NOTES_KEY, "{\"not\": \"a list\"}").unwrap();
        assert_eq!(persistence.load_notes().len(), seed_ids.len());
    }

    #[test]
    fn missing_or_corrupt_folders_fall_back_to_seed() {
        let mut persistence = Persistence::new(MemoryStore::new());
        let seed_ids: Vec<String> = seed_folders().into_iter().map(|f| f.id).collect();

        let loaded: Vec<String> = persistence.load_folders().into_iter().map(|f| f.id).collect();
        assert_eq!(loaded, seed_ids);
        assert_eq!(loaded[0], crate::ALL_FOLDER_ID);

        persistence.store.set(FOLDERS_KEY, "[{\"id\": \"work\"").unwrap();
        let loaded: Vec<String> = persistence.load_folders().into_iter().map(|f| f.id).collect();
        assert_eq!(loaded, seed_ids);
    }

    #[test]
    fn unreadable_keys_fall_back_to_seed() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(format!("{}.json", NOTES_KEY))).unwrap();
        fs::create_dir(dir.path().join(format!("{}.json", FOLDERS_KEY))).unwrap();

        let persistence = Persistence::new(FileStore::new(dir.path()));
        assert!(persistence.store().get(NOTES_KEY).is_err());

        let notes: Vec<String> = persistence.load_notes().into_iter().map(|n| n.id).collect();
        let seed: Vec<String> = seed_notes().into_iter().map(|n| n.id).collect();
        assert_eq!(notes, seed);
        assert_eq!(persistence.load_folders().len(), seed_folders().len());
    }

    #[test]
    fn empty_list_is_not_replaced_by_seed() {
        let mut persistence = Persistence::new(MemoryStore::new());
        persistence.save_notes(&[]).unwrap();
        assert!(persistence.load_notes().is_empty());
    }

    #[test]
    fn theme_defaults_to_system() {
        let mut persistence = Persistence::new(MemoryStore::new());
        assert_eq!(persistence.load_theme(), Theme::System);

        persistence.save_theme(Theme::Dark).unwrap();
        assert_eq!(persistence.store().get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(persistence.load_theme(), Theme::Dark);

        persistence.store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(persistence.load_theme(), Theme::System);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("data"));

        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert!(dir.path().join("data").join("k.json").is_file());
    }

    #[test]
    fn file_store_reports_write_failures() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut store = FileStore::new(blocker.join("data"));
        assert!(store.set("k", "v").is_err());
    }
}
