//! In-memory collection of folders.
//!
//! Folders do not own notes. The per-folder note counts are derived from the
//! notes' `folder_id` by [`FolderStore::refresh_counts`].
use log::{debug, info, warn};

use crate::{Folder, JotError, Note, Result, ALL_FOLDER_ID};

/// Palette offered when creating a folder.
pub const FOLDER_COLORS: [&str; 6] = [
    "#6366f1", "#3b82f6", "#8b5cf6", "#ec4899", "#f59e0b", "#10b981",
];

#[derive(Debug, Clone)]
pub struct FolderStore {
    folders: Vec<Folder>,
}

impl Default for FolderStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FolderStore {
    /// Builds a store from `folders`, adding the "all" folder if it is missing.
    pub fn new(mut folders: Vec<Folder>) -> Self {
        if !folders.iter().any(Folder::is_reserved) {
            debug!("Inserting missing '{}' folder", ALL_FOLDER_ID);
            folders.insert(0, all_notes_folder());
        }
        Self { folders }
    }

    /// Appends a new folder. Names are trimmed and must not be empty.
    pub fn create(&mut self, name: &str, color: &str) -> Result<String> {
        let name = validate_name(name)?;
        let folder = Folder::new(name, color.to_string());
        let id = folder.id.clone();
        info!("Creating folder '{}': {}", folder.name, id);

        self.folders.push(folder);
        Ok(id)
    }

    pub fn rename(&mut self, id: &str, new_name: &str) -> Result<()> {
        reject_reserved(id)?;
        let name = validate_name(new_name)?;

        let folder = self
            .folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| JotError::FolderNotFound { id: id.to_string() })?;

        info!("Renaming folder {}: '{}' -> '{}'", id, folder.name, name);
        folder.name = name;
        Ok(())
    }

    /// Removes the folder. Notes filed under it keep their `folder_id`.
    pub fn delete(&mut self, id: &str) -> Result<Folder> {
        reject_reserved(id)?;

        let index = self
            .folders
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| JotError::FolderNotFound { id: id.to_string() })?;

        info!("Deleting folder: {}", id);
        Ok(self.folders.remove(index))
    }

    /// Recomputes every folder's note count from `notes`
    pub fn refresh_counts(&mut self, notes: &[Note]) {
        for folder in &mut self.folders {
            folder.note_count = if folder.is_reserved() {
                notes.len()
            } else {
                notes
                    .iter()
                    .filter(|n| n.folder_id.as_deref() == Some(folder.id.as_str()))
                    .count()
            };
        }
    }

    pub fn find(&self, id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    pub fn get(&self, id: &str) -> Result<&Folder> {
        self.find(id).ok_or_else(|| JotError::FolderNotFound { id: id.to_string() })
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn iter(&self) -> impl Iterator<Item = &Folder> {
        self.folders.iter()
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

/// The implicit folder listing every note
pub fn all_notes_folder() -> Folder {
    Folder {
        id: ALL_FOLDER_ID.to_string(),
        name: "All Notes".to_string(),
        color: FOLDER_COLORS[0].to_string(),
        note_count: 0,
    }
}

fn reject_reserved(id: &str) -> Result<()> {
    if id == ALL_FOLDER_ID {
        warn!("Refusing to modify reserved folder '{}'", id);
        return Err(JotError::ReservedFolder { id: id.to_string() });
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(JotError::Validation {
            field: "folder name".to_string(),
            message: "name must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}
