//! Core data structures for notes and folders.
//!
//! Both types serialize with camelCase field names so the persisted JSON
//! matches the layout the application has always written.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id of the implicit "All Notes" folder.
pub const ALL_FOLDER_ID: &str = "all";

/// Suffix appended to the title of a duplicated note.
pub const COPY_MARKER: &str = " (copy)";

/// Represents a single note in our system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier for the note
    pub id: String,
    /// Note title
    pub title: String,
    /// Note body
    pub content: String,
    /// Pinned notes are listed before the rest
    #[serde(default)]
    pub is_pinned: bool,
    /// Folder the note is filed under, if any
    #[serde(default)]
    pub folder_id: Option<String>,
    /// Tags for organization
    #[serde(default)]
    pub tags: Vec<String>,
    /// When the note was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a new note from a draft with a fresh id and timestamps.
    pub fn new(draft: NoteDraft) -> Self {
        let now = Utc::now();

        Note {
            id: generate_id(),
            title: draft.title,
            content: draft.content,
            is_pinned: false,
            folder_id: draft.folder_id,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bumps `updated_at`, never moving it backwards.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }

    /// Applies the fields present in `patch` and touches the note.
    pub fn apply(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(is_pinned) = patch.is_pinned {
            self.is_pinned = is_pinned;
        }
        if let Some(folder_id) = patch.folder_id {
            self.folder_id = folder_id;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        self.touch();
    }

    /// Builds a copy with a new id, a marked title and fresh timestamps.
    pub fn duplicate(&self) -> Self {
        let now = Utc::now();
        Note {
            id: generate_id(),
            title: format!("{}{}", self.title, COPY_MARKER),
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }

    /// Case-insensitive substring match on title or content.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.content.to_lowercase().contains(&needle)
    }
}

/// Initial fields for a note that is about to be created.
#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub folder_id: Option<String>,
    pub tags: Vec<String>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Partial update of a note. `None` leaves a field untouched.
///
/// `folder_id` is doubly optional: `Some(None)` files the note under no folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_pinned: Option<bool>,
    pub folder_id: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl NotePatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = Some(is_pinned);
        self
    }

    pub fn folder(mut self, folder_id: Option<String>) -> Self {
        self.folder_id = Some(folder_id);
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == NotePatch::default()
    }
}

/// A folder notes can be filed under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    /// Display color as `#rrggbb`
    pub color: String,
    /// Derived from the notes; recomputed by the folder store
    #[serde(default)]
    pub note_count: usize,
}

impl Folder {
    pub fn new(name: String, color: String) -> Self {
        Folder {
            id: generate_id(),
            name,
            color,
            note_count: 0,
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.id == ALL_FOLDER_ID
    }
}

/// Generates a collision-resistant identifier for notes and folders
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Note {
        Note::new(NoteDraft::new("Groceries", "milk, eggs").tags(vec!["home".into()]))
    }

    #[test]
    fn new_note_has_equal_timestamps_and_defaults() {
        let note = sample();
        assert_eq!(note.created_at, note.updated_at);
        assert!(!note.is_pinned);
        assert!(note.folder_id.is_none());
        assert!(!note.id.is_empty());
    }

    #[test]
    fn apply_keeps_identity_and_advances_updated_at() {
        let mut note = sample();
        let (id, created, before) = (note.id.clone(), note.created_at, note.updated_at);

        note.apply(NotePatch::default().title("Shopping").folder(Some("work".into())));

        assert_eq!(note.id, id);
        assert_eq!(note.created_at, created);
        assert!(note.updated_at >= before);
        assert_eq!(note.title, "Shopping");
        assert_eq!(note.content, "milk, eggs");
        assert_eq!(note.folder_id.as_deref(), Some("work"));
    }

    #[test]
    fn duplicate_gets_new_identity() {
        let note = sample();
        let copy = note.duplicate();
        assert_ne!(copy.id, note.id);
        assert_eq!(copy.title, "Groceries (copy)");
        assert_eq!(copy.content, note.content);
        assert_eq!(copy.tags, note.tags);
        assert!(copy.created_at >= note.created_at);
    }

    #[test]
    fn matches_ignores_case() {
        let note = sample();
        assert!(note.matches("EGG"));
        assert!(note.matches("grocer"));
        assert!(!note.matches("bread"));
    }

    #[test]
    fn deserializes_js_iso_timestamps() {
        let json = r#"{
            "id": "1700000000000",
            "title": "Hello",
            "content": "",
            "isPinned": true,
            "folderId": null,
            "tags": ["a", "a"],
            "createdAt": "2024-01-05T10:00:00.000Z",
            "updatedAt": "2024-01-06T10:00:00.000Z"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert!(note.is_pinned);
        assert_eq!(note.tags, vec!["a", "a"]);
        assert!(note.created_at < note.updated_at);
    }
}
