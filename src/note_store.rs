//! Ordered in-memory collection of notes.
//!
//! The store is the only place notes are mutated. Newest notes sit at the
//! front; updates keep a note's position.
use log::{debug, info, trace};

use crate::{JotError, Note, NoteDraft, NotePatch, Result, ALL_FOLDER_ID};

#[derive(Debug, Clone, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
}

impl NoteStore {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Creates a note from `draft` and inserts it first. Returns the new id.
    pub fn create(&mut self, draft: NoteDraft) -> String {
        let note = Note::new(draft);
        let id = note.id.clone();
        info!("Creating note: {}", id);

        self.notes.insert(0, note);
        id
    }

    /// Merges `patch` over the note with `id`, preserving its position
    pub fn update(&mut self, id: &str, patch: NotePatch) -> Result<&Note> {
        info!("Updating note: {}", id);
        let note = self.find_mut(id)?;
        note.apply(patch);
        trace!("Note {} updated at {}", note.id, note.updated_at);
        Ok(&*note)
    }

    /// Removes the note with `id` and returns it.
    pub fn delete(&mut self, id: &str) -> Result<Note> {
        info!("Deleting note: {}", id);
        let index = self.position(id)?;
        Ok(self.notes.remove(index))
    }

    /// Flips the pinned flag and returns its new value
    pub fn toggle_pin(&mut self, id: &str) -> Result<bool> {
        let note = self.find_mut(id)?;
        let is_pinned = !note.is_pinned;
        note.apply(NotePatch::default().pinned(is_pinned));

        debug!("Note {} pinned: {}", id, is_pinned);
        Ok(is_pinned)
    }

    /// Copies the note with `id` to the front of the collection.
    pub fn duplicate(&mut self, id: &str) -> Result<String> {
        let copy = self.get(id)?.duplicate();
        let copy_id = copy.id.clone();
        info!("Duplicated note {} as {}", id, copy_id);

        self.notes.insert(0, copy);
        Ok(copy_id)
    }

    /// Notes whose title or content contains `query`, ignoring case.
    ///
    /// An empty query returns every note. This is a linear scan.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        if query.is_empty() {
            return self.notes.iter().collect();
        }

        let results: Vec<&Note> = self.notes.iter().filter(|n| n.matches(query)).collect();
        debug!("Search '{}' matched {} of {} notes", query, results.len(), self.notes.len());
        results
    }

    pub fn find(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Like [`find`](Self::find) but reports a missing note as an error
    pub fn get(&self, id: &str) -> Result<&Note> {
        self.find(id).ok_or_else(|| JotError::NoteNotFound { id: id.to_string() })
    }

    /// Resolves a full id or an unambiguous id prefix to a note
    pub fn resolve(&self, reference: &str) -> Result<&Note> {
        if let Some(note) = self.find(reference) {
            return Ok(note);
        }

        let mut candidates = self.notes.iter().filter(|n| n.id.starts_with(reference));
        match (candidates.next(), candidates.next()) {
            (Some(note), None) if !reference.is_empty() => Ok(note),
            (Some(_), Some(_)) => Err(JotError::Validation {
                field: "note id".to_string(),
                message: format!("'{}' matches more than one note", reference),
            }),
            _ => Err(JotError::NoteNotFound {
                id: reference.to_string(),
            }),
        }
    }

    /// Notes carrying `tag`, compared trimmed and case-insensitively.
    pub fn with_tag(&self, tag: &str) -> Vec<&Note> {
        let wanted = tag.trim().to_lowercase();
        self.notes
            .iter()
            .filter(|n| n.tags.iter().any(|t| t.trim().to_lowercase() == wanted))
            .collect()
    }

    /// Notes filed under `folder_id`; the reserved folder yields all notes.
    pub fn in_folder(&self, folder_id: &str) -> Vec<&Note> {
        if folder_id == ALL_FOLDER_ID {
            return self.notes.iter().collect();
        }
        self.notes
            .iter()
            .filter(|n| n.folder_id.as_deref() == Some(folder_id))
            .collect()
    }

    /// Pinned notes first, otherwise in collection order
    pub fn pinned_first(&self) -> Vec<&Note> {
        let (mut pinned, rest): (Vec<&Note>, Vec<&Note>) =
            self.notes.iter().partition(|n| n.is_pinned);
        pinned.extend(rest);
        pinned
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| JotError::NoteNotFound { id: id.to_string() })
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Note> {
        self.notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| JotError::NoteNotFound { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(titles: &[(&str, &str)]) -> (NoteStore, Vec<String>) {
        let mut store = NoteStore::default();
        let ids = titles
            .iter()
            .map(|(t, c)| store.create(NoteDraft::new(*t, *c)))
            .collect();
        (store, ids)
    }

    #[test]
    fn create_inserts_at_front() {
        let (store, ids) = store_with(&[("first", ""), ("second", "")]);
        assert_eq!(store.notes()[0].id, ids[1]);
        assert_eq!(store.notes()[1].id, ids[0]);

        let newest = &store.notes()[0];
        assert_eq!(newest.created_at, newest.updated_at);
        assert!(newest.tags.is_empty());
    }

    #[test]
    fn create_allows_duplicate_titles() {
        let (store, ids) = store_with(&[("same", ""), ("same", "")]);
        assert_eq!(store.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn update_preserves_order_and_identity() {
        let (mut store, ids) = store_with(&[("a", ""), ("b", ""), ("c", "")]);
        let before = store.get(&ids[1]).unwrap().clone();

        let updated = store.update(&ids[1], NotePatch::default().content("changed")).unwrap();
        assert_eq!(updated.id, before.id);
        assert_eq!(updated.created_at, before.created_at);
        assert!(updated.updated_at >= before.updated_at);

        let order: Vec<&str> = store.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(order, vec!["c", "b", "a"]);
    }

    #[test]
    fn update_missing_note_is_an_error() {
        let (mut store, _) = store_with(&[("a", "")]);
        let err = store.update("nope", NotePatch::default().title("x")).unwrap_err();
        assert!(matches!(err, JotError::NoteNotFound { id } if id == "nope"));
    }

    #[test]
    fn delete_then_find_is_none() {
        let (mut store, ids) = store_with(&[("a", ""), ("b", "")]);
        let removed = store.delete(&ids[0]).unwrap();
        assert_eq!(removed.title, "a");
        assert!(store.find(&ids[0]).is_none());
        assert!(matches!(store.delete(&ids[0]), Err(JotError::NoteNotFound { .. })));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn toggle_pin_twice_restores_flag() {
        let (mut store, ids) = store_with(&[("a", "")]);
        let start = store.get(&ids[0]).unwrap().updated_at;

        assert!(store.toggle_pin(&ids[0]).unwrap());
        let mid = store.get(&ids[0]).unwrap().updated_at;
        assert!(!store.toggle_pin(&ids[0]).unwrap());
        let end = store.get(&ids[0]).unwrap().updated_at;

        assert!(!store.get(&ids[0]).unwrap().is_pinned);
        assert!(mid >= start && end >= mid);
    }

    #[test]
    fn duplicate_goes_first_and_leaves_source_alone() {
        let (mut store, ids) = store_with(&[("Plan", "step one"), ("other", "")]);
        let source = store.get(&ids[0]).unwrap().clone();

        let copy_id = store.duplicate(&ids[0]).unwrap();
        let copy = &store.notes()[0];
        assert_eq!(copy.id, copy_id);
        assert_ne!(copy.id, source.id);
        assert_eq!(copy.title, "Plan (copy)");
        assert_eq!(copy.content, "step one");
        assert_eq!(store.get(&ids[0]).unwrap(), &source);
        assert!(store.duplicate("missing").is_err());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let (store, ids) = store_with(&[("Groceries", "milk, eggs"), ("Work", "Egg timer"), ("Misc", "")]);

        assert_eq!(store.search("").len(), 3);

        let hits: Vec<&str> = store.search("EGG").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(hits, vec![ids[1].as_str(), ids[0].as_str()]);

        assert_eq!(store.search("groc").len(), 1);
        assert!(store.search("bread").is_empty());
    }

    #[test]
    fn filters_by_tag_and_folder() {
        let mut store = NoteStore::default();
        let a = store.create(NoteDraft::new("a", "").tags(vec![" Work ".into()]).folder("f1"));
        store.create(NoteDraft::new("b", "").tags(vec!["home".into()]));

        let tagged: Vec<&str> = store.with_tag("work").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(tagged, vec![a.as_str()]);
        assert_eq!(store.in_folder("f1").len(), 1);
        assert_eq!(store.in_folder(ALL_FOLDER_ID).len(), 2);
        assert!(store.in_folder("f2").is_empty());
    }

    #[test]
    fn resolve_accepts_unique_prefixes() {
        let mut store = NoteStore::new(vec![
            Note { id: "abc123".into(), ..Note::new(NoteDraft::new("one", "")) },
            Note { id: "abd456".into(), ..Note::new(NoteDraft::new("two", "")) },
        ]);
        store.create(NoteDraft::new("three", ""));

        assert_eq!(store.resolve("abc123").unwrap().title, "one");
        assert_eq!(store.resolve("abd").unwrap().title, "two");
        assert!(matches!(store.resolve("ab"), Err(JotError::Validation { .. })));
        assert!(matches!(store.resolve("zzz"), Err(JotError::NoteNotFound { .. })));
        assert!(store.resolve("").is_err());
    }

    #[test]
    fn pinned_first_is_stable() {
        let (mut store, ids) = store_with(&[("a", ""), ("b", ""), ("c", "")]);
        store.toggle_pin(&ids[0]).unwrap();

        let order: Vec<&str> = store.pinned_first().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(order, vec!["a", "c", "b"]);
    }
}
