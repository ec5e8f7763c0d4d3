//! Application state and the commands the front-end issues against it.
//!
//! [`Notebook`] owns the note store, the folder store, the navigation state
//! and the theme. Every mutation is applied in memory first and then written
//! through to persistence. If the write fails the error is returned, the
//! in-memory change stays applied and the next successful write catches up.
use log::{debug, info};

use crate::{
    Folder, FolderStore, JotError, KeyValueStore, Navigator, Note, NoteDraft, NotePatch, NoteStore,
    Persistence, Result, Screen, Theme, ALL_FOLDER_ID,
};

pub struct Notebook<S: KeyValueStore> {
    persistence: Persistence<S>,
    notes: NoteStore,
    folders: FolderStore,
    navigator: Navigator,
    theme: Theme,
}

impl<S: KeyValueStore> Notebook<S> {
    /// Loads the persisted state from `store`, falling back to seed data.
    pub fn open(store: S) -> Self {
        let persistence = Persistence::new(store);
        let notes = NoteStore::new(persistence.load_notes());
        let mut folders = FolderStore::new(persistence.load_folders());
        folders.refresh_counts(notes.notes());
        let theme = persistence.load_theme();

        info!(
            "Opened notebook with {} notes, {} folders, theme {}",
            notes.len(),
            folders.len(),
            theme
        );

        Self {
            persistence,
            notes,
            folders,
            navigator: Navigator::new(),
            theme,
        }
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    pub fn folders(&self) -> &FolderStore {
        &self.folders
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.navigator.selected_note_id().and_then(|id| self.notes.find(id))
    }

    pub fn editing_note(&self) -> Option<&Note> {
        self.navigator.editing_note_id().and_then(|id| self.notes.find(id))
    }

    // ---------------------------------------------------------------------
    // Screen-driven commands
    // ---------------------------------------------------------------------

    /// Creates a blank note and opens it in the editor.
    pub fn new_note(&mut self) -> Result<String> {
        // A refused create must not leave a note behind
        if self.navigator.screen() != Screen::Home {
            return Err(JotError::InvalidTransition {
                from: self.navigator.screen(),
                action: "create a note".to_string(),
            });
        }
        let id = self.create_note(NoteDraft::default())?;
        self.navigator.start_editing(&id)?;
        Ok(id)
    }

    /// Saves `patch` over the note being edited and shows its preview.
    pub fn save_editing(&mut self, patch: NotePatch) -> Result<String> {
        let editing = self.navigator.editing_note_id().map(str::to_string);
        let id = match editing {
            Some(id) if self.navigator.screen() == Screen::Editor => id,
            _ => return self.navigator.save(),
        };

        self.update_note(&id, patch)?;
        self.navigator.save()
    }

    /// Opens the preview of the note with `id`.
    pub fn open_note(&mut self, id: &str) -> Result<()> {
        self.notes.get(id)?;
        self.navigator.select(id)
    }

    /// Starts editing the previewed note.
    pub fn edit_selected(&mut self) -> Result<String> {
        self.navigator.edit()
    }

    /// Deletes the previewed note and returns home.
    pub fn delete_selected(&mut self) -> Result<Note> {
        let id = self.require_selected()?;
        let note = self.notes.delete(&id)?;
        self.navigator.delete()?;
        self.persist_notes()?;
        Ok(note)
    }

    pub fn toggle_pin_selected(&mut self) -> Result<bool> {
        let id = self.require_selected()?;
        self.toggle_pin(&id)
    }

    /// Duplicates the previewed note; the preview stays on the original.
    pub fn duplicate_selected(&mut self) -> Result<String> {
        let id = self.require_selected()?;
        self.duplicate_note(&id)
    }

    /// Sets the active query and returns the matching notes.
    pub fn search(&mut self, query: &str) -> Vec<&Note> {
        self.navigator.set_search_query(query);
        self.notes.search(query)
    }

    /// Notes shown on the home screen: pinned first, filtered by the query.
    pub fn visible_notes(&self) -> Vec<&Note> {
        let query = self.navigator.search_query();
        self.notes
            .pinned_first()
            .into_iter()
            .filter(|n| query.is_empty() || n.matches(query))
            .collect()
    }

    pub fn navigate(&mut self, screen: Screen) -> Result<()> {
        self.navigator.navigate(screen)
    }

    pub fn back(&mut self) {
        self.navigator.back();
    }

    // ---------------------------------------------------------------------
    // Direct store commands
    // ---------------------------------------------------------------------

    /// Creates a note. Filing it under `"all"` is the same as no folder.
    pub fn create_note(&mut self, mut draft: NoteDraft) -> Result<String> {
        if draft.folder_id.as_deref() == Some(ALL_FOLDER_ID) {
            draft.folder_id = None;
        }
        let id = self.notes.create(draft);
        self.persist_notes()?;
        Ok(id)
    }

    pub fn update_note(&mut self, id: &str, patch: NotePatch) -> Result<&Note> {
        self.notes.update(id, patch)?;
        self.persist_notes()?;
        self.notes.get(id)
    }

    /// Deletes a note by id. If it was open, the navigation returns home.
    pub fn delete_note(&mut self, id: &str) -> Result<Note> {
        let note = self.notes.delete(id)?;
        let was_open = self.navigator.selected_note_id() == Some(id)
            || self.navigator.editing_note_id() == Some(id);
        if was_open {
            self.navigator.back();
        }
        self.persist_notes()?;
        Ok(note)
    }

    pub fn toggle_pin(&mut self, id: &str) -> Result<bool> {
        let is_pinned = self.notes.toggle_pin(id)?;
        self.persist_notes()?;
        Ok(is_pinned)
    }

    pub fn duplicate_note(&mut self, id: &str) -> Result<String> {
        let copy_id = self.notes.duplicate(id)?;
        self.persist_notes()?;
        Ok(copy_id)
    }

    /// Files a note under `folder_id`, or under no folder for `None`.
    ///
    /// The folder must exist at the time of the move. Later folder deletion
    /// does not touch the note. Moving to the "all" folder clears the folder.
    pub fn move_note(&mut self, id: &str, folder_id: Option<&str>) -> Result<&Note> {
        let folder_id = folder_id.filter(|f| *f != ALL_FOLDER_ID);
        if let Some(folder_id) = folder_id {
            self.folders.get(folder_id)?;
        }
        self.update_note(id, NotePatch::default().folder(folder_id.map(str::to_string)))
    }

    pub fn create_folder(&mut self, name: &str, color: &str) -> Result<String> {
        let id = self.folders.create(name, color)?;
        self.persist_folders()?;
        Ok(id)
    }

    pub fn rename_folder(&mut self, id: &str, name: &str) -> Result<()> {
        self.folders.rename(id, name)?;
        self.persist_folders()
    }

    pub fn delete_folder(&mut self, id: &str) -> Result<Folder> {
        let folder = self.folders.delete(id)?;
        self.persist_folders()?;
        Ok(folder)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        self.persistence.save_theme(theme)
    }

    fn require_selected(&self) -> Result<String> {
        if self.navigator.screen() != Screen::Preview {
            return Err(JotError::InvalidTransition {
                from: self.navigator.screen(),
                action: "act on a note without previewing it".to_string(),
            });
        }
        self.navigator
            .selected_note_id()
            .map(str::to_string)
            .ok_or_else(|| JotError::InvalidTransition {
                from: self.navigator.screen(),
                action: "act without a selected note".to_string(),
            })
    }

    fn persist_notes(&mut self) -> Result<()> {
        self.folders.refresh_counts(self.notes.notes());
        debug!("Writing {} notes", self.notes.len());
        self.persistence.save_notes(self.notes.notes())
    }

    fn persist_folders(&mut self) -> Result<()> {
        self.folders.refresh_counts(self.notes.notes());
        self.persistence.save_folders(self.folders.folders())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, NOTES_KEY};

    fn empty_notebook() -> Notebook<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set(NOTES_KEY, "[]").unwrap();
        Notebook::open(store)
    }

    #[test]
    fn opens_with_seed_data() {
        let notebook = Notebook::open(MemoryStore::new());
        assert!(!notebook.notes().is_empty());
        assert_eq!(
            notebook.folders().get(ALL_FOLDER_ID).unwrap().note_count,
            notebook.notes().len()
        );
        assert_eq!(notebook.theme(), Theme::System);
        assert_eq!(notebook.navigator().screen(), Screen::Home);
    }

    #[test]
    fn new_note_is_written_through() {
        let mut notebook = empty_notebook();
        let id = notebook.new_note().unwrap();

        assert_eq!(notebook.navigator().screen(), Screen::Editor);
        assert_eq!(notebook.editing_note().unwrap().id, id);

        let stored = notebook.persistence().load_notes();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id);
    }

    #[test]
    fn refused_new_note_creates_nothing() {
        let mut notebook = empty_notebook();
        notebook.navigate(Screen::Settings).unwrap();

        assert!(matches!(notebook.new_note(), Err(JotError::InvalidTransition { .. })));
        assert!(notebook.notes().is_empty());
    }

    #[test]
    fn save_editing_updates_and_previews() {
        let mut notebook = empty_notebook();
        let id = notebook.new_note().unwrap();

        let saved = notebook
            .save_editing(NotePatch::default().title("Groceries").content("milk, eggs"))
            .unwrap();
        assert_eq!(saved, id);
        assert_eq!(notebook.navigator().screen(), Screen::Preview);
        assert_eq!(notebook.selected_note().unwrap().title, "Groceries");
    }

    #[test]
    fn save_editing_without_editor_is_refused() {
        let mut notebook = empty_notebook();
        let err = notebook.save_editing(NotePatch::default().title("x")).unwrap_err();
        assert!(matches!(err, JotError::InvalidTransition { from: Screen::Home, .. }));
    }

    #[test]
    fn delete_selected_returns_home() {
        let mut notebook = empty_notebook();
        let id = notebook.create_note(NoteDraft::new("a", "")).unwrap();
        notebook.open_note(&id).unwrap();

        let removed = notebook.delete_selected().unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(notebook.navigator().screen(), Screen::Home);
        assert!(notebook.notes().find(&id).is_none());
        assert!(notebook.persistence().load_notes().is_empty());
    }

    #[test]
    fn open_missing_note_is_an_error() {
        let mut notebook = empty_notebook();
        assert!(matches!(notebook.open_note("ghost"), Err(JotError::NoteNotFound { .. })));
        assert_eq!(notebook.navigator().screen(), Screen::Home);
    }

    #[test]
    fn notes_created_under_all_have_no_folder() {
        let mut notebook = empty_notebook();
        let id = notebook.create_note(NoteDraft::new("loose", "").folder(ALL_FOLDER_ID)).unwrap();
        assert_eq!(notebook.notes().get(&id).unwrap().folder_id, None);

        let moved = notebook.move_note(&id, Some(ALL_FOLDER_ID)).unwrap();
        assert_eq!(moved.folder_id, None);
    }

    #[test]
    fn visible_notes_follow_query_and_pins() {
        let mut notebook = empty_notebook();
        let a = notebook.create_note(NoteDraft::new("alpha", "eggs")).unwrap();
        let b = notebook.create_note(NoteDraft::new("beta", "")).unwrap();
        notebook.toggle_pin(&a).unwrap();

        let ids: Vec<&str> = notebook.visible_notes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec![a.as_str(), b.as_str()]);

        assert_eq!(notebook.search("EGG").len(), 1);
        assert_eq!(notebook.visible_notes().len(), 1);

        notebook.back();
        assert_eq!(notebook.visible_notes().len(), 2);
    }

    #[test]
    fn folder_counts_follow_note_moves() {
        let mut notebook = empty_notebook();
        let folder = notebook.create_folder("Work", "#3b82f6").unwrap();
        let note = notebook.create_note(NoteDraft::new("a", "")).unwrap();

        notebook.move_note(&note, Some(&folder)).unwrap();
        assert_eq!(notebook.folders().get(&folder).unwrap().note_count, 1);

        assert!(matches!(
            notebook.move_note(&note, Some("missing")),
            Err(JotError::FolderNotFound { .. })
        ));

        notebook.move_note(&note, None).unwrap();
        assert_eq!(notebook.folders().get(&folder).unwrap().note_count, 0);
    }

    #[test]
    fn deleting_folder_keeps_note_reference() {
        let mut notebook = empty_notebook();
        let folder = notebook.create_folder("Work", "#3b82f6").unwrap();
        let note = notebook.create_note(NoteDraft::new("a", "").folder(folder.clone())).unwrap();

        notebook.delete_folder(&folder).unwrap();
        assert_eq!(notebook.notes().get(&note).unwrap().folder_id.as_deref(), Some(folder.as_str()));
    }

    #[test]
    fn theme_is_persisted() {
        let mut notebook = empty_notebook();
        notebook.set_theme(Theme::Light).unwrap();
        assert_eq!(notebook.persistence().load_theme(), Theme::Light);
    }
}
