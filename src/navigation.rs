//! Screen navigation state.
//!
//! Tracks which screen is active and which note is selected or being edited.
//! Transitions are driven entirely by the caller; refused transitions return
//! [`JotError::InvalidTransition`] and leave the state untouched.
use std::fmt;

use log::debug;

use crate::{JotError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Editor,
    Preview,
    Folders,
    Settings,
    Search,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Home => "home",
            Screen::Editor => "editor",
            Screen::Preview => "preview",
            Screen::Folders => "folders",
            Screen::Settings => "settings",
            Screen::Search => "search",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    screen: Screen,
    selected_note_id: Option<String>,
    editing_note_id: Option<String>,
    search_query: String,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected_note_id(&self) -> Option<&str> {
        self.selected_note_id.as_deref()
    }

    pub fn editing_note_id(&self) -> Option<&str> {
        self.editing_note_id.as_deref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Opens the editor on a freshly created note (`home -> editor`).
    pub fn start_editing(&mut self, note_id: &str) -> Result<()> {
        self.require(Screen::Home, "create a note")?;
        self.editing_note_id = Some(note_id.to_string());
        self.go(Screen::Editor);
        Ok(())
    }

    /// Shows a note from the list or from search results (`-> preview`).
    pub fn select(&mut self, note_id: &str) -> Result<()> {
        if !matches!(self.screen, Screen::Home | Screen::Search) {
            return Err(self.refuse("open a note"));
        }
        self.selected_note_id = Some(note_id.to_string());
        self.go(Screen::Preview);
        Ok(())
    }

    /// Edits the previewed note (`preview -> editor`).
    pub fn edit(&mut self) -> Result<String> {
        self.require(Screen::Preview, "edit")?;
        let id = self
            .selected_note_id
            .clone()
            .ok_or_else(|| self.refuse("edit without a selected note"))?;

        self.editing_note_id = Some(id.clone());
        self.go(Screen::Editor);
        Ok(id)
    }

    /// Leaves the editor after a save; the edited note becomes the selection.
    pub fn save(&mut self) -> Result<String> {
        self.require(Screen::Editor, "save")?;
        let id = self
            .editing_note_id
            .take()
            .ok_or_else(|| self.refuse("save without a note being edited"))?;

        self.selected_note_id = Some(id.clone());
        self.go(Screen::Preview);
        Ok(id)
    }

    /// Leaves the preview of a deleted note (`preview -> home`).
    pub fn delete(&mut self) -> Result<String> {
        self.require(Screen::Preview, "delete")?;
        let id = self
            .selected_note_id
            .take()
            .ok_or_else(|| self.refuse("delete without a selected note"))?;

        self.go(Screen::Home);
        Ok(id)
    }

    /// Returns home from anywhere, clearing selection, edit target and query.
    pub fn back(&mut self) {
        self.selected_note_id = None;
        self.editing_note_id = None;
        self.search_query.clear();
        self.go(Screen::Home);
    }

    /// Jumps to a top-level screen. Editor and preview need a target note.
    pub fn navigate(&mut self, screen: Screen) -> Result<()> {
        if matches!(screen, Screen::Editor | Screen::Preview) {
            return Err(self.refuse(&format!("navigate to {} directly", screen)));
        }
        self.go(screen);
        Ok(())
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
    }

    fn require(&self, screen: Screen, action: &str) -> Result<()> {
        if self.screen != screen {
            return Err(self.refuse(action));
        }
        Ok(())
    }

    fn refuse(&self, action: &str) -> JotError {
        debug!("Refused transition: {} from {}", action, self.screen);
        JotError::InvalidTransition {
            from: self.screen,
            action: action.to_string(),
        }
    }

    fn go(&mut self, screen: Screen) {
        debug!("Navigating {} -> {}", self.screen, screen);
        self.screen = screen;
    }
}
