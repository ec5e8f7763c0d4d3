//! CLI module for the jotter application
//!
//! This module handles the one-shot subcommands. Each handler issues commands
//! to the [`Notebook`] and prints the result.
use std::{
    fs::read_to_string,
    io::{stdin, stdout, Write},
    path::{Path, PathBuf},
};

use log::info;

use super::{editor::edit_in_editor, render};
use crate::{
    add_tags, is_hex_color, parse_tags, remove_tags, run_shell, Commands, Config, FileStore,
    FolderCommand, JotError, NoteDraft, NotePatch, Notebook, Result, Theme,
};

/// CLI Application handler - processes CLI commands and interfaces with the notebook
pub struct App {
    /// The notebook backed by the data directory
    notebook: Notebook<FileStore>,

    /// Application configuration
    config: Config,

    /// Where `config --set/--reset` write to
    config_path: PathBuf,

    /// Whether to display verbose output
    verbose: bool,
}

impl App {
    /// Create a new CLI application over `notebook`
    pub fn new(notebook: Notebook<FileStore>, config: Config, config_path: PathBuf, verbose: bool) -> Self {
        Self {
            notebook,
            config,
            config_path,
            verbose,
        }
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Create {
                title,
                content,
                edit,
                tags,
                folder,
                file,
            } => self.create_note(title, content, edit, tags, folder, file)?,

            Commands::View { id, json } => self.view_note(&id, json)?,

            Commands::List {
                tag,
                folder,
                pinned,
                limit,
                json,
                brief,
            } => self.list_notes(tag, folder, pinned, limit, json, brief)?,

            Commands::Search { query, limit, json } => self.handle_search(&query, limit, json)?,

            Commands::Edit {
                id,
                title,
                content,
                edit,
                tags,
                file,
            } => self.handle_edit(&id, title, content, edit, tags, file)?,

            Commands::Delete { id, force } => self.handle_delete(&id, force)?,

            Commands::Pin { id } => {
                let id = self.resolve(&id)?;
                let pinned = self.notebook.toggle_pin(&id)?;
                println!("Note {} {}", id, if pinned { "pinned" } else { "unpinned" });
            }

            Commands::Duplicate { id } => {
                let id = self.resolve(&id)?;
                let copy_id = self.notebook.duplicate_note(&id)?;
                println!("Note duplicated with ID: {}", copy_id);
            }

            Commands::Move { id, folder } => {
                let id = self.resolve(&id)?;
                let note = self.notebook.move_note(&id, folder.as_deref())?;
                match &note.folder_id {
                    Some(folder_id) => println!("Note {} moved to folder {}", note.id, folder_id),
                    None => println!("Note {} is no longer in a folder", note.id),
                }
            }

            Commands::Tag {
                id,
                add,
                remove,
                list,
            } => self.handle_tag(&id, add, remove, list)?,

            Commands::Folder { action } => self.handle_folder(action)?,

            Commands::Theme { theme } => self.handle_theme(theme)?,

            Commands::Config { show, set, reset } => self.handle_config(show, set, reset)?,

            Commands::Shell => run_shell(&mut self.notebook, &self.config)?,
        }

        Ok(())
    }

    fn resolve(&self, reference: &str) -> Result<String> {
        Ok(self.notebook.notes().resolve(reference)?.id.clone())
    }

    fn create_note(
        &mut self,
        title: String,
        content: Option<String>,
        edit: bool,
        tags: Option<String>,
        folder: Option<String>,
        file: Option<PathBuf>,
    ) -> Result<()> {
        if let Some(folder_id) = &folder {
            self.notebook.folders().get(folder_id)?;
        }

        let mut title = title;
        let mut note_content = content_from(content, file.as_deref())?.unwrap_or_default();

        if edit {
            let (edited_title, edited_content) = edit_in_editor(&self.config, &title, &note_content)?;
            if let Some(edited_title) = edited_title {
                title = edited_title;
            }
            note_content = edited_content;
        }

        let mut draft = NoteDraft::new(title, note_content).tags(parse_tags(tags));
        draft.folder_id = folder;

        let id = self.notebook.create_note(draft)?;
        println!("Note created with ID: {}", id);
        Ok(())
    }

    fn view_note(&self, id: &str, json: bool) -> Result<()> {
        let note = self.notebook.notes().resolve(id)?;
        if json {
            println!("{}", serde_json::to_string_pretty(note)?);
        } else {
            render::print_note(note, self.notebook.folders());
        }
        Ok(())
    }

    /// List notes according to provided filters and options
    fn list_notes(
        &self,
        tag: Option<String>,
        folder: Option<String>,
        pinned: bool,
        limit: Option<usize>,
        json: bool,
        brief: bool,
    ) -> Result<()> {
        let store = self.notebook.notes();

        let mut notes = store.pinned_first();
        if let Some(tag) = &tag {
            let tagged = store.with_tag(tag);
            notes.retain(|n| tagged.iter().any(|t| t.id == n.id));
        }
        if let Some(folder) = &folder {
            self.notebook.folders().get(folder)?;
            let filed = store.in_folder(folder);
            notes.retain(|n| filed.iter().any(|f| f.id == n.id));
        }
        if pinned {
            notes.retain(|n| n.is_pinned);
        }

        let limit = limit.unwrap_or(self.config.list_limit);
        let total = notes.len();
        if limit > 0 && notes.len() > limit {
            notes.truncate(limit);
        }

        if json {
            render::print_notes_json(&notes)?;
        } else {
            render::print_notes_text(&notes, self.notebook.folders(), brief);
            if notes.len() < total {
                println!("Showing {} of {}. Use --limit to show more.", notes.len(), total);
            }
        }
        Ok(())
    }

    fn handle_search(&self, query: &str, limit: usize, json: bool) -> Result<()> {
        let mut results = self.notebook.notes().search(query);

        if limit > 0 && results.len() > limit {
            results.truncate(limit);
        }

        if json {
            render::print_notes_json(&results)?;
        } else if results.is_empty() {
            println!("No notes found matching query: \"{}\"", query);
        } else {
            render::print_notes_text(&results, self.notebook.folders(), false);
        }
        Ok(())
    }

    fn handle_edit(
        &mut self,
        id: &str,
        title: Option<String>,
        content: Option<String>,
        edit: bool,
        tags: Option<String>,
        file: Option<PathBuf>,
    ) -> Result<()> {
        let note = self.notebook.notes().resolve(id)?.clone();
        let mut patch = NotePatch {
            title,
            content: content_from(content, file.as_deref())?,
            tags: tags.map(|t| parse_tags(Some(t))),
            ..Default::default()
        };
        if let Some(file_path) = &file {
            println!("Content updated from file: {}", file_path.display());
        }

        if edit {
            let title = patch.title.as_deref().unwrap_or(&note.title);
            let content = patch.content.as_deref().unwrap_or(&note.content);
            let (edited_title, edited_content) = edit_in_editor(&self.config, title, content)?;
            if edited_title.is_some() {
                patch.title = edited_title;
            }
            patch.content = Some(edited_content);
        }

        if patch.is_empty() {
            return Err(JotError::ApplicationError {
                message: "Nothing to update. Pass --title, --content, --tags, --file or --edit".to_string(),
            });
        }

        let updated = self.notebook.update_note(&note.id, patch)?;
        println!("Note {} updated successfully", updated.id);
        Ok(())
    }

    fn handle_delete(&mut self, id: &str, force: bool) -> Result<()> {
        let note = self.notebook.notes().resolve(id)?.clone();

        if !force {
            println!("You are about to delete the following note:");
            println!("ID:      {}", note.id);
            println!("Title:   {}", note.title);
            println!("Tags:    {}", note.tags.join(", "));
            println!("Created: {}", note.created_at.format("%Y-%m-%d %H:%M:%S"));

            if !note.content.is_empty() {
                let preview = note.content.lines().take(2).collect::<Vec<_>>().join("\n");
                println!("\nContent preview:");
                println!(
                    "{}{}",
                    preview,
                    if note.content.lines().count() > 2 { "..." } else { "" }
                );
            }

            println!("\nThis action cannot be undone!");
            if !confirm("Are you sure you want to delete this note?")? {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        self.notebook.delete_note(&note.id)?;
        println!("Note '{}' ({}) has been permanently deleted.", note.title, note.id);
        Ok(())
    }

    fn handle_tag(&mut self, id: &str, add: Option<String>, remove: Option<String>, list: bool) -> Result<()> {
        let note = self.notebook.notes().resolve(id)?.clone();

        if add.is_some() || remove.is_some() {
            let mut tags = add_tags(note.tags.clone(), parse_tags(add));
            tags = remove_tags(tags, &parse_tags(remove));

            if tags != note.tags {
                self.notebook.update_note(&note.id, NotePatch::default().tags(tags))?;
                println!("Tags updated for note {}", note.id);
            } else if self.verbose {
                println!("Tags unchanged for note {}", note.id);
            }
        }

        if list || self.verbose {
            let current = self.notebook.notes().get(&note.id)?;
            if current.tags.is_empty() {
                println!("Note {} has no tags", current.id);
            } else {
                println!("{}", current.tags.join(", "));
            }
        }
        Ok(())
    }

    fn handle_folder(&mut self, action: FolderCommand) -> Result<()> {
        match action {
            FolderCommand::List { json } => {
                if json {
                    println!("{}", serde_json::to_string_pretty(self.notebook.folders().folders())?);
                } else {
                    render::print_folders(self.notebook.folders());
                }
            }
            FolderCommand::Create { name, color } => {
                let color = color.unwrap_or_else(|| self.config.default_folder_color.clone());
                if !is_hex_color(&color) {
                    return Err(JotError::Validation {
                        field: "color".to_string(),
                        message: format!("'{}' is not a #rrggbb color", color),
                    });
                }
                let id = self.notebook.create_folder(&name, &color)?;
                println!("Folder created with ID: {}", id);
            }
            FolderCommand::Rename { id, name } => {
                self.notebook.rename_folder(&id, &name)?;
                println!("Folder {} renamed to '{}'", id, name.trim());
            }
            FolderCommand::Delete { id, force } => {
                let folder = self.notebook.folders().get(&id)?;
                if !force && !folder.is_reserved() && folder.note_count > 0 {
                    println!(
                        "Folder '{}' has {} notes. They will keep their folder reference.",
                        folder.name, folder.note_count
                    );
                    if !confirm("Delete the folder anyway?")? {
                        println!("Deletion cancelled.");
                        return Ok(());
                    }
                }
                let removed = self.notebook.delete_folder(&id)?;
                println!("Folder '{}' deleted", removed.name);
            }
        }
        Ok(())
    }

    fn handle_theme(&mut self, theme: Option<Theme>) -> Result<()> {
        match theme {
            Some(theme) => {
                self.notebook.set_theme(theme)?;
                println!("Theme set to {}", theme);
            }
            None => println!("{}", self.notebook.theme()),
        }
        Ok(())
    }

    fn handle_config(&mut self, show: bool, set: Option<String>, reset: bool) -> Result<()> {
        let nothing_requested = !show && !reset && set.is_none();

        if reset {
            self.config = Config::default();
            self.config.save(&self.config_path)?;
            println!("Configuration reset to defaults");
        }

        if let Some(assignment) = set {
            self.config.set(&assignment)?;
            self.config.save(&self.config_path)?;
            info!("Configuration updated: {}", assignment);
            println!("Configuration updated");
        }

        if show || nothing_requested {
            println!("Config file: {}", self.config_path.display());
            println!("{}", serde_json::to_string_pretty(&self.config)?);
        }
        Ok(())
    }
}

/// Content given inline or read from a file; passing both is an error
fn content_from(content: Option<String>, file: Option<&Path>) -> Result<Option<String>> {
    match (content, file) {
        (Some(_), Some(_)) => Err(JotError::ApplicationError {
            message: "Cannot specify both --content and --file options".to_string(),
        }),
        (Some(content), None) => Ok(Some(content)),
        (None, Some(file_path)) => read_content_from_file(file_path).map(Some),
        (None, None) => Ok(None),
    }
}

fn read_content_from_file(file_path: &Path) -> Result<String> {
    if !file_path.is_file() {
        return Err(JotError::FileNotFound {
            file_path: file_path.display().to_string(),
        });
    }
    read_to_string(file_path).map_err(JotError::Io)
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N]: ", prompt);
    stdout().flush().map_err(JotError::Io)?;

    let mut input = String::new();
    stdin().read_line(&mut input).map_err(JotError::Io)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}
