//! Shared types for the jotter application.
//!
//! This module contains the Result alias, the theme preference and the
//! command-line subcommands.
use std::{fmt, path::PathBuf, str::FromStr};

use clap::{Subcommand, ValueEnum};

use crate::JotError;

/// A specialized Result type for jotter operations.
pub type Result<T> = std::result::Result<T, JotError>;

/// Color scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = JotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(JotError::Validation {
                field: "theme".to_string(),
                message: format!("'{}' is not one of light, dark, system", other),
            }),
        }
    }
}

/// Available subcommands for the jotter application
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    Create {
        /// Title of the note
        #[clap(short = 'T', long, default_value = "")]
        title: String,

        /// Content of the note
        #[clap(short, long)]
        content: Option<String>,

        /// Open content in editor before saving
        #[clap(short, long)]
        edit: bool,

        /// Tags to associate with the note (comma-separated)
        #[clap(short = 't', long)]
        tags: Option<String>,

        /// Folder to file the note under
        #[clap(short = 'F', long)]
        folder: Option<String>,

        /// Path to a file containing the note's content
        #[clap(short, long)]
        file: Option<PathBuf>,
    },

    /// View a note by ID
    View {
        /// ID of the note to view
        id: String,

        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// List notes with optional filtering
    List {
        /// Filter notes by tag
        #[clap(short, long)]
        tag: Option<String>,

        /// Filter notes by folder id
        #[clap(short = 'F', long)]
        folder: Option<String>,

        /// Only show pinned notes
        #[clap(short, long)]
        pinned: bool,

        /// Limit the number of notes returned (defaults to the configured limit)
        #[clap(short = 'n', long)]
        limit: Option<usize>,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,

        /// Only show note IDs and titles
        #[clap(short, long)]
        brief: bool,
    },

    /// Search notes by title or content
    Search {
        /// Search query text
        query: String,

        /// Limit the number of search results (0 means no limit)
        #[clap(short = 'n', long, default_value_t = 0)]
        limit: usize,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Edit an existing note
    Edit {
        /// ID of the note to edit
        id: String,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New content for the note
        #[clap(short, long)]
        content: Option<String>,

        /// Open content in editor before saving
        #[clap(short, long)]
        edit: bool,

        /// Replace the note's tags (comma-separated)
        #[clap(short = 't', long)]
        tags: Option<String>,

        /// Path to a file containing the new note content
        #[clap(short, long)]
        file: Option<PathBuf>,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Pin or unpin a note
    Pin {
        /// ID of the note to toggle
        id: String,
    },

    /// Duplicate a note
    Duplicate {
        /// ID of the note to copy
        id: String,
    },

    /// File a note under a folder
    Move {
        /// ID of the note to move
        id: String,

        /// Target folder id; omit to remove the note from its folder
        folder: Option<String>,
    },

    /// Tag operations (add, remove, list)
    Tag {
        /// ID of the note to modify
        id: String,

        /// Tags to add (comma-separated)
        #[clap(short, long)]
        add: Option<String>,

        /// Tags to remove (comma-separated)
        #[clap(short, long)]
        remove: Option<String>,

        /// List all tags for the note
        #[clap(short, long)]
        list: bool,
    },

    /// Folder management
    Folder {
        #[clap(subcommand)]
        action: FolderCommand,
    },

    /// Show or change the color theme
    Theme {
        /// New theme; omit to show the current one
        #[clap(value_enum)]
        theme: Option<Theme>,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Update a configuration setting (key=value)
        #[clap(short, long)]
        set: Option<String>,

        /// Reset configuration to defaults
        #[clap(short, long)]
        reset: bool,
    },

    /// Start an interactive session
    Shell,
}

#[derive(Subcommand)]
pub enum FolderCommand {
    /// List folders with their note counts
    List {
        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Create a folder
    Create {
        /// Folder name
        name: String,

        /// Display color (#rrggbb), defaults to the configured color
        #[clap(short, long)]
        color: Option<String>,
    },

    /// Rename a folder
    Rename {
        /// ID of the folder
        id: String,

        /// New name
        name: String,
    },

    /// Delete a folder; notes filed under it are kept
    Delete {
        /// ID of the folder
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },
}
