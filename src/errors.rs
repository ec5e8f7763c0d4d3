//! Error types for the jotter application.
//!
//! This module defines custom error types that categorize the failures
//! that can occur while managing notes, folders and their persisted state.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::Screen;

/// The main error type for the jotter application.
#[derive(Error, Debug)]
pub enum JotError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Note was not found when performing an operation.
    #[error("Note not found: {id}")]
    NoteNotFound { id: String },

    /// Folder was not found when performing an operation.
    #[error("Folder not found: {id}")]
    FolderNotFound { id: String },

    /// The reserved "all notes" folder cannot be renamed or deleted.
    #[error("Folder '{id}' is reserved and cannot be modified")]
    ReservedFolder { id: String },

    /// A required field was empty or otherwise unusable.
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// The navigation state machine refused a transition.
    #[error("Cannot {action} from the {from} screen")]
    InvalidTransition { from: Screen, action: String },

    /// Reading or writing a persisted key failed.
    #[error("Storage error for key '{key}': {message}")]
    Storage { key: String, message: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    /// file not found
    #[error("File not found: {file_path}")]
    FileNotFound { file_path: String },

    #[error("{message}")]
    EditorError { message: String },

    /// Generic application error with a custom message.
    #[error("{message}")]
    ApplicationError { message: String },
}
