//! Local note-taking application library
//!
//! This library provides the note and folder data model, the stores that
//! mutate it, write-through persistence to a key-value store, and the
//! navigation state used by the terminal front-end.

mod cli;
mod config;
mod errors;
mod folder_store;
mod helper;
mod navigation;
mod note;
mod note_store;
mod notebook;
mod seed;
mod storage;
mod types;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use folder_store::*;
pub use helper::*;
pub use navigation::*;
pub use note::*;
pub use note_store::*;
pub use notebook::*;
pub use seed::*;
pub use storage::*;
pub use types::*;
