//! Terminal front-end: one-shot subcommands and the interactive shell.
mod app;
mod args;
mod editor;
mod render;
mod shell;

pub use app::*;
pub use args::*;
pub use shell::run_shell;
