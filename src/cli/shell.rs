//! Interactive session driving the navigation state machine.
//!
//! Each input line is split with shell quoting rules and parsed by clap, then
//! applied to the notebook. The current screen is rendered after every command.
use std::io::{stdin, stdout, Write};

use clap::{Parser, Subcommand};
use console::style;
use log::{debug, warn};

use super::{editor::edit_in_editor, render};
use crate::{
    parse_tags, Config, JotError, KeyValueStore, NotePatch, Notebook, Result, Screen, Theme,
};

#[derive(Parser, Debug)]
#[clap(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[clap(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ShellCommand {
    /// Show the note list
    #[clap(alias = "ls")]
    List,

    /// Create a note and open it in the editor
    New,

    /// Preview a note by list number or id
    Open { note: String },

    /// Edit the previewed note
    Edit,

    /// Save the note being edited
    Save {
        #[clap(short = 'T', long)]
        title: Option<String>,

        #[clap(short, long)]
        content: Option<String>,

        /// Replace tags (comma-separated)
        #[clap(short, long)]
        tags: Option<String>,
    },

    /// Edit the note in the external editor, then save it
    Write,

    /// Delete the previewed note
    Delete,

    /// Pin or unpin the previewed note
    Pin,

    /// Duplicate the previewed note
    #[clap(alias = "duplicate")]
    Dup,

    /// Filter notes by title or content
    Search { query: Vec<String> },

    /// Show folders
    Folders,

    /// Show settings
    Settings,

    /// Change the color theme
    Theme {
        #[clap(value_enum)]
        theme: Theme,
    },

    /// Go back to the note list
    Back,

    /// Leave the shell
    #[clap(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

/// Runs the interactive shell until `quit` or end of input
pub fn run_shell<S: KeyValueStore>(notebook: &mut Notebook<S>, config: &Config) -> Result<()> {
    println!("{}", style("jotter shell. Type 'help' for commands.").dim());
    render_screen(notebook, config);

    loop {
        print!("{} ", style(format!("jotter [{}]>", notebook.navigator().screen())).green());
        stdout().flush()?;

        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match parse_line(line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };
        debug!("Shell command: {:?}", command);

        match apply(notebook, config, command) {
            Ok(Flow::Quit) => return Ok(()),
            Ok(Flow::Continue) => render_screen(notebook, config),
            Err(e) => {
                // The in-memory change is kept when only the write failed
                if matches!(e, JotError::Storage { .. } | JotError::Io(_) | JotError::Serialization(_)) {
                    warn!("Shell command failed to persist: {}", e);
                }
                println!("{} {}", style("error:").red(), e);
            }
        }
    }
}

fn parse_line(line: &str) -> std::result::Result<ShellCommand, String> {
    let words = shell_words::split(line).map_err(|e| format!("Could not parse input: {}", e))?;
    ShellLine::try_parse_from(words)
        .map(|parsed| parsed.command)
        .map_err(|e| e.to_string())
}

fn apply<S: KeyValueStore>(notebook: &mut Notebook<S>, config: &Config, command: ShellCommand) -> Result<Flow> {
    match command {
        ShellCommand::List => notebook.back(),
        ShellCommand::New => {
            notebook.new_note()?;
        }
        ShellCommand::Open { note } => {
            let id = resolve_reference(notebook, &note)?;
            notebook.open_note(&id)?;
        }
        ShellCommand::Edit => {
            notebook.edit_selected()?;
        }
        ShellCommand::Save {
            title,
            content,
            tags,
        } => {
            let patch = NotePatch {
                title,
                content,
                tags: tags.map(|t| parse_tags(Some(t))),
                ..Default::default()
            };
            notebook.save_editing(patch)?;
        }
        ShellCommand::Write => {
            let (title, content) = match notebook.editing_note() {
                Some(note) if notebook.navigator().screen() == Screen::Editor => {
                    (note.title.clone(), note.content.clone())
                }
                _ => {
                    return Err(JotError::InvalidTransition {
                        from: notebook.navigator().screen(),
                        action: "write without a note being edited".to_string(),
                    })
                }
            };

            let (edited_title, edited_content) = edit_in_editor(config, &title, &content)?;
            let mut patch = NotePatch::default().content(edited_content);
            patch.title = edited_title;
            notebook.save_editing(patch)?;
        }
        ShellCommand::Delete => {
            let note = notebook.delete_selected()?;
            println!("Deleted '{}'", note.title);
        }
        ShellCommand::Pin => {
            let pinned = notebook.toggle_pin_selected()?;
            println!("{}", if pinned { "Pinned" } else { "Unpinned" });
        }
        ShellCommand::Dup => {
            let copy_id = notebook.duplicate_selected()?;
            println!("Duplicated as {}", copy_id);
        }
        ShellCommand::Search { query } => {
            notebook.navigate(Screen::Search)?;
            notebook.search(&query.join(" "));
        }
        ShellCommand::Folders => notebook.navigate(Screen::Folders)?,
        ShellCommand::Settings => notebook.navigate(Screen::Settings)?,
        ShellCommand::Theme { theme } => notebook.set_theme(theme)?,
        ShellCommand::Back => notebook.back(),
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// A 1-based position in the visible list, or a note id (prefix)
fn resolve_reference<S: KeyValueStore>(notebook: &Notebook<S>, reference: &str) -> Result<String> {
    if let Ok(position) = reference.parse::<usize>() {
        let visible = notebook.visible_notes();
        return position
            .checked_sub(1)
            .and_then(|i| visible.get(i))
            .map(|n| n.id.clone())
            .ok_or_else(|| JotError::NoteNotFound {
                id: reference.to_string(),
            });
    }
    Ok(notebook.notes().resolve(reference)?.id.clone())
}

fn render_screen<S: KeyValueStore>(notebook: &Notebook<S>, config: &Config) {
    let nav = notebook.navigator();
    match nav.screen() {
        Screen::Home => {
            render::print_notes_text(&notebook.visible_notes(), notebook.folders(), true);
        }
        Screen::Search => {
            println!("Results for \"{}\":", nav.search_query());
            render::print_notes_text(&notebook.visible_notes(), notebook.folders(), true);
        }
        Screen::Editor => match notebook.editing_note() {
            Some(note) => {
                render::print_note(note, notebook.folders());
                println!(
                    "\n{}",
                    style("save -T <title> -c <content> | write | back").dim()
                );
            }
            None => println!("No note is being edited"),
        },
        Screen::Preview => match notebook.selected_note() {
            Some(note) => {
                render::print_note(note, notebook.folders());
                println!("\n{}", style("edit | pin | dup | delete | back").dim());
            }
            None => println!("No note selected"),
        },
        Screen::Folders => render::print_folders(notebook.folders()),
        Screen::Settings => {
            println!("Theme:    {}", notebook.theme());
            println!("Data dir: {}", config.data_dir.display());
            println!("Editor:   {}", config.get_editor_command());
        }
    }
}
