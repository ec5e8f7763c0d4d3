//! Plain terminal rendering of notes and folders.
use console::style;

use crate::{content_preview, is_hex_color, FolderStore, Note, Result};

fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

fn folder_label(note: &Note, folders: &FolderStore) -> Option<String> {
    note.folder_id.as_deref().map(|id| match folders.find(id) {
        Some(folder) => folder.name.clone(),
        None => format!("{} (deleted)", id),
    })
}

fn display_title(note: &Note) -> &str {
    if note.title.is_empty() {
        "Untitled"
    } else {
        &note.title
    }
}

/// Prints notes one block per note, or one line each when `brief`
pub fn print_notes_text(notes: &[&Note], folders: &FolderStore, brief: bool) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    let width = term_width().min(60);
    for (i, note) in notes.iter().enumerate() {
        let pin = if note.is_pinned { "* " } else { "  " };
        if brief {
            println!("{:>3}. {}{}  {}", i + 1, pin, style(display_title(note)).bold(), style(&note.id).dim());
            continue;
        }

        if i > 0 {
            println!("{}", "-".repeat(width));
        }
        println!(
            "{:>3}. {}{}",
            i + 1,
            pin,
            style(display_title(note)).bold()
        );
        println!(
            "     ID: {} | Updated: {}",
            note.id,
            note.updated_at.format("%Y-%m-%d %H:%M")
        );
        if let Some(folder) = folder_label(note, folders) {
            println!("     Folder: {}", folder);
        }
        if !note.tags.is_empty() {
            let tags = note.tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" ");
            println!("     Tags: {}", style(tags).cyan());
        }
        let preview = content_preview(&note.content, width.saturating_sub(5));
        if !preview.is_empty() {
            println!("     {}", preview);
        }
    }

    println!(
        "\n{} note{}",
        notes.len(),
        if notes.len() == 1 { "" } else { "s" }
    );
}

pub fn print_notes_json(notes: &[&Note]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(notes)?);
    Ok(())
}

/// Prints a single note in full
pub fn print_note(note: &Note, folders: &FolderStore) {
    let pin = if note.is_pinned { " (pinned)" } else { "" };
    println!("{}{}", style(display_title(note)).bold().underlined(), pin);
    println!("ID:      {}", note.id);
    println!("Created: {}", note.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!("Updated: {}", note.updated_at.format("%Y-%m-%d %H:%M:%S"));
    if let Some(folder) = folder_label(note, folders) {
        println!("Folder:  {}", folder);
    }
    if !note.tags.is_empty() {
        println!("Tags:    {}", style(note.tags.join(", ")).cyan());
    }
    println!();
    if note.content.is_empty() {
        println!("{}", style("(empty)").dim());
    } else {
        println!("{}", note.content);
    }
}

pub fn print_folders(folders: &FolderStore) {
    for folder in folders.iter() {
        let marker = if folder.is_reserved() { " (reserved)" } else { "" };
        println!(
            "{} {:<24} {:>4} notes  {}{}",
            style("#").color256(color_code(&folder.color)),
            style(&folder.name).bold(),
            folder.note_count,
            style(&folder.id).dim(),
            marker
        );
    }
}

/// Nearest xterm-256 color for a `#rrggbb` string
fn color_code(hex: &str) -> u8 {
    if !is_hex_color(hex) {
        return 16;
    }
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .map(|v| (u16::from(v) * 5 / 255) as u8)
            .unwrap_or(0)
    };
    16 + 36 * channel(1..3) + 6 * channel(3..5) + channel(5..7)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_map_into_the_cube() {
        assert_eq!(color_code("#000000"), 16);
        assert_eq!(color_code("#ffffff"), 231);
        assert_eq!(color_code("#ff0000"), 196);
        assert_eq!(color_code("garbage"), 16);
        assert_eq!(color_code("#zzbaba"), 16);
        assert_eq!(color_code("#fff"), 16);
    }
}
