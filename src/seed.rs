//! Starter notes and folders used when nothing usable is persisted yet.
use chrono::{DateTime, Duration, Utc};

use crate::{all_notes_folder, Folder, Note, FOLDER_COLORS};

const PERSONAL_FOLDER_ID: &str = "personal";
const WORK_FOLDER_ID: &str = "work";
const IDEAS_FOLDER_ID: &str = "ideas";

pub fn seed_folders() -> Vec<Folder> {
    let folder = |id: &str, name: &str, color: &str| Folder {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
        note_count: 0,
    };

    vec![
        all_notes_folder(),
        folder(PERSONAL_FOLDER_ID, "Personal", FOLDER_COLORS[1]),
        folder(WORK_FOLDER_ID, "Work", FOLDER_COLORS[2]),
        folder(IDEAS_FOLDER_ID, "Ideas", FOLDER_COLORS[4]),
    ]
}

pub fn seed_notes() -> Vec<Note> {
    let now = Utc::now();
    let note = |id: &str, title: &str, content: &str, folder: Option<&str>, tags: &[&str], age_hours: i64| {
        let at: DateTime<Utc> = now - Duration::hours(age_hours);
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            is_pinned: false,
            folder_id: folder.map(str::to_string),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: at,
            updated_at: at,
        }
    };

    let mut welcome = note(
        "seed-welcome",
        "Welcome to Jotter",
        "Create notes, file them in folders, tag them and pin the important ones.\n\
         Use `jotter shell` for an interactive session.",
        None,
        &["getting-started"],
        1,
    );
    welcome.is_pinned = true;

    vec![
        welcome,
        note(
            "seed-meeting",
            "Team meeting",
            "Agenda:\n- release status\n- open bugs\n- next sprint",
            Some(WORK_FOLDER_ID),
            &["meeting", "work"],
            26,
        ),
        note(
            "seed-groceries",
            "Groceries",
            "bread, coffee, apples",
            Some(PERSONAL_FOLDER_ID),
            &["shopping"],
            50,
        ),
        note(
            "seed-ideas",
            "Side project ideas",
            "A tiny CLI for tracking reading lists.",
            Some(IDEAS_FOLDER_ID),
            &[],
            74,
        ),
    ]
}
