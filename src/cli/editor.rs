use std::{
    fs::{read_to_string, OpenOptions},
    io::Write,
    path::Path,
    process::Command,
};

use log::info;
use shell_words::split;
use tempfile::Builder;

use crate::{split_editor_buffer, Config, JotError, Result};

/// Opens the configured editor on `title` and `content`.
///
/// Returns the edited title (if the heading line was kept) and content.
pub fn edit_in_editor(config: &Config, title: &str, content: &str) -> Result<(Option<String>, String)> {
    let temp_file = Builder::new().prefix("jotter-").suffix(".md").tempfile()?;
    let temp_path = temp_file.path().to_path_buf();

    write_editor_template(&temp_path, title, content)?;

    let editor_cmd = config.get_editor_command();
    info!("Opening editor '{}'. Save and exit when done...", editor_cmd);
    launch_editor(&editor_cmd, &temp_path)?;

    let buffer = read_to_string(&temp_path)?;
    Ok(split_editor_buffer(&buffer))
}

fn write_editor_template(path: &Path, title: &str, content: &str) -> Result<()> {
    let mut file = OpenOptions::new().write(true).truncate(true).open(path)?;

    writeln!(file, "# {}", title)?;
    writeln!(file, "<!-- Edit your note below this line. The heading is the title. -->")?;
    writeln!(file)?;
    if !content.is_empty() {
        writeln!(file, "{}", content)?;
    }

    Ok(())
}

fn launch_editor(editor_cmd: &str, file_path: &Path) -> Result<()> {
    let args = split(editor_cmd).map_err(|e| JotError::EditorError {
        message: format!("Failed to parse editor command: {}", e),
    })?;

    let (program, extra_args) = args.split_first().ok_or_else(|| JotError::EditorError {
        message: "Empty editor command".to_string(),
    })?;

    let status = Command::new(program)
        .args(extra_args)
        .arg(file_path)
        .status()
        .map_err(|e| JotError::EditorError {
            message: format!("Failed to execute editor command '{}': {}", program, e),
        })?;

    if !status.success() {
        return Err(JotError::EditorError {
            message: "Editor exited with non-zero status".to_string(),
        });
    }

    Ok(())
}
