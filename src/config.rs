use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{JotError, Result, FOLDER_COLORS};

const CONFIG_FILE_NAME: &str = "config.json";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the persisted notes, folders and theme
    pub data_dir: PathBuf,

    /// Editor command used by `--edit` and the shell's `write`
    pub editor_command: Option<String>,

    /// Color given to folders created without one
    pub default_folder_color: String,

    /// How many notes `list` shows when no limit is passed
    pub list_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".jotter"));

        Config {
            data_dir,
            editor_command: None,
            default_folder_color: FOLDER_COLORS[0].to_string(),
            list_limit: 20,
        }
    }
}

impl Config {
    /// Location of the config file when `--config` is not given
    pub fn default_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(".jotter").join(CONFIG_FILE_NAME))
    }

    /// Reads the config at `path`, or the defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| JotError::ConfigError {
            message: format!("Failed to parse {}: {}", path.display(), e),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|_| JotError::DirectoryError {
                    path: parent.to_path_buf(),
                })?;
            }
        }

        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Applies a `key=value` assignment from the command line
    pub fn set(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment
            .split_once('=')
            .map(|(k, v)| (k.trim(), v.trim()))
            .ok_or_else(|| JotError::ConfigError {
                message: format!("Expected key=value, got '{}'", assignment),
            })?;

        match key {
            "data_dir" => self.data_dir = PathBuf::from(value),
            "editor_command" => {
                self.editor_command = (!value.is_empty()).then(|| value.to_string());
            }
            "default_folder_color" => {
                if !is_hex_color(value) {
                    return Err(JotError::ConfigError {
                        message: format!("'{}' is not a #rrggbb color", value),
                    });
                }
                self.default_folder_color = value.to_string();
            }
            "list_limit" => {
                self.list_limit = value.parse().map_err(|_| JotError::ConfigError {
                    message: format!("'{}' is not a valid number", value),
                })?;
            }
            other => {
                return Err(JotError::ConfigError {
                    message: format!("Unknown configuration key: {}", other),
                })
            }
        }
        Ok(())
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -W -t".to_string()
        } else {
            for editor in &["nano", "vim", "vi", "emacs"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "jotter")
}

pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.set("list_limit=5").unwrap();
        config.set("editor_command = vim -n").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.list_limit, 5);
        assert_eq!(loaded.editor_command.as_deref(), Some("vim -n"));
        assert_eq!(loaded.get_editor_command(), "vim -n");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"list_limit": 3}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.list_limit, 3);
        assert_eq!(config.default_folder_color, FOLDER_COLORS[0]);
    }

    #[test]
    fn set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.set("list_limit").is_err());
        assert!(config.set("list_limit=many").is_err());
        assert!(config.set("default_folder_color=blue").is_err());
        assert!(config.set("colour=#ffffff").is_err());

        config.set("default_folder_color=#10b981").unwrap();
        assert_eq!(config.default_folder_color, "#10b981");
        config.set("editor_command=").unwrap();
        assert!(config.editor_command.is_none());
    }

    #[test]
    fn rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(Config::load(&path), Err(JotError::ConfigError { .. })));
    }
}
