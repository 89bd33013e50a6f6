//! Unified path management for pictogram configuration and data files.
//!
//! Paths are resolved with `dirs` so they follow platform conventions
//! (XDG on Linux, `~/Library` on macOS, `%APPDATA%` on Windows).

use std::path::{Path, PathBuf};

use pictogram_core::PictogramError;

const APP_DIR_NAME: &str = "pictogram";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// No platform directory could be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for PictogramError {
    fn from(err: PathError) -> Self {
        PictogramError::config(err.to_string())
    }
}

/// Unified path management for pictogram.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/pictogram/         # Config directory
/// ├── config.toml              # Application configuration
/// └── secret.json              # API credentials
///
/// ~/.local/share/pictogram/    # Data directory
/// └── history/                 # Key/value history storage
///     └── icons.json
/// ```
///
/// A base override puts both trees under one directory, which tests use to
/// stay inside a temporary directory.
#[derive(Debug, Clone, Default)]
pub struct PictogramPaths {
    base: Option<PathBuf>,
}

impl PictogramPaths {
    /// Creates a resolver; `base` replaces the platform directories.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory (e.g. `~/.config/pictogram/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.join("config")),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the data directory (e.g. `~/.local/share/pictogram/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.join("data")),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the path to the main configuration file.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Returns the directory holding history storage keys.
    pub fn history_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("history"))
    }
}
