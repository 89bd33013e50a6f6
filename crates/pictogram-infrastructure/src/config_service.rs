//! Configuration service implementation.
//!
//! Loads [`PictogramConfig`] from `config.toml` in the config directory.

use std::path::{Path, PathBuf};

use pictogram_core::Result;
use pictogram_core::config::PictogramConfig;
use tracing::{debug, info};

use crate::paths::PictogramPaths;
use crate::storage::AtomicFile;

/// Reads and initializes `config.toml`.
#[derive(Debug, Clone)]
pub struct ConfigService {
    file: AtomicFile,
}

impl ConfigService {
    /// Creates a service for the platform config file, or for the one under
    /// `base_path` when given.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = PictogramPaths::new(base_path).config_file()?;
        Ok(Self::from_file(path))
    }

    pub fn from_file(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Loads the configuration. A missing or blank file yields defaults.
    pub fn load(&self) -> Result<PictogramConfig> {
        match self.file.read()? {
            Some(content) => {
                let config: PictogramConfig = toml::from_str(&content)?;
                debug!("[Config] Loaded {}", self.file.path().display());
                Ok(config)
            }
            None => Ok(PictogramConfig::default()),
        }
    }

    /// Writes the default configuration when no file exists yet, then loads.
    pub fn load_or_init(&self) -> Result<PictogramConfig> {
        if !self.file.exists() {
            let content = toml::to_string_pretty(&PictogramConfig::default())?;
            self.file.write(&content)?;
            info!(
                "[Config] Wrote default configuration to {}",
                self.file.path().display()
            );
        }
        self.load()
    }
}
