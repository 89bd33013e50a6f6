//! File-backed [`HistoryStorage`].
//!
//! Each key maps to `<dir>/<key>.json`, written atomically.

use std::path::{Path, PathBuf};

use pictogram_core::history::HistoryStorage;
use pictogram_core::{PictogramError, Result};

use crate::paths::PictogramPaths;
use crate::storage::AtomicFile;

/// Key/value storage rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileHistoryStorage {
    dir: PathBuf,
}

impl FileHistoryStorage {
    /// Storage under the platform data directory (or `base_path`).
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        Ok(Self::in_dir(PictogramPaths::new(base_path).history_dir()?))
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, key: &str) -> Result<AtomicFile> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PictogramError::storage(format!(
                "invalid storage key '{key}'"
            )));
        }
        Ok(AtomicFile::new(self.dir.join(format!("{key}.json"))))
    }
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| PictogramError::storage(format!("storage task failed: {e}")))?
}

#[async_trait::async_trait]
impl HistoryStorage for FileHistoryStorage {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let file = self.file_for(key)?;
        blocking(move || file.read()).await
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let file = self.file_for(key)?;
        let value = value.to_string();
        blocking(move || file.write(&value)).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let file = self.file_for(key)?;
        blocking(move || file.remove()).await
    }
}
