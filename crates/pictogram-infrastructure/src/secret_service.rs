//! Secret service implementation.
//!
//! Reads credentials from `secret.json` and fills the gaps from the
//! environment.

use std::path::{Path, PathBuf};

use pictogram_core::Result;
use pictogram_core::config::SecretConfig;
use pictogram_core::secret::SecretService;
use tracing::debug;

use crate::paths::PictogramPaths;
use crate::storage::AtomicFile;

type EnvLookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// File + environment backed [`SecretService`].
pub struct SecretServiceImpl {
    file: AtomicFile,
    env: Box<EnvLookup>,
}

impl SecretServiceImpl {
    /// Uses the platform secret file (or the one under `base_path`) and the
    /// process environment.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = PictogramPaths::new(base_path).secret_file()?;
        Ok(Self::with_env(path, |key| std::env::var(key).ok()))
    }

    /// Uses an explicit file and environment lookup.
    pub fn with_env<F>(path: PathBuf, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            file: AtomicFile::new(path),
            env: Box::new(env),
        }
    }

    fn load_file(&self) -> Result<SecretConfig> {
        match self.file.read()? {
            Some(content) => Ok(serde_json::from_str(&content)?),
            None => Ok(SecretConfig::default()),
        }
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        let secrets = self.load_file()?.merge_env(|key| (self.env)(key));
        debug!(
            "[Secrets] openai configured: {}, vertex configured: {}",
            secrets.openai.is_some(),
            secrets.vertex.is_some()
        );
        Ok(secrets)
    }

    async fn secret_file_exists(&self) -> bool {
        self.file.exists()
    }
}
