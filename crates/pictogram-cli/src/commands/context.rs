//! Wires configuration, secrets and adapters into the application services.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use pictogram_application::{HistoryService, IconResolver};
use pictogram_core::config::{GenerationProvider, PictogramConfig};
use pictogram_core::raster::ImageGenerator;
use pictogram_core::secret::SecretService;
use pictogram_infrastructure::{ConfigService, FileHistoryStorage, SecretServiceImpl};
use pictogram_interaction::{
    HttpRasterLoader, HttpTraceClient, IconifyClient, OpenAiImageGenerator, VertexImageGenerator,
};
use tracing::debug;

pub fn load_config(base_dir: Option<&Path>) -> Result<PictogramConfig> {
    let service = ConfigService::new(base_dir)?;
    debug!("[CLI] Loading config from {}", service.path().display());
    Ok(service.load_or_init()?)
}

/// Builds the resolver with the generator selected by `[generation] provider`.
pub async fn build_resolver(base_dir: Option<&Path>, config: &PictogramConfig) -> Result<IconResolver> {
    let secrets = SecretServiceImpl::new(base_dir)?
        .load_secrets()
        .await
        .context("Failed to load secrets")?;

    let model = config.generation.model.as_deref();
    let generator: Arc<dyn ImageGenerator> = match config.generation.provider {
        GenerationProvider::Openai => Arc::new(OpenAiImageGenerator::from_secrets(&secrets, model)?),
        GenerationProvider::Vertex => Arc::new(VertexImageGenerator::from_secrets(&secrets, model)?),
    };
    let loader = HttpRasterLoader::new(Duration::from_secs(config.tracer.timeout_secs))?;

    Ok(IconResolver::new(
        Arc::new(IconifyClient::new(&config.iconify)?),
        generator,
        Arc::new(loader),
        Arc::new(HttpTraceClient::new(&config.tracer)?),
    )
    .with_config(config))
}

/// Opens the history, honoring the `[history] path` override.
pub async fn open_history(base_dir: Option<&Path>, config: &PictogramConfig) -> Result<HistoryService> {
    let storage = match &config.history.path {
        Some(path) => FileHistoryStorage::in_dir(path),
        None => FileHistoryStorage::new(base_dir)?,
    };
    debug!("[CLI] History directory: {}", storage.dir().display());
    Ok(HistoryService::load(Arc::new(storage)).await)
}
