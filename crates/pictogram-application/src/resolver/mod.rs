//! Icon Resolution Orchestrator.
//!
//! `IconResolver` runs the configured strategies in priority order and
//! returns the first validated result. Strategy failures are logged and
//! swallowed; when every strategy fails the built-in fallback icon is
//! returned, so `resolve` only ever errors on invalid input.

mod strategies;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use pictogram_core::config::{PictogramConfig, ResolverConfig, StrategyKind};
use pictogram_core::generation::{GenerationResult, IconMetadata, IconSource, ResolveRequest, StyleGuide};
use pictogram_core::icon::{IconCatalog, IconFetcher};
use pictogram_core::raster::{ImageGenerator, RasterImage, RasterLoader, RasterTracer, TraceOptions};
use pictogram_core::{PictogramError, Result};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Orchestrates the resolution strategies.
///
/// # Thread Safety
///
/// All collaborators are held behind `Arc` and the resolver itself is
/// immutable, so one instance can serve concurrent requests.
pub struct IconResolver {
    catalog: Arc<IconCatalog>,
    fetcher: Arc<dyn IconFetcher>,
    generator: Arc<dyn ImageGenerator>,
    loader: Arc<dyn RasterLoader>,
    tracer: Arc<dyn RasterTracer>,
    strategies: Vec<StrategyKind>,
    strategy_timeout: Duration,
    max_alternatives: usize,
    trace_options: TraceOptions,
    default_style: Option<String>,
}

impl IconResolver {
    /// Creates a resolver over the built-in catalog with default settings.
    pub fn new(
        fetcher: Arc<dyn IconFetcher>,
        generator: Arc<dyn ImageGenerator>,
        loader: Arc<dyn RasterLoader>,
        tracer: Arc<dyn RasterTracer>,
    ) -> Self {
        let defaults = ResolverConfig::default();
        Self {
            catalog: Arc::new(IconCatalog::builtin().clone()),
            fetcher,
            generator,
            loader,
            tracer,
            strategies: defaults.strategies,
            strategy_timeout: Duration::from_secs(defaults.strategy_timeout_secs),
            max_alternatives: defaults.max_alternatives,
            trace_options: TraceOptions::default(),
            default_style: None,
        }
    }

    /// Applies the `[resolver]`, `[tracer]` and `[generation]` settings.
    pub fn with_config(mut self, config: &PictogramConfig) -> Self {
        self = self.with_resolver_config(&config.resolver);
        self.trace_options = config.tracer.trace_options();
        self.default_style = config.generation.default_style.clone();
        self
    }

    pub fn with_resolver_config(mut self, config: &ResolverConfig) -> Self {
        self.strategies = config.strategies.clone();
        self.strategy_timeout = Duration::from_secs(config.strategy_timeout_secs);
        self.max_alternatives = config.max_alternatives;
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<IconCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_strategies(mut self, strategies: Vec<StrategyKind>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn with_strategy_timeout(mut self, strategy_timeout: Duration) -> Self {
        self.strategy_timeout = strategy_timeout;
        self
    }

    pub fn catalog(&self) -> &IconCatalog {
        &self.catalog
    }

    /// Runs the strategy chain.
    ///
    /// Errors only with [`PictogramError::Input`] for a blank prompt.
    pub async fn resolve(&self, request: &ResolveRequest) -> Result<GenerationResult> {
        request.validate()?;
        let prompt = request.prompt.trim();
        let style = self.style_guide(request);
        info!("[Resolver] Resolving '{}'", prompt);

        for kind in &self.strategies {
            match self.run_strategy(*kind, prompt, &style).await {
                Ok(Some(result)) => {
                    info!(
                        "[Resolver] '{}' resolved by {} (confidence {:.2})",
                        prompt, result.source, result.confidence
                    );
                    return Ok(result);
                }
                Ok(None) => debug!("[Resolver] {} strategy found no match", kind),
                Err(err) => warn!("[Resolver] {} strategy failed: {}", kind, err),
            }
        }

        warn!("[Resolver] All strategies failed for '{}', using fallback icon", prompt);
        Ok(self.fallback_result())
    }

    /// Direct AI generation outside the chain. Every failure is surfaced.
    pub async fn generate_with_ai(&self, request: &ResolveRequest) -> Result<GenerationResult> {
        request.validate()?;
        let style = self.style_guide(request);
        self.bounded(self.ai_strategy(request.prompt.trim(), &style))
            .await
    }

    /// Traces a caller-supplied raster. The result is tagged `generated`.
    pub async fn trace_image(&self, image: RasterImage) -> Result<GenerationResult> {
        let metadata = IconMetadata {
            collection: Some("generated".to_string()),
            ..IconMetadata::default()
        };
        self.bounded(self.trace_raster(image, IconSource::Generated, metadata))
            .await
    }

    async fn run_strategy(
        &self,
        kind: StrategyKind,
        prompt: &str,
        style: &StyleGuide,
    ) -> Result<Option<GenerationResult>> {
        match kind {
            StrategyKind::Pattern => self.pattern_strategy(prompt),
            StrategyKind::Iconify => self.bounded(self.iconify_strategy(prompt)).await,
            StrategyKind::Ai => self.bounded(self.ai_strategy(prompt, style)).await.map(Some),
            StrategyKind::Fallback => Ok(Some(self.fallback_result())),
        }
    }

    /// Applies the per-strategy timeout.
    async fn bounded<T>(&self, future: impl Future<Output = Result<T>>) -> Result<T> {
        timeout(self.strategy_timeout, future).await.map_err(|_| {
            PictogramError::timeout(format!(
                "strategy exceeded {}s",
                self.strategy_timeout.as_secs_f32()
            ))
        })?
    }

    fn style_guide(&self, request: &ResolveRequest) -> StyleGuide {
        let style = request
            .style
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.default_style.as_deref());
        StyleGuide::resolve(style)
    }
}
