//! The individual resolution strategies.
//!
//! A strategy returns `Ok(None)` for "no match", which advances the chain
//! quietly, and `Err(..)` for a failure, which the resolver logs before
//! advancing.

use futures::future::join_all;
use pictogram_core::Result;
use pictogram_core::generation::{Alternative, GenerationResult, IconMetadata, IconSource, StyleGuide};
use pictogram_core::icon::{SearchResult, find_matching_pattern, search_icons};
use pictogram_core::raster::RasterImage;
use pictogram_core::svg::{ensure_safe_svg, is_valid_svg, pretty_print};
use pictogram_core::PictogramError;
use tracing::{debug, warn};

use super::IconResolver;

const BUILTIN_COLLECTION: &str = "built-in";
const FALLBACK_COLLECTION: &str = "fallback";
const EMPTY_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" />"#;

/// Validates and pretty-prints strategy output. Nothing leaves the resolver
/// without passing through here.
pub(super) fn canonicalize(svg: &str) -> Result<String> {
    if !is_valid_svg(svg) {
        return Err(PictogramError::invalid_markup("strategy produced invalid SVG"));
    }
    pretty_print(svg)
}

impl IconResolver {
    pub(super) fn pattern_strategy(&self, prompt: &str) -> Result<Option<GenerationResult>> {
        let Some(pattern) = find_matching_pattern(&self.catalog, prompt) else {
            return Ok(None);
        };
        debug!("[Resolver] Pattern '{}' matched", pattern.name);
        let svg = canonicalize(&pattern.svg)?;
        Ok(Some(
            GenerationResult::new(svg, IconSource::Pattern)
                .with_metadata(IconMetadata::named(BUILTIN_COLLECTION, pattern.name.as_str())),
        ))
    }

    pub(super) async fn iconify_strategy(&self, prompt: &str) -> Result<Option<GenerationResult>> {
        let hits = search_icons(&self.catalog, prompt);
        let Some((winner, runners_up)) = hits.split_first() else {
            return Ok(None);
        };
        debug!(
            "[Resolver] Iconify winner {}:{} (score {})",
            winner.collection, winner.icon_name, winner.score
        );

        let raw = self
            .fetcher
            .get_icon_svg(&winner.collection, &winner.icon_name)
            .await?;
        let svg = canonicalize(&ensure_safe_svg(&raw))?;
        let alternatives = self
            .fetch_alternatives(&runners_up[..runners_up.len().min(self.max_alternatives)])
            .await;

        Ok(Some(
            GenerationResult::new(svg, IconSource::Iconify)
                .with_alternatives(alternatives)
                .with_metadata(IconMetadata::named(
                    winner.collection.as_str(),
                    winner.icon_name.as_str(),
                )),
        ))
    }

    /// Fetches runner-ups concurrently. Failed or invalid ones are dropped.
    async fn fetch_alternatives(&self, hits: &[SearchResult]) -> Vec<Alternative> {
        let fetches = hits.iter().map(|hit| async move {
            let svg = self
                .fetcher
                .get_icon_svg(&hit.collection, &hit.icon_name)
                .await
                .and_then(|raw| canonicalize(&ensure_safe_svg(&raw)));
            match svg {
                Ok(svg) => Some(Alternative {
                    svg,
                    score: hit.score,
                    source: IconSource::Iconify,
                }),
                Err(err) => {
                    debug!(
                        "[Resolver] Dropping alternative {}:{}: {}",
                        hit.collection, hit.icon_name, err
                    );
                    None
                }
            }
        });
        join_all(fetches).await.into_iter().flatten().collect()
    }

    /// Raster generation followed by tracing.
    pub(super) async fn ai_strategy(&self, prompt: &str, style: &StyleGuide) -> Result<GenerationResult> {
        let raster = self.generator.generate(prompt, style).await?;
        let metadata = IconMetadata::named(self.generator.collection(), prompt);
        self.trace_raster(raster, self.generator.source(), metadata)
            .await
    }

    pub(super) async fn trace_raster(
        &self,
        raster: RasterImage,
        source: IconSource,
        metadata: IconMetadata,
    ) -> Result<GenerationResult> {
        let metadata = match raster.url() {
            Some(url) if !url.starts_with("data:") => metadata.with_image_url(url),
            _ => metadata,
        };
        let image = self.loader.load(raster).await?;
        let traced = self.tracer.trace(&image, &self.trace_options).await?;
        let svg = canonicalize(&traced)?;
        Ok(GenerationResult::new(svg, source).with_metadata(metadata))
    }

    /// The terminal fallback icon. Never fails.
    pub(super) fn fallback_result(&self) -> GenerationResult {
        let pattern = self.catalog.fallback_pattern();
        let (name, svg) = match pattern {
            Some(p) => (p.name.as_str(), p.svg.as_str()),
            None => ("empty", EMPTY_ICON),
        };
        let (name, svg) = match pretty_print(svg) {
            Ok(svg) => (name, svg),
            Err(e) => {
                warn!("[Resolver] Fallback pattern '{}' is not valid SVG: {}", name, e);
                ("empty", EMPTY_ICON.to_string())
            }
        };
        GenerationResult::new(svg, IconSource::Fallback)
            .with_metadata(IconMetadata::named(FALLBACK_COLLECTION, name))
    }
}
