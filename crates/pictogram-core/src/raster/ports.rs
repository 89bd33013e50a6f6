//! Ports implemented by the raster adapters in the interaction layer.

use async_trait::async_trait;

use super::model::{DataUri, RasterImage, TraceOptions};
use crate::error::Result;
use crate::generation::{IconSource, StyleGuide};

/// An external prompt-to-raster service.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Source tag attached to icons produced through this generator.
    fn source(&self) -> IconSource;

    /// Collection name recorded in result metadata (e.g. `"openai"`).
    fn collection(&self) -> &str;

    /// Generates a raster for `prompt` rendered in `style`.
    ///
    /// Fails with `UpstreamUnavailable` when credentials are missing and with
    /// `GenerationFailure` when the service does not return an image.
    async fn generate(&self, prompt: &str, style: &StyleGuide) -> Result<RasterImage>;
}

/// Resolves any [`RasterImage`] into a validated [`DataUri`].
#[async_trait]
pub trait RasterLoader: Send + Sync {
    async fn load(&self, image: RasterImage) -> Result<DataUri>;
}

/// An external raster-to-vector service.
#[async_trait]
pub trait RasterTracer: Send + Sync {
    /// Traces `image` and returns finalized icon markup
    /// (see [`crate::svg::finalize_traced_svg`]).
    async fn trace(&self, image: &DataUri, options: &TraceOptions) -> Result<String>;
}
