//! Resolution request and result models.
//!
//! Confidence is an `f32` fraction in `[0.0, 1.0]` everywhere. Each
//! [`IconSource`] carries a fixed confidence constant.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::error::{PictogramError, Result};

/// Which strategy produced an icon.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum IconSource {
    /// Built-in keyword catalog
    Pattern,
    /// Remote icon index
    Iconify,
    /// Imagen raster + trace
    VertexAi,
    /// User-supplied raster traced directly
    Generated,
    /// Terminal fallback icon
    Fallback,
    /// OpenAI raster + trace
    Ai,
}

impl IconSource {
    /// Fixed confidence of results produced by this source.
    pub fn confidence(self) -> f32 {
        match self {
            Self::Pattern => 0.95,
            Self::Iconify => 0.90,
            Self::Ai | Self::VertexAi => 0.85,
            Self::Generated => 0.60,
            Self::Fallback => 0.20,
        }
    }
}

/// A runner-up icon offered next to the winning one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub svg: String,
    /// Relevance score from the icon search.
    pub score: u32,
    pub source: IconSource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl IconMetadata {
    pub fn named(collection: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            collection: Some(collection.into()),
            name: Some(name.into()),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// The outcome of one resolution call. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Validated, pretty-printed markup.
    pub svg: String,
    pub confidence: f32,
    pub source: IconSource,
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<IconMetadata>,
}

impl GenerationResult {
    /// Creates a result whose confidence is the source's constant.
    pub fn new(svg: impl Into<String>, source: IconSource) -> Self {
        Self {
            svg: svg.into(),
            confidence: source.confidence(),
            source,
            alternatives: Vec::new(),
            metadata: None,
        }
    }

    pub fn with_alternatives(mut self, alternatives: Vec<Alternative>) -> Self {
        self.alternatives = alternatives;
        self
    }

    pub fn with_metadata(mut self, metadata: IconMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Incoming resolution request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub prompt: String,
    /// Style identifier; `None` or `"auto"` selects the generic style.
    #[serde(default, alias = "iconStyle", skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl ResolveRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            style: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Rejects blank prompts with [`PictogramError::Input`].
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(PictogramError::input("prompt is empty"));
        }
        Ok(())
    }
}
