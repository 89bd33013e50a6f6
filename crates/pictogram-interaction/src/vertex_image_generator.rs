//! VertexImageGenerator - prompt-to-raster via Imagen on Vertex AI.
//!
//! Calls the `:predict` endpoint of the Imagen publisher model with a bearer
//! access token. Configuration comes from `secret.json` or
//! `GOOGLE_CLOUD_PROJECT_ID` / `VERTEX_AI_LOCATION` / `VERTEX_AI_ACCESS_TOKEN`.

use std::time::Duration;

use async_trait::async_trait;
use pictogram_core::config::{SecretConfig, VertexSecret};
use pictogram_core::generation::{IconSource, StyleGuide, build_imagen_prompt};
use pictogram_core::raster::{ImageGenerator, RasterImage};
use pictogram_core::{PictogramError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::http::{build_client, error_from_response, map_transport_error};

pub const DEFAULT_IMAGEN_MODEL: &str = "imagen-3.0-generate-001";
const SERVICE: &str = "Vertex AI";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Generator backed by Vertex AI Imagen.
#[derive(Clone)]
pub struct VertexImageGenerator {
    client: Client,
    credentials: Option<VertexSecret>,
    model: String,
    base_url: Option<String>,
}

impl VertexImageGenerator {
    pub fn new(credentials: Option<VertexSecret>, model: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_client(REQUEST_TIMEOUT)?,
            credentials,
            model: model.into(),
            base_url: None,
        })
    }

    /// Builds a generator from loaded secrets. Missing credentials are
    /// reported by `generate`.
    pub fn from_secrets(secrets: &SecretConfig, model_override: Option<&str>) -> Result<Self> {
        Self::new(
            secrets.vertex.clone(),
            model_override.unwrap_or(DEFAULT_IMAGEN_MODEL),
        )
    }

    /// Replaces `https://{location}-aiplatform.googleapis.com` (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    fn endpoint(&self, credentials: &VertexSecret) -> String {
        let location = credentials.location_or_default();
        let base = self
            .base_url
            .clone()
            .unwrap_or_else(|| format!("https://{location}-aiplatform.googleapis.com"));
        format!(
            "{base}/v1/projects/{}/locations/{location}/publishers/google/models/{}:predict",
            credentials.project_id, self.model
        )
    }
}

#[async_trait]
impl ImageGenerator for VertexImageGenerator {
    fn source(&self) -> IconSource {
        IconSource::VertexAi
    }

    fn collection(&self) -> &str {
        "vertex-ai"
    }

    async fn generate(&self, prompt: &str, style: &StyleGuide) -> Result<RasterImage> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| PictogramError::upstream_unavailable("Vertex AI credentials not configured"))?;

        let request = PredictRequest {
            instances: vec![Instance {
                prompt: build_imagen_prompt(prompt, style)?,
            }],
            parameters: Parameters {
                sample_count: 1,
                aspect_ratio: "1:1",
                safety_filter_level: "block_some",
                person_generation: "dont_allow",
            },
        };

        let endpoint = self.endpoint(credentials);
        info!("[VertexAI] Generating image with model {}", self.model);
        debug!("[VertexAI] POST {}", endpoint);

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&credentials.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|err| map_transport_error(SERVICE, err))?;

        if !response.status().is_success() {
            return Err(error_from_response(SERVICE, response).await);
        }

        let parsed: PredictResponse = response.json().await.map_err(|err| {
            PictogramError::generation(format!("Failed to parse Vertex AI response: {err}"))
        })?;

        let prediction = parsed
            .predictions
            .into_iter()
            .next()
            .ok_or_else(|| PictogramError::generation("Vertex AI returned no predictions"))?;
        RasterImage::from_base64(&prediction.bytes_base64_encoded, prediction.mime_type)
    }
}

#[derive(Serialize)]
struct PredictRequest {
    instances: Vec<Instance>,
    parameters: Parameters,
}

#[derive(Serialize)]
struct Instance {
    prompt: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Parameters {
    sample_count: u32,
    aspect_ratio: &'static str,
    safety_filter_level: &'static str,
    person_generation: &'static str,
}

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: String,
    mime_type: Option<String>,
}
