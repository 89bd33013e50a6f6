//! OpenAiImageGenerator - prompt-to-raster via the OpenAI Images API.
//!
//! Configuration priority: `secret.json` > environment variables
//! (`OPENAI_API_KEY`, `OPENAI_IMAGE_MODEL`), merged by the secret service.

use std::time::Duration;

use async_trait::async_trait;
use pictogram_core::config::SecretConfig;
use pictogram_core::generation::{IconSource, StyleGuide, build_icon_prompt};
use pictogram_core::raster::{ImageGenerator, RasterImage};
use pictogram_core::{PictogramError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::http::{build_client, error_from_response, map_transport_error};

pub const DEFAULT_OPENAI_IMAGE_MODEL: &str = "gpt-image-1";
const BASE_URL: &str = "https://api.openai.com/v1/images/generations";
const SERVICE: &str = "OpenAI";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Generator that talks to the OpenAI image generation endpoint.
#[derive(Clone)]
pub struct OpenAiImageGenerator {
    client: Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl OpenAiImageGenerator {
    /// Creates a generator with the provided API key and model.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_client(REQUEST_TIMEOUT)?,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            endpoint: BASE_URL.to_string(),
        })
    }

    /// Builds a generator from loaded secrets.
    ///
    /// Model priority: `model_override` (config) > `secret.json` model name >
    /// `gpt-image-1`. Missing credentials are not an error here; `generate`
    /// reports them.
    pub fn from_secrets(secrets: &SecretConfig, model_override: Option<&str>) -> Result<Self> {
        let openai = secrets.openai.as_ref();
        let model = model_override
            .map(str::to_string)
            .or_else(|| openai.and_then(|c| c.model_name.clone()))
            .unwrap_or_else(|| DEFAULT_OPENAI_IMAGE_MODEL.to_string());
        Self::new(openai.map(|c| c.api_key.clone()), model)
    }

    /// Overrides the endpoint URL (proxies, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, api_key: &str, body: &ImageGenerationRequest) -> Result<RasterImage> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| map_transport_error(SERVICE, err))?;

        if !response.status().is_success() {
            return Err(error_from_response(SERVICE, response).await);
        }

        let parsed: ImageGenerationResponse = response.json().await.map_err(|err| {
            PictogramError::generation(format!("Failed to parse OpenAI response: {err}"))
        })?;

        extract_image(parsed)
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageGenerator {
    fn source(&self) -> IconSource {
        IconSource::Ai
    }

    fn collection(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str, style: &StyleGuide) -> Result<RasterImage> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| PictogramError::upstream_unavailable("OpenAI API key not configured"))?;

        let request = ImageGenerationRequest {
            model: self.model.clone(),
            prompt: build_icon_prompt(prompt, style)?,
            background: "transparent",
            size: "1024x1024",
            quality: "low",
        };

        info!("[OpenAI] Generating image with model {}", self.model);
        debug!("[OpenAI] Prompt: {}", request.prompt);
        self.send_request(api_key, &request).await
    }
}

#[derive(Serialize)]
struct ImageGenerationRequest {
    model: String,
    prompt: String,
    background: &'static str,
    size: &'static str,
    quality: &'static str,
}

#[derive(Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: Option<String>,
    b64_json: Option<String>,
}

fn extract_image(response: ImageGenerationResponse) -> Result<RasterImage> {
    let image = response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| PictogramError::generation("OpenAI API returned no image"))?;

    match (image.url, image.b64_json) {
        (Some(url), _) if !url.is_empty() => Ok(RasterImage::Url(url)),
        (_, Some(b64)) if !b64.is_empty() => {
            RasterImage::from_base64(&b64, Some("image/png".to_string()))
        }
        _ => Err(PictogramError::generation(
            "OpenAI API returned neither a URL nor image bytes",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pictogram_core::config::OpenAiSecret;

    #[test]
    fn test_extract_prefers_url() {
        let response: ImageGenerationResponse = serde_json::from_str(
            r#"{"data": [{"url": "https://img/x.png", "b64_json": "AQID"}]}"#,
        )
        .unwrap();
        assert_eq!(
            extract_image(response).unwrap(),
            RasterImage::Url("https://img/x.png".to_string())
        );
    }

    #[test]
    fn test_extract_inline_bytes() {
        let response: ImageGenerationResponse =
            serde_json::from_str(r#"{"data": [{"b64_json": "AQID"}]}"#).unwrap();
        assert_eq!(
            extract_image(response).unwrap(),
            RasterImage::InlineBytes {
                mime_type: Some("image/png".to_string()),
                bytes: vec![1, 2, 3],
            }
        );
    }

    #[test]
    fn test_extract_empty_is_generation_failure() {
        let response: ImageGenerationResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        let err = extract_image(response).unwrap_err();
        assert!(matches!(err, PictogramError::GenerationFailure(_)));
    }

    #[test]
    fn test_model_priority() {
        let secrets = SecretConfig {
            openai: Some(OpenAiSecret {
                api_key: "sk".to_string(),
                model_name: Some("dall-e-3".to_string()),
            }),
            vertex: None,
        };
        let generator = OpenAiImageGenerator::from_secrets(&secrets, None).unwrap();
        assert_eq!(generator.model(), "dall-e-3");

        let generator = OpenAiImageGenerator::from_secrets(&secrets, Some("gpt-image-1")).unwrap();
        assert_eq!(generator.model(), "gpt-image-1");

        let generator = OpenAiImageGenerator::from_secrets(&SecretConfig::default(), None).unwrap();
        assert_eq!(generator.model(), DEFAULT_OPENAI_IMAGE_MODEL);
    }

    #[tokio::test]
    async fn test_missing_key_is_upstream_unavailable() {
        let generator = OpenAiImageGenerator::new(None, DEFAULT_OPENAI_IMAGE_MODEL).unwrap();
        let err = generator
            .generate("mail", &StyleGuide::resolve(None))
            .await
            .unwrap_err();
        assert!(err.is_upstream_unavailable());
        assert_eq!(err.to_string(), "OpenAI API key not configured");
    }
}
