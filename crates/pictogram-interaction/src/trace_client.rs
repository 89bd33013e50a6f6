//! HttpTraceClient - raster-to-vector conversion over HTTP.
//!
//! Each endpoint receives `POST {"imageUrl": "<data uri>", "options": {..}}`
//! and answers `{"svg": "..."}`. Endpoints are tried in order; the first one
//! that answers with JSON carrying an SVG wins.

use std::time::Duration;

use async_trait::async_trait;
use pictogram_core::config::TracerConfig;
use pictogram_core::raster::{DataUri, RasterTracer, TraceOptions};
use pictogram_core::svg::finalize_traced_svg;
use pictogram_core::{PictogramError, Result};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::http::{build_client, error_from_response, map_transport_error};
use crate::preprocess::preprocess_for_tracing;

const SERVICE: &str = "Tracer";
pub const ALL_ENDPOINTS_FAILED: &str =
    "All SVG conversion endpoints failed. Check server configuration.";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TraceRequest<'a> {
    image_url: String,
    options: &'a TraceOptions,
}

#[derive(Deserialize)]
struct TraceResponse {
    svg: Option<String>,
}

/// [`RasterTracer`] with an ordered endpoint fallback list.
#[derive(Clone)]
pub struct HttpTraceClient {
    client: Client,
    endpoints: Vec<String>,
}

impl HttpTraceClient {
    pub fn new(config: &TracerConfig) -> Result<Self> {
        Self::with_endpoints(
            config.endpoints.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn with_endpoints(endpoints: Vec<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoints,
        })
    }

    async fn try_endpoint(&self, endpoint: &str, body: &TraceRequest<'_>) -> Result<String> {
        let response = self
            .client
            .post(endpoint)
            .json(body)
            .send()
            .await
            .map_err(|err| map_transport_error(SERVICE, err))?;

        if !response.status().is_success() {
            return Err(error_from_response(SERVICE, response).await);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));
        if !is_json {
            return Err(PictogramError::trace(format!(
                "{endpoint} did not answer with JSON"
            )));
        }

        let parsed: TraceResponse = response
            .json()
            .await
            .map_err(|err| PictogramError::trace(format!("Invalid trace response: {err}")))?;
        let svg = parsed
            .svg
            .filter(|svg| !svg.trim().is_empty())
            .ok_or_else(|| PictogramError::trace("Trace response has no svg"))?;

        finalize_traced_svg(&svg)
    }
}

#[async_trait]
impl RasterTracer for HttpTraceClient {
    async fn trace(&self, image: &DataUri, options: &TraceOptions) -> Result<String> {
        image.validate()?;
        let prepared = preprocess_for_tracing(image)?;
        let body = TraceRequest {
            image_url: prepared.to_string(),
            options,
        };

        for endpoint in &self.endpoints {
            debug!("[Tracer] Trying {}", endpoint);
            match self.try_endpoint(endpoint, &body).await {
                Ok(svg) => {
                    info!("[Tracer] Traced via {}", endpoint);
                    return Ok(svg);
                }
                Err(err) => warn!("[Tracer] {} failed: {}", endpoint, err),
            }
        }

        Err(PictogramError::trace(ALL_ENDPOINTS_FAILED))
    }
}
