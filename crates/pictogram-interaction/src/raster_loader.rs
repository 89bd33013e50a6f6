//! Normalizes generated rasters into data URIs.
//!
//! Remote URLs are downloaded once; inline bytes without a declared type are
//! sniffed with the `image` crate. The result is validated (image type,
//! size limit) before it reaches the tracer.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use pictogram_core::raster::{DataUri, RasterImage, RasterLoader};
use pictogram_core::{PictogramError, Result};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::http::{build_client, error_from_response, map_transport_error};

const SERVICE: &str = "Image download";
const FALLBACK_MIME: &str = "application/octet-stream";

/// [`RasterLoader`] that downloads URLs over HTTP.
#[derive(Clone)]
pub struct HttpRasterLoader {
    client: Client,
}

impl HttpRasterLoader {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }

    async fn download(&self, url: &str) -> Result<DataUri> {
        debug!("[Raster] Downloading {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| map_transport_error(SERVICE, err))?;

        if !response.status().is_success() {
            return Err(error_from_response(SERVICE, response).await);
        }

        let declared = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string());
        let bytes = response
            .bytes()
            .await
            .map_err(|err| map_transport_error(SERVICE, err))?
            .to_vec();

        Ok(DataUri::new(resolve_mime(declared, &bytes), bytes))
    }
}

#[async_trait]
impl RasterLoader for HttpRasterLoader {
    async fn load(&self, image: RasterImage) -> Result<DataUri> {
        let uri = match image {
            RasterImage::Url(url) if url.trim_start().starts_with("data:") => DataUri::from_str(&url)?,
            RasterImage::Url(url) => self.download(&url).await?,
            RasterImage::InlineBytes { mime_type, bytes } => {
                DataUri::new(resolve_mime(mime_type, &bytes), bytes)
            }
        };
        uri.validate()?;
        Ok(uri)
    }
}

/// Reads a local image file into an inline raster.
pub async fn read_local_image(path: &Path) -> Result<RasterImage> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        PictogramError::io(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let mime_type = mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string());
    Ok(RasterImage::InlineBytes { mime_type, bytes })
}

/// Prefers a declared image type, then the sniffed format, then whatever was
/// declared.
fn resolve_mime(declared: Option<String>, bytes: &[u8]) -> String {
    match declared {
        Some(mime) if mime.starts_with("image/") => mime,
        declared => sniff_mime(bytes)
            .or(declared)
            .unwrap_or_else(|| FALLBACK_MIME.to_string()),
    }
}

fn sniff_mime(bytes: &[u8]) -> Option<String> {
    image::guess_format(bytes)
        .ok()
        .map(|format| format.to_mime_type().to_string())
}
