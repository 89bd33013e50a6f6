//! Iconify icon fetcher.
//!
//! Fetches raw SVG markup from the public Iconify API:
//! `GET {base_url}/{collection}/{name}.svg`.

use std::time::Duration;

use async_trait::async_trait;
use pictogram_core::config::IconifyConfig;
use pictogram_core::icon::IconFetcher;
use pictogram_core::{PictogramError, Result};
use reqwest::Client;
use tracing::debug;

use crate::http::{build_client, error_from_response, map_transport_error};

const SERVICE: &str = "Iconify";

/// [`IconFetcher`] backed by the Iconify HTTP API.
#[derive(Clone)]
pub struct IconifyClient {
    client: Client,
    base_url: String,
}

impl IconifyClient {
    pub fn new(config: &IconifyConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(Duration::from_secs(config.timeout_secs))?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Points the client at another server (mirrors, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn icon_url(&self, collection: &str, name: &str) -> Result<String> {
        for part in [collection, name] {
            let valid = !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !valid {
                return Err(PictogramError::generation(format!(
                    "invalid icon identifier '{collection}:{name}'"
                )));
            }
        }
        Ok(format!("{}/{}/{}.svg", self.base_url, collection, name))
    }
}

#[async_trait]
impl IconFetcher for IconifyClient {
    async fn get_icon_svg(&self, collection: &str, name: &str) -> Result<String> {
        let url = self.icon_url(collection, name)?;
        debug!("[Iconify] GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| map_transport_error(SERVICE, err))?;

        if !response.status().is_success() {
            return Err(error_from_response(SERVICE, response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|err| map_transport_error(SERVICE, err))?;

        if !body.contains("<svg") {
            return Err(PictogramError::generation(format!(
                "Iconify returned no SVG for {collection}:{name}"
            )));
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_url() {
        let client = IconifyClient::new(&IconifyConfig::default())
            .unwrap()
            .with_base_url("http://localhost:9000/");
        assert_eq!(
            client.icon_url("material-symbols", "mail-outline").unwrap(),
            "http://localhost:9000/material-symbols/mail-outline.svg"
        );
        assert!(client.icon_url("../etc", "passwd").is_err());
        assert!(client.icon_url("lucide", "").is_err());
    }
}
