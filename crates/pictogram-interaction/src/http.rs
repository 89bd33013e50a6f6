//! Helpers shared by the HTTP adapters.

use std::time::Duration;

use pictogram_core::{PictogramError, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Builds a client with a whole-request timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| PictogramError::config(format!("Failed to build HTTP client: {err}")))
}

/// Maps a transport-level failure (connect, timeout, body read).
pub(crate) fn map_transport_error(service: &str, err: reqwest::Error) -> PictogramError {
    if err.is_timeout() {
        PictogramError::timeout(format!("{service} request timed out: {err}"))
    } else {
        PictogramError::http(
            err.status().map(|s| s.as_u16()),
            format!("{service} request failed: {err}"),
        )
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Detailed { message: String },
    Plain(String),
}

/// Maps a non-success response, preferring the `error.message` (or `error`)
/// field of a JSON body over the raw text.
pub(crate) fn map_http_error(service: &str, status: StatusCode, body: String) -> PictogramError {
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|wrapper| match wrapper.error {
            ErrorBody::Detailed { message } | ErrorBody::Plain(message) => message,
        })
        .unwrap_or(body);
    let message = if message.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        message
    };
    PictogramError::http(Some(status.as_u16()), format!("{service}: {message}"))
}

/// Reads the body of a failed response and maps it.
pub(crate) async fn error_from_response(service: &str, response: reqwest::Response) -> PictogramError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| format!("Failed to read {service} error body"));
    map_http_error(service, status, body)
}
