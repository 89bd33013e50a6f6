//! Error types for the Pictogram pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Pictogram workspace.
///
/// The first six variants form the user-facing taxonomy. Strategy-level
/// failures (`GenerationFailure`, `TraceFailure`) are normally swallowed by the
/// resolver and only reach callers of the direct AI entry points.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PictogramError {
    /// Empty or missing prompt. User-correctable, never retried.
    #[error("Input error: {0}")]
    Input(String),

    /// Missing credentials or configuration for an external service
    #[error("{0}")]
    UpstreamUnavailable(String),

    /// The image-generation service could not produce a raster
    #[error("Generation failed: {0}")]
    GenerationFailure(String),

    /// The tracing service could not produce an SVG
    #[error("Trace failed: {0}")]
    TraceFailure(String),

    /// Markup that is not well-formed SVG where a parse was required
    #[error("Invalid SVG markup: {0}")]
    InvalidMarkup(String),

    /// Persisted history payload could not be parsed
    #[error("Stored data is corrupt: {0}")]
    StorageCorrupt(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", "XML"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-success HTTP response from a remote service
    #[error("HTTP error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Http {
        status: Option<u16>,
        message: String,
    },

    /// Storage write/remove failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// An external call did not finish in time
    #[error("Timed out: {0}")]
    Timeout(String),
}

/// Coarse classification attached to error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Input,
    UpstreamUnavailable,
    GenerationFailure,
    TraceFailure,
    InvalidMarkup,
    StorageCorrupt,
    Internal,
}

impl PictogramError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(message.into())
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::GenerationFailure(message.into())
    }

    pub fn trace(message: impl Into<String>) -> Self {
        Self::TraceFailure(message.into())
    }

    pub fn invalid_markup(message: impl Into<String>) -> Self {
        Self::InvalidMarkup(message.into())
    }

    pub fn storage_corrupt(message: impl Into<String>) -> Self {
        Self::StorageCorrupt(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn http(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_))
    }

    pub fn is_invalid_markup(&self) -> bool {
        matches!(self, Self::InvalidMarkup(_))
    }

    /// Whether this failure belongs to a single resolution strategy and should
    /// make the resolver advance rather than abort.
    pub fn is_strategy_failure(&self) -> bool {
        !self.is_input()
    }

    /// Maps the error onto the external classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Input(_) => ErrorKind::Input,
            Self::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
            Self::GenerationFailure(_) | Self::Http { .. } | Self::Timeout(_) => {
                ErrorKind::GenerationFailure
            }
            Self::TraceFailure(_) => ErrorKind::TraceFailure,
            Self::InvalidMarkup(_) => ErrorKind::InvalidMarkup,
            Self::StorageCorrupt(_) => ErrorKind::StorageCorrupt,
            Self::Io { .. } | Self::Serialization { .. } | Self::Config(_) | Self::Storage(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// Error object returned to callers in place of a `GenerationResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
}

impl From<&PictogramError> for ErrorResponse {
    fn from(err: &PictogramError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PictogramError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PictogramError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PictogramError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PictogramError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for PictogramError {
    fn from(err: quick_xml::Error) -> Self {
        Self::InvalidMarkup(err.to_string())
    }
}

/// A type alias for `Result<T, PictogramError>`.
pub type Result<T> = std::result::Result<T, PictogramError>;
