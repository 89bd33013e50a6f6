//! Raster image representations exchanged with the generation and tracing
//! services.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::error::{PictogramError, Result};

/// Largest raster accepted for tracing.
pub const MAX_RASTER_BYTES: usize = 10 * 1024 * 1024;

/// Raster as returned by an image-generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterImage {
    /// Remote location that still has to be downloaded.
    Url(String),
    /// Bytes delivered inline. `mime_type` is `None` when the service did not
    /// say what it sent.
    InlineBytes {
        mime_type: Option<String>,
        bytes: Vec<u8>,
    },
}

impl RasterImage {
    /// Decodes a base64 payload into [`RasterImage::InlineBytes`].
    pub fn from_base64(payload: &str, mime_type: Option<String>) -> Result<Self> {
        let bytes = BASE64
            .decode(payload.trim())
            .map_err(|e| PictogramError::generation(format!("invalid base64 image: {e}")))?;
        Ok(Self::InlineBytes { mime_type, bytes })
    }

    /// The remote URL, when the raster was delivered by reference.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::InlineBytes { .. } => None,
        }
    }
}

/// The single internal form every raster is normalized into.
#[derive(Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Rejects non-image payloads and payloads above [`MAX_RASTER_BYTES`].
    pub fn validate(&self) -> Result<()> {
        if !self.is_image() {
            return Err(PictogramError::trace(format!(
                "unsupported file type '{}', an image is required",
                self.mime_type
            )));
        }
        if self.bytes.len() > MAX_RASTER_BYTES {
            return Err(PictogramError::trace(format!(
                "image is {} bytes, the limit is {} bytes",
                self.bytes.len(),
                MAX_RASTER_BYTES
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataUri")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "data:{};base64,{}",
            self.mime_type,
            BASE64.encode(&self.bytes)
        )
    }
}

impl FromStr for DataUri {
    type Err = PictogramError;

    /// Parses `data:<mime>;base64,<payload>`.
    fn from_str(s: &str) -> Result<Self> {
        let rest = s
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| PictogramError::trace("not a data URI"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| PictogramError::trace("data URI has no payload"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| PictogramError::trace("only base64 data URIs are supported"))?;
        let bytes = BASE64
            .decode(payload)
            .map_err(|e| PictogramError::trace(format!("invalid base64 payload: {e}")))?;
        Ok(Self::new(
            if mime_type.is_empty() {
                "application/octet-stream"
            } else {
                mime_type
            },
            bytes,
        ))
    }
}

/// Tunables forwarded to the tracing service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceOptions {
    /// Luminance cut-off between foreground and background.
    pub threshold: u8,
    /// Speckles smaller than this many pixels are suppressed.
    pub turd_size: u32,
    pub opt_tolerance: f32,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            threshold: 128,
            turd_size: 2,
            opt_tolerance: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_display_and_parse() {
        let uri = DataUri::new("image/png", vec![1, 2, 3]);
        let text = uri.to_string();
        assert_eq!(text, "data:image/png;base64,AQID");
        assert_eq!(text.parse::<DataUri>().unwrap(), uri);
    }

    #[test]
    fn test_data_uri_rejects_other_forms() {
        assert!("https://example.com/a.png".parse::<DataUri>().is_err());
        assert!("data:text/plain,hello".parse::<DataUri>().is_err());
        assert!("data:image/png;base64,%%%".parse::<DataUri>().is_err());
    }

    #[test]
    fn test_validate_checks_type_and_size() {
        assert!(DataUri::new("image/jpeg", vec![0; 16]).validate().is_ok());

        let err = DataUri::new("application/pdf", vec![0; 16]).validate().unwrap_err();
        assert!(matches!(err, PictogramError::TraceFailure(_)));

        let big = DataUri::new("image/png", vec![0; MAX_RASTER_BYTES + 1]);
        assert!(big.validate().is_err());
    }

    #[test]
    fn test_raster_from_base64() {
        let image = RasterImage::from_base64("AQID", Some("image/png".into())).unwrap();
        assert_eq!(
            image,
            RasterImage::InlineBytes {
                mime_type: Some("image/png".into()),
                bytes: vec![1, 2, 3],
            }
        );
        assert!(image.url().is_none());
        assert!(RasterImage::from_base64("not base64!", None).is_err());
    }

    #[test]
    fn test_trace_options_wire_names() {
        let json = serde_json::to_value(TraceOptions::default()).unwrap();
        assert_eq!(json["threshold"], 128);
        assert_eq!(json["turdSize"], 2);
        assert!(json.get("optTolerance").is_some());
    }
}
