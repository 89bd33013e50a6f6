//! Domain layer of Pictogram.
//!
//! Holds everything that does not touch the network or the file system:
//! the error taxonomy, the SVG validator and canonicalizer, the built-in icon
//! catalog with its matcher and search, style presets, history semantics,
//! configuration models and the port traits implemented by the outer crates.

pub mod config;
pub mod error;
pub mod generation;
pub mod history;
pub mod icon;
pub mod raster;
pub mod secret;
pub mod svg;

// Re-export common error type
pub use error::{ErrorKind, ErrorResponse, PictogramError, Result};
