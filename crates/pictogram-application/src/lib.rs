//! Application layer for Pictogram.
//!
//! Use cases that coordinate the domain logic in `pictogram-core` with the
//! adapters from the infrastructure and interaction layers.

pub mod export_service;
pub mod history_service;
pub mod resolver;

pub use export_service::{ExportFormat, ExportedFile, download_as_raster, download_as_svg};
pub use history_service::HistoryService;
pub use resolver::IconResolver;
