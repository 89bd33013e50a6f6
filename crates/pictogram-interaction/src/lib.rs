//! Adapters for the remote services the resolver depends on: the Iconify
//! icon API, the image generators, and the raster tracer.

mod http;

pub mod iconify_client;
pub mod openai_image_generator;
pub mod preprocess;
pub mod raster_loader;
pub mod trace_client;
pub mod vertex_image_generator;

pub use iconify_client::IconifyClient;
pub use openai_image_generator::{DEFAULT_OPENAI_IMAGE_MODEL, OpenAiImageGenerator};
pub use raster_loader::{HttpRasterLoader, read_local_image};
pub use trace_client::HttpTraceClient;
pub use vertex_image_generator::{DEFAULT_IMAGEN_MODEL, VertexImageGenerator};
