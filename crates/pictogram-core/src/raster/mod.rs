pub mod model;
pub mod ports;

pub use model::{DataUri, MAX_RASTER_BYTES, RasterImage, TraceOptions};
pub use ports::{ImageGenerator, RasterLoader, RasterTracer};
