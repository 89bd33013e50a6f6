use std::path::Path;

use anyhow::Result;
use pictogram_core::raster::RasterImage;
use pictogram_interaction::read_local_image;

use super::context::{build_resolver, load_config};
use super::generate::print_result;
use super::output::report_error;

fn is_remote(image: &str) -> bool {
    ["http://", "https://", "data:"]
        .iter()
        .any(|scheme| image.starts_with(scheme))
}

pub async fn run(base_dir: Option<&Path>, image: &str, json: bool) -> Result<()> {
    let raster = if is_remote(image) {
        RasterImage::Url(image.to_string())
    } else {
        read_local_image(Path::new(image)).await?
    };

    let config = load_config(base_dir)?;
    let resolver = build_resolver(base_dir, &config).await?;
    let result = resolver
        .trace_image(raster)
        .await
        .map_err(|err| report_error(err, json))?;
    print_result(&result, json)
}
