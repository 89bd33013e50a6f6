//! Icon export as SVG or PNG files.
//!
//! Both formats go through `recolor_and_resize_for_export` first, so the
//! exported icon renders black on transparent outside any CSS context.

use pictogram_core::svg::{clamp_export_size, ensure_safe_svg, recolor_and_resize_for_export};
use pictogram_core::{PictogramError, Result};
use resvg::{tiny_skia, usvg};
use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    #[default]
    Svg,
    Png,
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
        }
    }
}

/// A file ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedFile {
    pub file_name: String,
    pub mime_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    fn new(format: ExportFormat, size: u32, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("icon-{size}x{size}.{format}"),
            mime_type: format.mime_type().to_string(),
            bytes,
        }
    }
}

pub fn export(svg: &str, size: u32, format: ExportFormat) -> Result<ExportedFile> {
    match format {
        ExportFormat::Svg => Ok(download_as_svg(svg, size)),
        ExportFormat::Png => download_as_raster(svg, size),
    }
}

/// Exports recolored SVG markup sized `size`x`size`.
pub fn download_as_svg(svg: &str, size: u32) -> ExportedFile {
    let size = clamp_export_size(size);
    let markup = recolor_and_resize_for_export(svg, size);
    ExportedFile::new(ExportFormat::Svg, size, markup.into_bytes())
}

/// Exports a `size`x`size` PNG.
///
/// Markup that cannot be rendered yields [`PictogramError::InvalidMarkup`].
pub fn download_as_raster(svg: &str, size: u32) -> Result<ExportedFile> {
    let size = clamp_export_size(size);
    // The renderer needs the SVG namespace on the root.
    let markup = ensure_safe_svg(&recolor_and_resize_for_export(svg, size));
    let png = rasterize(&markup, size)?;
    debug!("[Export] Rendered {}x{} PNG ({} bytes)", size, size, png.len());
    Ok(ExportedFile::new(ExportFormat::Png, size, png))
}

fn rasterize(svg: &str, size: u32) -> Result<Vec<u8>> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())
        .map_err(|e| PictogramError::invalid_markup(format!("cannot render SVG: {e}")))?;
    let mut pixmap = tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| PictogramError::invalid_markup("cannot allocate pixmap"))?;

    // Scale to fit and center.
    let target = size as f32;
    let tree_size = tree.size();
    let scale = (target / tree_size.width()).min(target / tree_size.height());
    let dx = (target - tree_size.width() * scale) / 2.0;
    let dy = (target - tree_size.height() * scale) / 2.0;
    let transform = tiny_skia::Transform::from_scale(scale, scale).post_translate(dx, dy);

    resvg::render(&tree, transform, &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|e| PictogramError::invalid_markup(format!("cannot encode PNG: {e}")))
}
