//! Post-processing of raw tracer output.

use once_cell::sync::Lazy;
use regex::Regex;

use super::dom::{RootTag, find_root_tag};
use super::strip::{DEFAULT_VIEW_BOX, SVG_NAMESPACE};
use crate::error::{PictogramError, Result};

/// Rendered size forced onto traced icons.
pub const TRACED_ICON_SIZE: u32 = 24;

static HEX_FILL: Lazy<Regex> = Lazy::new(|| Regex::new(r##"(\s)fill\s*=\s*"#[^"]*""##).unwrap());
static HEX_STROKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r##"(\s)stroke\s*=\s*"#[^"]*""##).unwrap());
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap());

/// Normalizes a freshly traced SVG into icon form.
///
/// The root start tag is rebuilt with the namespace, a `24`x`24` size, a
/// recovered view-box and `fill="currentColor"`. The view-box is taken from
/// the traced root when present, else derived from its numeric
/// `width`/`height`, else defaults to `0 0 24 24`. Literal hex fills and
/// strokes anywhere in the document become `currentColor`.
pub fn finalize_traced_svg(svg: &str) -> Result<String> {
    let mut root = find_root_tag(svg)
        .ok()
        .filter(|root| root.name.eq_ignore_ascii_case("svg"))
        .ok_or_else(|| PictogramError::trace("traced output has no <svg> element"))?;
    let view_box = recover_view_box(&root);

    let size = TRACED_ICON_SIZE.to_string();
    root.clear();
    root.set("xmlns", SVG_NAMESPACE);
    root.set("width", size.as_str());
    root.set("height", size.as_str());
    root.set("viewBox", view_box);
    root.set("fill", "currentColor");
    let rebuilt = root.splice_into(svg);

    let out = HEX_FILL.replace_all(&rebuilt, r#"${1}fill="currentColor""#);
    let out = HEX_STROKE.replace_all(&out, r#"${1}stroke="currentColor""#);
    Ok(out.into_owned())
}

fn recover_view_box(root: &RootTag) -> String {
    if let Some(view_box) = root.get("viewBox") {
        return view_box.to_string();
    }
    let width = root.get("width").and_then(leading_number);
    let height = root.get("height").and_then(leading_number);
    match (width, height) {
        (Some(w), Some(h)) => format!("0 0 {w} {h}"),
        _ => DEFAULT_VIEW_BOX.to_string(),
    }
}

/// Parses the numeric prefix of a length such as `"100pt"`.
fn leading_number(value: &str) -> Option<f64> {
    LEADING_NUMBER
        .find(value)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
}
