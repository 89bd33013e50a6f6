//! Attribute stripping and safe-wrapping helpers.

use once_cell::sync::Lazy;
use regex::Regex;

use super::recolor::rewrite_root_tag;
use super::validate::is_valid_svg;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const DEFAULT_VIEW_BOX: &str = "0 0 24 24";

static DECORATIVE_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\s+(?:id|class|data-[A-Za-z0-9_.:-]*)\s*=\s*(?:"[^"]*"|'[^']*')"#).unwrap()
});
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static FIRST_PATH_D: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<path\b[^>]*?\sd\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());

/// Removes `id`, `class` and `data-*` attributes and collapses whitespace.
///
/// Invalid input is returned unchanged.
pub fn strip_decorative_attributes(svg: &str) -> String {
    if !is_valid_svg(svg) {
        return svg.to_string();
    }
    let stripped = DECORATIVE_ATTR.replace_all(svg, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Makes sure the root carries a namespace and a view-box, then strips
/// decorative attributes. Empty input stays empty.
pub fn ensure_safe_svg(svg: &str) -> String {
    if svg.trim().is_empty() {
        return String::new();
    }

    let out = rewrite_root_tag(svg, |root| {
        if root.get("xmlns").is_none() {
            root.set("xmlns", SVG_NAMESPACE);
        }
        if root.get("viewBox").is_none() {
            root.set("viewBox", DEFAULT_VIEW_BOX);
        }
    });
    strip_decorative_attributes(&out)
}

/// The `d` attribute of the first `<path>` element, if any.
pub fn primary_path_data(svg: &str) -> Option<String> {
    FIRST_PATH_D.captures(svg).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    })
}
