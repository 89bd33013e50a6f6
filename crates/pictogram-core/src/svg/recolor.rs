//! Colour and size canonicalization for display and export.
//!
//! The two entry points are terminal and mutually exclusive: a resolved icon
//! is either prepared for display or for export, never both in sequence.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::warn;

use super::dom::{RootTag, find_root_tag};
use super::validate::is_valid_svg;

pub const MIN_EXPORT_SIZE: u32 = 1;
pub const MAX_EXPORT_SIZE: u32 = 1024;
pub const DEFAULT_EXPORT_SIZE: u32 = 24;

const CURRENT_COLOR: &str = "currentColor";
const BLACK: &str = "#000000";
const NONE: &str = "none";

static FILL_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\s)fill\s*=\s*(?:"[^"]*"|'[^']*')"#).unwrap());
static STROKE_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\s)stroke\s*=\s*(?:"[^"]*"|'[^']*')"#).unwrap());
static STYLE_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\s)style\s*=\s*("([^"]*)"|'([^']*)')"#).unwrap());
static CURRENT_COLOR_ANY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)currentcolor").unwrap());

/// Rewrites colours so the icon inherits the text colour of its container.
///
/// Every fill becomes `currentColor`, every stroke becomes `none`, and
/// bare-integer `width`/`height` on the root become `100%`. Invalid input is
/// returned unchanged.
pub fn recolor_for_display(svg: &str) -> String {
    if !is_valid_svg(svg) {
        warn!("[Canonicalizer] Invalid SVG provided to recolor_for_display");
        return svg.to_string();
    }

    let sized = rewrite_root_tag(svg, |root| {
        for key in ["width", "height"] {
            if root.get(key).is_some_and(is_integer) {
                root.set(key, "100%");
            }
        }
    });
    recolor(&sized, CURRENT_COLOR)
}

/// Clamps a requested export size into `MIN_EXPORT_SIZE..=MAX_EXPORT_SIZE`.
///
/// Out-of-range values fall back to [`DEFAULT_EXPORT_SIZE`].
pub fn clamp_export_size(size: u32) -> u32 {
    if (MIN_EXPORT_SIZE..=MAX_EXPORT_SIZE).contains(&size) {
        size
    } else {
        warn!(
            "[Canonicalizer] Export size {} out of range {}..={}, using {}",
            size, MIN_EXPORT_SIZE, MAX_EXPORT_SIZE, DEFAULT_EXPORT_SIZE
        );
        DEFAULT_EXPORT_SIZE
    }
}

/// Produces markup that renders the same outside any CSS context.
///
/// The root `width`/`height` are set to the clamped size (inserted when
/// missing), fills become `#000000`, strokes become `none` and remaining
/// `currentColor` references become `#000000`. Invalid input is returned
/// unchanged.
pub fn recolor_and_resize_for_export(svg: &str, size: u32) -> String {
    if !is_valid_svg(svg) {
        warn!("[Canonicalizer] Invalid SVG provided to recolor_and_resize_for_export");
        return svg.to_string();
    }

    let size = clamp_export_size(size);
    let sized = rewrite_root_tag(svg, |root| {
        root.set("width", size.to_string());
        root.set("height", size.to_string());
    });
    let colored = recolor(&sized, BLACK);
    CURRENT_COLOR_ANY.replace_all(&colored, BLACK).into_owned()
}

fn is_integer(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Applies `f` to the attributes of the root start tag only.
///
/// Input whose root cannot be located is returned unchanged.
pub(crate) fn rewrite_root_tag(svg: &str, f: impl FnOnce(&mut RootTag)) -> String {
    match find_root_tag(svg) {
        Ok(mut root) => {
            f(&mut root);
            root.splice_into(svg)
        }
        Err(_) => svg.to_string(),
    }
}

fn recolor(svg: &str, fill: &str) -> String {
    let out = FILL_ATTR.replace_all(svg, format!(r#"${{1}}fill="{fill}""#).as_str());
    let out = STROKE_ATTR.replace_all(&out, format!(r#"${{1}}stroke="{NONE}""#).as_str());
    STYLE_ATTR
        .replace_all(&out, |caps: &Captures<'_>| {
            let (quote, body) = match caps.get(3) {
                Some(body) => ('"', body.as_str()),
                None => ('\'', caps.get(4).map_or("", |m| m.as_str())),
            };
            format!(
                "{}style={quote}{}{quote}",
                &caps[1],
                rewrite_style_declarations(body, fill)
            )
        })
        .into_owned()
}

fn rewrite_style_declarations(style: &str, fill: &str) -> String {
    style
        .split(';')
        .map(|declaration| {
            let Some((property, _)) = declaration.split_once(':') else {
                return declaration.to_string();
            };
            let leading = &property[..property.len() - property.trim_start().len()];
            match property.trim().to_ascii_lowercase().as_str() {
                "fill" => format!("{leading}fill: {fill}"),
                "stroke" => format!("{leading}stroke: {NONE}"),
                _ => declaration.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}
