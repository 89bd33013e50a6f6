//! Deterministic pretty-printer for SVG markup.

use super::dom::{Element, Node, parse_document};
use crate::error::{PictogramError, Result};

const INDENT: &str = "  ";

/// Re-serializes `svg` with two-space indentation, one element per line.
///
/// - Attribute order and raw attribute values are preserved.
/// - Elements without element children and without text are self-closed.
/// - Text-only content stays on the same line as its enclosing tags.
/// - In mixed content each text run gets its own indented line.
/// - Comments, processing instructions and the prolog are dropped.
///
/// Unlike the other canonicalizer operations this one has no fallback:
/// input that is not valid SVG yields [`PictogramError::InvalidMarkup`].
pub fn pretty_print(svg: &str) -> Result<String> {
    let root = parse_document(svg)?;
    if !root.name.eq_ignore_ascii_case("svg") {
        return Err(PictogramError::invalid_markup(format!(
            "root element is <{}>, expected <svg>",
            root.name
        )));
    }

    let mut out = String::with_capacity(svg.len());
    write_element(&mut out, &root, 0);
    Ok(out)
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    let indent = INDENT.repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }

    let texts: Vec<&str> = element.text_runs().collect();
    if !element.has_element_children() {
        if texts.is_empty() {
            out.push_str(" />");
        } else {
            out.push('>');
            out.push_str(&texts.join(" "));
            write_close(out, &element.name);
        }
        return;
    }

    out.push('>');
    let child_indent = INDENT.repeat(depth + 1);
    for child in &element.children {
        match child {
            Node::Element(e) => {
                out.push('\n');
                write_element(out, e, depth + 1);
            }
            Node::Text(t) if !t.trim().is_empty() => {
                out.push('\n');
                out.push_str(&child_indent);
                out.push_str(t.trim());
            }
            Node::Text(_) => {}
        }
    }
    out.push('\n');
    out.push_str(&indent);
    write_close(out, &element.name);
}

fn write_close(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::is_valid_svg;

    #[test]
    fn test_indents_nested_elements() {
        let svg = r#"<svg viewBox="0 0 24 24"><g fill="none"><path d="M0 0"/><circle r="2"></circle></g></svg>"#;
        let expected = "<svg viewBox=\"0 0 24 24\">\n  <g fill=\"none\">\n    <path d=\"M0 0\" />\n    <circle r=\"2\" />\n  </g>\n</svg>";
        assert_eq!(pretty_print(svg).unwrap(), expected);
    }

    #[test]
    fn test_text_only_content_stays_inline() {
        let svg = "<svg><title>  Mail icon </title></svg>";
        assert_eq!(
            pretty_print(svg).unwrap(),
            "<svg>\n  <title>Mail icon</title>\n</svg>"
        );
    }

    #[test]
    fn test_mixed_content_puts_text_on_its_own_line() {
        let svg = "<svg><text>a<tspan>b</tspan>c</text></svg>";
        assert_eq!(
            pretty_print(svg).unwrap(),
            "<svg>\n  <text>\n    a\n    <tspan>b</tspan>\n    c\n  </text>\n</svg>"
        );
    }

    #[test]
    fn test_attribute_order_and_escapes_are_preserved() {
        let svg = r#"<svg z="1" a="2" title="a &lt; b"/>"#;
        assert_eq!(
            pretty_print(svg).unwrap(),
            r#"<svg z="1" a="2" title="a &lt; b" />"#
        );
    }

    #[test]
    fn test_comments_and_prolog_are_dropped() {
        let svg = "<?xml version=\"1.0\"?>\n<svg><!-- note --><path d=\"M1 1\"/></svg>";
        assert_eq!(
            pretty_print(svg).unwrap(),
            "<svg>\n  <path d=\"M1 1\" />\n</svg>"
        );
    }

    #[test]
    fn test_is_idempotent_and_valid() {
        let inputs = [
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24"><path d="M3 3h18v18H3z"/></svg>"#,
            "<svg>\n\n   <g>\n<g><rect width='4' height=\"4\"/></g></g>  </svg>",
            "<svg><text>x &amp; y<tspan>z</tspan></text></svg>",
        ];
        for input in inputs {
            let once = pretty_print(input).unwrap();
            let twice = pretty_print(&once).unwrap();
            assert_eq!(once, twice);
            assert!(is_valid_svg(&once));
        }
    }

    #[test]
    fn test_invalid_markup_is_an_error() {
        let err = pretty_print("<svg><g></svg>").unwrap_err();
        assert!(err.is_invalid_markup());
        let err = pretty_print("<div/>").unwrap_err();
        assert!(err.is_invalid_markup());
    }
}
