use super::dom::parse_document;

/// Whether `text` is well-formed XML whose root element is `svg`.
///
/// The tag comparison is case-insensitive. Never fails: every parse error
/// maps to `false`.
pub fn is_valid_svg(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    match parse_document(text) {
        Ok(root) => root.name.eq_ignore_ascii_case("svg"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_svg_roots() {
        assert!(is_valid_svg(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#));
        assert!(is_valid_svg("<SVG><path d=\"M0 0\"/></SVG>"));
        assert!(is_valid_svg("<?xml version=\"1.0\"?><svg></svg>"));
    }

    #[test]
    fn test_rejects_other_roots_and_garbage() {
        assert!(!is_valid_svg("<html></html>"));
        assert!(!is_valid_svg("<svg><path></svg>"));
        assert!(!is_valid_svg("not markup"));
        assert!(!is_valid_svg(""));
        assert!(!is_valid_svg("   \n"));
    }
}
