//! First-match keyword lookup over the built-in patterns.

use super::catalog::IconCatalog;
use super::model::IconPattern;

/// Returns the first pattern with a keyword contained in `prompt`.
///
/// Patterns are scanned in declaration order and keywords in declared order.
/// Matching is a case-insensitive substring test, so a keyword embedded in a
/// longer word still matches. Blank prompts never match.
pub fn find_matching_pattern<'a>(catalog: &'a IconCatalog, prompt: &str) -> Option<&'a IconPattern> {
    let prompt = prompt.to_lowercase();
    if prompt.trim().is_empty() {
        return None;
    }

    catalog.patterns().iter().find(|pattern| {
        pattern
            .keywords
            .iter()
            .any(|keyword| prompt.contains(&keyword.to_lowercase()))
    })
}
