//! Keyword relevance scoring over the remote icon index metadata.

use super::catalog::IconCatalog;
use super::model::SearchResult;

/// Upper bound on the number of hits returned by [`search_icons`].
pub const MAX_SEARCH_RESULTS: usize = 10;

const EXACT_MATCH_SCORE: u32 = 100;
const KEYWORD_CONTAINS_QUERY_SCORE: u32 = 50;
const QUERY_CONTAINS_KEYWORD_SCORE: u32 = 30;

/// Scores every index entry against `query` and returns the best hits.
///
/// Each keyword contributes at most one of the three scores (exact, keyword
/// contains query, query contains keyword). Entries scoring zero are dropped.
/// Results are sorted by descending score; ties keep catalog order.
pub fn search_icons(catalog: &IconCatalog, query: &str) -> Vec<SearchResult> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<SearchResult> = catalog
        .index()
        .iter()
        .filter_map(|entry| {
            let score = score_keywords(&entry.keywords, &query);
            (score > 0).then(|| SearchResult {
                collection: entry.collection.clone(),
                icon_name: entry.name.clone(),
                keywords: entry.keywords.clone(),
                score,
            })
        })
        .collect();

    // sort_by is stable
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(MAX_SEARCH_RESULTS);
    results
}

fn score_keywords(keywords: &[String], query: &str) -> u32 {
    keywords
        .iter()
        .map(|keyword| {
            let keyword = keyword.to_lowercase();
            if keyword == query {
                EXACT_MATCH_SCORE
            } else if keyword.contains(query) {
                KEYWORD_CONTAINS_QUERY_SCORE
            } else if !keyword.is_empty() && query.contains(&keyword) {
                QUERY_CONTAINS_KEYWORD_SCORE
            } else {
                0
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::model::IconIndexEntry;

    fn entry(collection: &str, name: &str, keywords: &[&str]) -> IconIndexEntry {
        IconIndexEntry {
            category: "test".to_string(),
            collection: collection.to_string(),
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn ids(results: &[SearchResult]) -> Vec<String> {
        results
            .iter()
            .map(|r| format!("{}/{}", r.collection, r.icon_name))
            .collect()
    }

    #[test]
    fn test_mail_query_ranks_mail_category_in_catalog_order() {
        let results = search_icons(IconCatalog::builtin(), "mail");
        assert_eq!(
            ids(&results),
            vec![
                "material-symbols/mail-outline",
                "heroicons/envelope",
                "lucide/mail",
            ]
        );
        assert!(results.iter().all(|r| r.score > 0));
    }

    #[test]
    fn test_scoring_rules() {
        let catalog = IconCatalog::new(
            Vec::new(),
            vec![
                entry("a", "exact", &["mail"]),
                entry("a", "contains-query", &["mailbox"]),
                entry("a", "query-contains", &["ail"]),
                entry("a", "none", &["house"]),
            ],
        );
        let results = search_icons(&catalog, "mail");
        let scores: Vec<(String, u32)> = results
            .iter()
            .map(|r| (r.icon_name.clone(), r.score))
            .collect();
        assert_eq!(
            scores,
            vec![
                ("exact".to_string(), 100),
                ("contains-query".to_string(), 50),
                ("query-contains".to_string(), 30),
            ]
        );
    }

    #[test]
    fn test_scores_accumulate_across_keywords() {
        let catalog = IconCatalog::new(
            Vec::new(),
            vec![
                entry("a", "single", &["star"]),
                entry("b", "double", &["star", "starred"]),
            ],
        );
        let results = search_icons(&catalog, "star");
        assert_eq!(ids(&results), vec!["b/double", "a/single"]);
        assert_eq!(results[0].score, 150);
        assert_eq!(results[1].score, 100);
    }

    #[test]
    fn test_query_is_normalized() {
        let results = search_icons(IconCatalog::builtin(), "  MAIL ");
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].icon_name, "mail-outline");
    }

    #[test]
    fn test_results_are_capped() {
        let index = (0..15)
            .map(|i| entry("c", &format!("icon-{i}"), &["shared"]))
            .collect();
        let catalog = IconCatalog::new(Vec::new(), index);
        let results = search_icons(&catalog, "shared");
        assert_eq!(results.len(), MAX_SEARCH_RESULTS);
        assert_eq!(results[0].icon_name, "icon-0");
        assert_eq!(results[9].icon_name, "icon-9");
    }

    #[test]
    fn test_empty_and_unknown_queries() {
        assert!(search_icons(IconCatalog::builtin(), "").is_empty());
        assert!(search_icons(IconCatalog::builtin(), "   ").is_empty());
        assert!(search_icons(IconCatalog::builtin(), "zzzz").is_empty());
    }
}
