//! Icon catalog domain models.

use serde::{Deserialize, Serialize};

/// A built-in pictogram with the keywords that select it.
///
/// Identity is `name`. Patterns are defined once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconPattern {
    pub name: String,
    /// Matched in declaration order; the order is significant.
    pub keywords: Vec<String>,
    pub svg: String,
}

/// One entry of the remote icon index metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconIndexEntry {
    /// Grouping the entry is declared under (e.g. "mail").
    pub category: String,
    /// Icon collection on the remote index (e.g. "material-symbols").
    pub collection: String,
    /// Icon name inside the collection (e.g. "mail-outline").
    pub name: String,
    pub keywords: Vec<String>,
}

/// A scored hit produced by the icon search. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub collection: String,
    pub icon_name: String,
    pub keywords: Vec<String>,
    pub score: u32,
}
