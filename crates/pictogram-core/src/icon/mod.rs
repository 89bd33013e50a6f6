//! Icon catalog, keyword matching and relevance search.

pub mod catalog;
pub mod fetcher;
pub mod matcher;
pub mod model;
pub mod search;

pub use catalog::{FALLBACK_PATTERN_NAME, IconCatalog};
pub use fetcher::IconFetcher;
pub use matcher::find_matching_pattern;
pub use model::{IconIndexEntry, IconPattern, SearchResult};
pub use search::{MAX_SEARCH_RESULTS, search_icons};
