use async_trait::async_trait;

use crate::error::Result;

/// Port for fetching concrete icon markup from a remote icon index.
///
/// Implementations live in the interaction layer (the Iconify client); the
/// resolver only depends on this abstraction.
#[async_trait]
pub trait IconFetcher: Send + Sync {
    /// Fetches the SVG markup of `name` inside `collection`.
    ///
    /// Any failure (transport, non-success status, empty body) is reported as
    /// an error; callers treat the entry as unusable.
    async fn get_icon_svg(&self, collection: &str, name: &str) -> Result<String>;
}
