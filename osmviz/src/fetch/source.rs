//! Tile source configuration.

use crate::cache;
use crate::coord::TileCoord;

/// Default tile endpoint: the public OpenStreetMap tile server.
pub const DEFAULT_URL_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// A slippy-map tile server, described by a URL template.
///
/// The template must contain the `{z}`, `{x}` and `{y}` placeholders,
/// which are substituted literally with the zoom level and tile indices
/// before each request. No other protocol negotiation is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSource {
    url_template: String,
}

impl TileSource {
    /// Create a tile source from a URL template.
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
        }
    }

    /// The raw URL template.
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// The URL to request for one tile.
    pub fn tile_url(&self, tile: &TileCoord) -> String {
        self.url_template
            .replace("{z}", &tile.zoom.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }

    /// Cache filename prefix namespacing this source.
    ///
    /// Distinct templates yield distinct prefixes, so several sources can
    /// share one cache directory.
    pub fn cache_prefix(&self) -> String {
        cache::source_prefix(&self.url_template)
    }
}

impl Default for TileSource {
    fn default() -> Self {
        Self::new(DEFAULT_URL_TEMPLATE)
    }
}
