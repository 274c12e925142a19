//! Public entry point tying the engine together.
//!
//! [`OsmManager`] is an explicitly constructed context object: it resolves
//! the cache directory once, up front, and owns the fetcher for its
//! lifetime. There are no process-wide singletons; two managers with
//! different configurations coexist without interference.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;

use crate::cache::{self, CacheDirSource, CacheError};
use crate::composite::{CompositeError, Compositor, TILE_SIZE};
use crate::coord::BoundingBox;
use crate::fetch::{FetchError, HttpClient, ReqwestClient, TileFetcher, TileSource};

/// Errors that can occur while constructing a manager.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// No usable cache directory could be found.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The HTTP client could not be constructed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Configuration for an [`OsmManager`].
///
/// Every field is explicit and typed; the defaults give the public
/// OpenStreetMap tile server, standard 256-pixel tiles, and a cache in
/// the system temp directory.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Preferred cache directory. `None` goes straight to the temp-dir
    /// fallback chain.
    pub cache_dir: Option<PathBuf>,

    /// Tile server to fetch from.
    pub source: TileSource,

    /// Pixel side length of the source's tiles.
    pub tile_size: u32,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            source: TileSource::default(),
            tile_size: TILE_SIZE,
        }
    }
}

impl ManagerConfig {
    /// Set the preferred cache directory.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Set the tile source.
    pub fn with_source(mut self, source: TileSource) -> Self {
        self.source = source;
        self
    }

    /// Set the tile pixel size.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }
}

/// Builds composite map images from a tile server, through a disk cache.
pub struct OsmManager<C: HttpClient> {
    fetcher: TileFetcher<C>,
    tile_size: u32,
    dir_source: CacheDirSource,
}

impl<C: HttpClient> OsmManager<C> {
    /// Create a manager using the given HTTP client.
    ///
    /// Resolves the cache directory immediately, so an unusable cache
    /// location fails here, before any network access.
    pub fn with_client(config: ManagerConfig, client: C) -> Result<Self, CacheError> {
        let (dir, dir_source) = cache::resolve_cache_dir(config.cache_dir.as_deref())?;
        let fetcher = TileFetcher::new(client, config.source, dir);
        Ok(Self {
            fetcher,
            tile_size: config.tile_size,
            dir_source,
        })
    }

    /// The resolved cache directory.
    pub fn cache_dir(&self) -> &Path {
        self.fetcher.cache_dir()
    }

    /// How the cache directory was obtained (advisory: `Created` and
    /// `Fallback` mean the requested location was not used as-is).
    pub fn cache_dir_source(&self) -> CacheDirSource {
        self.dir_source
    }

    /// The tile fetcher, for callers that want single tiles.
    pub fn fetcher(&self) -> &TileFetcher<C> {
        &self.fetcher
    }

    /// Builds the composite image covering `bounds` at `zoom`.
    ///
    /// Returns the stitched raster and the geographic bounds it actually
    /// covers, a superset of the request snapped to whole tiles. The
    /// caller owns the returned raster.
    pub fn create_map_image(
        &self,
        bounds: &BoundingBox,
        zoom: u8,
    ) -> Result<(RgbaImage, BoundingBox), CompositeError> {
        Compositor::new(&self.fetcher, self.tile_size).build(bounds, zoom)
    }
}

impl OsmManager<ReqwestClient> {
    /// Create a manager backed by a default reqwest client.
    pub fn new(config: ManagerConfig) -> Result<Self, ManagerError> {
        let client = ReqwestClient::new()?;
        Ok(Self::with_client(config, client)?)
    }
}
