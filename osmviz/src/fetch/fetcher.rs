//! Cache-backed tile retrieval.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{FetchError, HttpClient, TileSource};
use crate::cache;
use crate::coord::TileCoord;

/// Fetches tiles into the disk cache and hands out their paths.
///
/// A fetch first consults the cache; only on a miss does it touch the
/// network. Downloads are written to a `.part` file and renamed into
/// place, so a failed or interrupted fetch never leaves a partial file
/// that a later run would mistake for a valid cache hit.
pub struct TileFetcher<C: HttpClient> {
    client: C,
    source: TileSource,
    cache_dir: PathBuf,
    prefix: String,
}

impl<C: HttpClient> TileFetcher<C> {
    /// Create a fetcher for `source`, caching into `cache_dir`.
    ///
    /// The directory must already be resolved (see
    /// [`resolve_cache_dir`](crate::cache::resolve_cache_dir)).
    pub fn new(client: C, source: TileSource, cache_dir: PathBuf) -> Self {
        let prefix = source.cache_prefix();
        Self {
            client,
            source,
            cache_dir,
            prefix,
        }
    }

    /// The tile source this fetcher downloads from.
    pub fn source(&self) -> &TileSource {
        &self.source
    }

    /// The HTTP client in use.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The resolved cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Where the given tile lives (or would live) in the cache.
    pub fn cache_path(&self, tile: &TileCoord) -> PathBuf {
        cache::tile_path(&self.cache_dir, &self.prefix, tile.zoom, tile.x, tile.y)
    }

    /// Returns the local path of the tile image, downloading it on a
    /// cache miss.
    ///
    /// On success the returned path is guaranteed to exist. On failure
    /// the error carries the attempted URL; nothing is written to the
    /// cache and no retry is attempted.
    pub fn fetch(&self, tile: &TileCoord) -> Result<PathBuf, FetchError> {
        let path = self.cache_path(tile);
        if path.is_file() {
            debug!(tile = ?tile, path = %path.display(), "tile cache hit");
            return Ok(path);
        }

        let url = self.source.tile_url(tile);
        debug!(tile = ?tile, %url, "tile cache miss, downloading");
        let bytes = self.client.get(&url)?;

        // Write-to-temp-then-rename keeps half-written files out of the
        // cache namespace.
        let mut part = path.clone().into_os_string();
        part.push(".part");
        let part = PathBuf::from(part);

        fs::write(&part, &bytes).map_err(|e| FetchError::Write {
            path: part.clone(),
            source: e,
        })?;
        fs::rename(&part, &path).map_err(|e| FetchError::Write {
            path: path.clone(),
            source: e,
        })?;

        Ok(path)
    }
}
