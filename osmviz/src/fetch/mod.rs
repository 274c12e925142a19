//! Tile acquisition.
//!
//! This module turns a [`TileCoord`](crate::coord::TileCoord) into a local
//! file path, downloading the tile on a cache miss and persisting it into
//! the disk cache. Fetching is fail-fast: a tile that cannot be retrieved
//! aborts the request with an error carrying the attempted URL, and no
//! retry is attempted here. Callers decide whether to retry at a higher
//! level.

mod fetcher;
mod http;
mod source;

pub use fetcher::TileFetcher;
pub use http::{HttpClient, ReqwestClient};
pub use source::TileSource;

#[cfg(test)]
pub use http::tests::MockHttpClient;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while acquiring a tile.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client itself could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(String),

    /// The HTTP request could not be performed (connection failure,
    /// timeout, malformed URL, truncated body).
    #[error("unable to retrieve {url}: {message}")]
    Request { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u16 },

    /// The downloaded bytes could not be persisted in the cache.
    #[error("failed to write tile to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
