//! OSMViz - slippy-map tile compositing with a disk cache
//!
//! This library converts a geographic bounding box into a single composite
//! raster assembled from slippy-map tiles, caching every downloaded tile
//! on disk so repeated builds touch the network only for tiles it has not
//! seen before.
//!
//! # Architecture
//!
//! ```text
//! OsmManager ──► Compositor ──► TileFetcher ──► HttpClient
//!                    │               │
//!                 coord           cache (flat PNG directory)
//! ```
//!
//! - [`coord`] - pure Web Mercator math between (lat, lon, zoom) and tile
//!   indices, and back to a tile's northwest corner;
//! - [`cache`] - cache directory resolution and collision-free filenames;
//! - [`fetch`] - cache-first tile acquisition over HTTP, fail-fast;
//! - [`composite`] - tile range computation and stitching;
//! - [`manager`] - the context object tying it all together.
//!
//! # Example
//!
//! ```no_run
//! use osmviz::{BoundingBox, ManagerConfig, OsmManager};
//!
//! let manager = OsmManager::new(ManagerConfig::default().with_cache_dir("maptiles"))?;
//! let bounds = BoundingBox::new(-24.87822, -24.87160, -65.46543, -65.45390);
//! let (image, covered) = manager.create_map_image(&bounds, 17)?;
//! image.save("map.png")?;
//! println!("covers {:?}", covered);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cache;
pub mod composite;
pub mod coord;
pub mod fetch;
pub mod manager;

pub use cache::{resolve_cache_dir, source_prefix, CacheDirSource, CacheError};
pub use composite::{CompositeError, Compositor, TILE_SIZE};
pub use coord::{tile_nw_lat_lon, to_tile_coord, BoundingBox, TileCoord};
pub use fetch::{FetchError, HttpClient, ReqwestClient, TileFetcher, TileSource};
pub use manager::{ManagerConfig, ManagerError, OsmManager};
