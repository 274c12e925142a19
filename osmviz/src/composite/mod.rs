//! Image compositing.
//!
//! Assembles the tiles covering a bounding box into one raster. The
//! requested box is snapped outward to whole tiles, so the composite
//! always covers a superset of the request; the recomputed bounds are
//! returned alongside the image so callers can position overlays
//! correctly.

use std::path::PathBuf;

use image::{imageops, RgbaImage};
use thiserror::Error;
use tracing::{debug, info};

use crate::coord::{tile_nw_lat_lon, to_tile_coord, BoundingBox, TileCoord};
use crate::fetch::{FetchError, HttpClient, TileFetcher};

/// Pixel side length of a slippy-map tile.
pub const TILE_SIZE: u32 = 256;

/// Errors that can occur while building a composite.
///
/// Both kinds abort the build at the first failing tile; no partial
/// composite is ever returned and no blank tile is substituted.
#[derive(Debug, Error)]
pub enum CompositeError {
    /// A tile could not be acquired.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A fetched file is not a valid image.
    #[error("failed to decode tile image {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The tile range covers more pixels than a raster can address.
    #[error("composite of {tiles_x}x{tiles_y} tiles at {tile_size} px/tile exceeds raster limits")]
    TooLarge {
        tiles_x: u64,
        tiles_y: u64,
        tile_size: u32,
    },
}

/// Stitches cached/downloaded tiles into a single raster.
pub struct Compositor<'a, C: HttpClient> {
    fetcher: &'a TileFetcher<C>,
    tile_size: u32,
}

impl<'a, C: HttpClient> Compositor<'a, C> {
    /// Create a compositor drawing tiles through `fetcher`.
    ///
    /// `tile_size` must match the pixel size of the tiles the source
    /// actually serves (conventionally [`TILE_SIZE`]).
    pub fn new(fetcher: &'a TileFetcher<C>, tile_size: u32) -> Self {
        Self { fetcher, tile_size }
    }

    /// Builds the composite covering `bounds` at `zoom`.
    ///
    /// Returns the raster together with the geographic bounds it actually
    /// covers, which enclose the requested box (whole tiles are fetched).
    /// The raster is `tile_count_x * tile_size` by
    /// `tile_count_y * tile_size` pixels.
    ///
    /// # Errors
    ///
    /// The first tile that fails to download or decode aborts the whole
    /// build.
    pub fn build(
        &self,
        bounds: &BoundingBox,
        zoom: u8,
    ) -> Result<(RgbaImage, BoundingBox), CompositeError> {
        // Northwest corner pairs max_lat with min_lon; y grows southward
        let nw = to_tile_coord(bounds.min_lon, bounds.max_lat, zoom);
        let se = to_tile_coord(bounds.max_lon, bounds.min_lat, zoom);
        let (min_x, min_y) = (nw.x, nw.y);
        let (max_x, max_y) = (se.x, se.y);

        // Snap the bounds outward to the fetched tile grid: the NW corner
        // of the first tile, and the NW corner of the tile one past the
        // last (i.e. the SE corner of the last tile).
        let (new_max_lat, new_min_lon) = tile_nw_lat_lon(min_x, min_y, zoom);
        let (new_min_lat, new_max_lon) = tile_nw_lat_lon(max_x + 1, max_y + 1, zoom);
        let actual = BoundingBox::new(new_min_lat, new_max_lat, new_min_lon, new_max_lon);

        let ts = self.tile_size;
        // Pixel dimensions can overflow u32 for wide ranges at high zoom,
        // so size the raster in u64 and reject anything unaddressable
        // before touching the network.
        let tiles_x = u64::from(max_x - min_x) + 1;
        let tiles_y = u64::from(max_y - min_y) + 1;
        let too_large = || CompositeError::TooLarge {
            tiles_x,
            tiles_y,
            tile_size: ts,
        };
        let width = u32::try_from(tiles_x * u64::from(ts)).map_err(|_| too_large())?;
        let height = u32::try_from(tiles_y * u64::from(ts)).map_err(|_| too_large())?;
        let mut raster = RgbaImage::new(width, height);

        let total = tiles_x * tiles_y;
        info!(tiles = total, width, height, zoom, "assembling composite");

        // Placement is by absolute offset, so traversal order is
        // immaterial to the result.
        for x in min_x..=max_x {
            for y in min_y..=max_y {
                let tile = TileCoord::new(x, y, zoom);
                let path = self.fetcher.fetch(&tile)?;
                let img = image::open(&path)
                    .map_err(|e| CompositeError::Decode { path, source: e })?
                    .into_rgba8();

                let x_off = (ts * (x - min_x)) as i64;
                let y_off = (ts * (y - min_y)) as i64;
                imageops::replace(&mut raster, &img, x_off, y_off);
                debug!(tile = ?tile, x_off, y_off, "tile placed");
            }
        }

        Ok((raster, actual))
    }
}
