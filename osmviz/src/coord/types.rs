//! Coordinate types for the Web Mercator tile grid.

/// A tile position in the slippy-map grid.
///
/// Tiles are addressed by `(x, y)` within a `2^zoom × 2^zoom` grid where
/// x increases eastward and y increases southward (north is up, so the
/// smaller y is the top row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Tile column (0 to 2^zoom - 1, west to east).
    pub x: u32,
    /// Tile row (0 to 2^zoom - 1, north to south).
    pub y: u32,
    /// Zoom level.
    pub zoom: u8,
}

impl TileCoord {
    /// Create a new tile coordinate.
    pub fn new(x: u32, y: u32, zoom: u8) -> Self {
        Self { x, y, zoom }
    }
}

/// A geographic bounding box in degrees.
///
/// Invariant: `min_lat < max_lat` and `min_lon < max_lon`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    ///
    /// Callers are responsible for upholding `min_lat < max_lat` and
    /// `min_lon < max_lon`.
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Whether the given point lies inside this box (edges inclusive).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    /// Whether `other` lies entirely inside this box (edges inclusive).
    pub fn encloses(&self, other: &BoundingBox) -> bool {
        self.min_lat <= other.min_lat
            && self.max_lat >= other.max_lat
            && self.min_lon <= other.min_lon
            && self.max_lon >= other.max_lon
    }
}
