//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and Web Mercator slippy-map tile coordinates, and back from tile indices
//! to the geographic position of a tile's northwest corner.
//!
//! These are pure functions with no error states: the projection is only
//! meaningful for |lat| below ~85.05° (the Web Mercator cutoff), and inputs
//! outside that range are not guarded against.

mod types;

pub use types::{BoundingBox, TileCoord};

use std::f64::consts::PI;

/// Converts geographic coordinates to the tile containing them.
///
/// Fractional tile indices are truncated toward zero, which is the
/// standard slippy-map convention.
///
/// # Arguments
///
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
/// * `lat` - Latitude in degrees (within the Web Mercator range)
/// * `zoom` - Zoom level
#[inline]
pub fn to_tile_coord(lon: f64, lat: f64, zoom: u8) -> TileCoord {
    let n = 2.0_f64.powi(zoom as i32);

    // Convert longitude to tile X coordinate
    let x = ((lon + 180.0) / 360.0 * n) as u32;

    // Convert latitude to tile Y coordinate using Web Mercator projection.
    // asinh(tan φ) is ln(tan φ + sec φ).
    let lat_rad = lat * PI / 180.0;
    let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n) as u32;

    TileCoord { x, y, zoom }
}

/// Converts tile indices back to geographic coordinates.
///
/// Returns the `(lat, lon)` of the tile's northwest (top-left) corner.
/// Indices one past the grid edge (`x` or `y` equal to `2^zoom`) are
/// accepted so the southeast corner of the last tile can be computed.
#[inline]
pub fn tile_nw_lat_lon(x: u32, y: u32, zoom: u8) -> (f64, f64) {
    let n = 2.0_f64.powi(zoom as i32);

    // Convert tile X coordinate to longitude
    let lon = x as f64 / n * 360.0 - 180.0;

    // Convert tile Y coordinate to latitude using inverse Web Mercator
    let lat_rad = (PI * (1.0 - 2.0 * y as f64 / n)).sinh().atan();
    let lat = lat_rad * 180.0 / PI;

    (lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_york_city_at_zoom_16() {
        // New York City: 40.7128°N, 74.0060°W
        let tile = to_tile_coord(-74.0060, 40.7128, 16);
        assert_eq!(tile.x, 19295);
        assert_eq!(tile.y, 24640);
        assert_eq!(tile.zoom, 16);
    }

    #[test]
    fn test_salta_at_zoom_17() {
        // Northwest and southeast corners of the Salta reference box
        let nw = to_tile_coord(-65.46543, -24.87160, 17);
        let se = to_tile_coord(-65.45390, -24.87822, 17);

        assert_eq!((nw.x, nw.y), (41700, 74890));
        assert_eq!((se.x, se.y), (41704, 74892));
    }

    #[test]
    fn test_tile_nw_lat_lon_northwest_corner() {
        let (lat, lon) = tile_nw_lat_lon(19295, 24640, 16);

        // Should be close to NYC but not exact (northwest corner of tile)
        assert!((lat - 40.713).abs() < 0.01);
        assert!((lon - (-74.007)).abs() < 0.01);
    }

    #[test]
    fn test_tile_nw_lat_lon_at_equator() {
        // At zoom 10, tile (512, 512) has its corner at (0, 0)
        let (lat, lon) = tile_nw_lat_lon(512, 512, 10);

        assert!(lat.abs() < 1e-9, "lat {} should be 0", lat);
        assert!(lon.abs() < 1e-9, "lon {} should be 0", lon);
    }

    #[test]
    fn test_tile_nw_lat_lon_one_past_grid_edge() {
        // x = y = 2^zoom addresses the far corner of the last tile
        let (lat, lon) = tile_nw_lat_lon(1024, 1024, 10);

        assert!((lon - 180.0).abs() < 1e-9);
        assert!((lat - (-85.0511)).abs() < 0.001);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let original_lat = 40.7128;
        let original_lon = -74.0060;
        let zoom = 16;

        let tile = to_tile_coord(original_lon, original_lat, zoom);
        let (converted_lat, converted_lon) = tile_nw_lat_lon(tile.x, tile.y, zoom);

        // Should be close (within tile precision). At zoom 16 a tile is
        // about 0.005° wide.
        assert!((converted_lat - original_lat).abs() < 0.01);
        assert!((converted_lon - original_lon).abs() < 0.01);
    }

    #[test]
    fn test_point_stays_in_its_tile() {
        // A point nudged just inside the round-tripped northwest corner
        // must belong to the same tile as the original point. (The corner
        // itself sits on the tile boundary, where float rounding could
        // flip the index.)
        let lat = 51.5074; // London
        let lon = -0.1278;

        for zoom in [0, 5, 10, 15, 18] {
            let tile = to_tile_coord(lon, lat, zoom);
            let (corner_lat, corner_lon) = tile_nw_lat_lon(tile.x, tile.y, zoom);
            let (next_lat, next_lon) = tile_nw_lat_lon(tile.x + 1, tile.y + 1, zoom);

            let inside_lat = (corner_lat + next_lat) / 2.0;
            let inside_lon = (corner_lon + next_lon) / 2.0;
            let back = to_tile_coord(inside_lon, inside_lat, zoom);

            assert_eq!(back.x, tile.x, "zoom {}", zoom);
            assert_eq!(back.y, tile.y, "zoom {}", zoom);
        }
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_roundtrip_property(
                lat in -85.05..85.05_f64,
                lon in -180.0..180.0_f64,
                zoom in 0u8..=18
            ) {
                // Convert to tile and back
                let tile = to_tile_coord(lon, lat, zoom);
                let (converted_lat, converted_lon) = tile_nw_lat_lon(tile.x, tile.y, zoom);

                // One tile's angular extent in longitude; latitude tiles
                // are never taller than this near the equator and shrink
                // toward the poles, so it bounds both axes.
                let tile_size = 360.0 / (2.0_f64.powi(zoom as i32));

                prop_assert!(
                    (converted_lat - lat).abs() < tile_size,
                    "Latitude roundtrip failed: {} -> {} (tile_size: {})",
                    lat, converted_lat, tile_size
                );
                prop_assert!(
                    (converted_lon - lon).abs() < tile_size,
                    "Longitude roundtrip failed: {} -> {} (tile_size: {})",
                    lon, converted_lon, tile_size
                );
            }

            #[test]
            fn test_tile_coords_in_bounds(
                lat in -85.05..85.05_f64,
                lon in -180.0..180.0_f64,
                zoom in 0u8..=18
            ) {
                let tile = to_tile_coord(lon, lat, zoom);

                let max_tile = 2u32.pow(zoom as u32);
                prop_assert!(
                    tile.x < max_tile,
                    "x {} exceeds maximum {} at zoom {}",
                    tile.x, max_tile, zoom
                );
                prop_assert!(
                    tile.y < max_tile,
                    "y {} exceeds maximum {} at zoom {}",
                    tile.y, max_tile, zoom
                );
                prop_assert_eq!(tile.zoom, zoom);
            }

            #[test]
            fn test_longitude_monotonic(
                lat in -80.0..80.0_f64,
                lon1 in -180.0..0.0_f64,
                delta in 0.0..170.0_f64,
                zoom in 0u8..=18
            ) {
                // For fixed latitude, x is non-decreasing in longitude
                let lon2 = lon1 + delta;
                let tile1 = to_tile_coord(lon1, lat, zoom);
                let tile2 = to_tile_coord(lon2, lat, zoom);

                prop_assert!(
                    tile1.x <= tile2.x,
                    "x not monotonic: lon {} -> x {}, lon {} -> x {}",
                    lon1, tile1.x, lon2, tile2.x
                );
            }

            #[test]
            fn test_latitude_anti_monotonic(
                lon in -180.0..180.0_f64,
                lat1 in -85.0..0.0_f64,
                delta in 0.0..85.0_f64,
                zoom in 0u8..=18
            ) {
                // y grows southward, so increasing latitude cannot
                // increase y
                let lat2 = lat1 + delta;
                let tile1 = to_tile_coord(lon, lat1, zoom);
                let tile2 = to_tile_coord(lon, lat2, zoom);

                prop_assert!(
                    tile2.y <= tile1.y,
                    "y not anti-monotonic: lat {} -> y {}, lat {} -> y {}",
                    lat1, tile1.y, lat2, tile2.y
                );
            }

            #[test]
            fn test_tile_nw_lat_lon_in_bounds(
                x_raw in 0u32..65536,
                y_raw in 0u32..65536,
                zoom in 0u8..=16
            ) {
                let max_coord = 2u32.pow(zoom as u32);
                let x = x_raw % max_coord;
                let y = y_raw % max_coord;

                let (lat, lon) = tile_nw_lat_lon(x, y, zoom);

                prop_assert!(
                    (-85.06..=85.06).contains(&lat),
                    "Latitude {} out of Web Mercator range",
                    lat
                );
                prop_assert!(
                    (-180.0..=180.0).contains(&lon),
                    "Longitude {} out of bounds",
                    lon
                );
            }
        }
    }
}
