#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic sample grid builder.
//!
//! Produces the row-major lat/lon meshes that the feature synthesizer and
//! renderer consume. Rows correspond to latitude samples, columns to
//! longitude samples, both linearly spaced inclusive of the bounding box
//! edges.

use serde::{Deserialize, Serialize};

/// A single latitude/longitude sample point, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Latitude in degrees, `[-90, 90]`.
    pub latitude: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a point from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Euclidean distance to another point in degree space.
    ///
    /// The synthetic pollution models work in raw degrees rather than
    /// great-circle distance, matching how the plume and proximity decay
    /// constants were calibrated.
    #[must_use]
    pub fn degree_distance(&self, other: &Self) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlon = self.longitude - other.longitude;
        dlat.hypot(dlon)
    }
}

/// A lat/lon bounding box. Callers guarantee `min < max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Southern edge, degrees.
    pub lat_min: f64,
    /// Northern edge, degrees.
    pub lat_max: f64,
    /// Western edge, degrees.
    pub lon_min: f64,
    /// Eastern edge, degrees.
    pub lon_max: f64,
}

impl BoundingBox {
    /// The whole-world bounding box.
    pub const WORLD: Self = Self {
        lat_min: -90.0,
        lat_max: 90.0,
        lon_min: -180.0,
        lon_max: 180.0,
    };

    /// Creates a bounding box. Caller guarantees `min < max` on both axes.
    #[must_use]
    pub const fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }
}

/// A row-major 2D mesh of [`GeoPoint`] samples over a bounding box.
///
/// Row `r`, column `c` holds the point at the `r`-th latitude sample and
/// `c`-th longitude sample. Latitude and longitude samples are each
/// monotonically non-decreasing, and the first/last samples match the
/// bounding box edges exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    points: Vec<GeoPoint>,
}

impl Grid {
    /// Builds a `rows × cols` grid over `bbox`.
    ///
    /// Latitude samples are `rows` values linearly spaced inclusive of
    /// `lat_min` and `lat_max`; longitude samples are `cols` values over
    /// `lon_min..=lon_max`. A single-sample axis yields its lower bound;
    /// a zero-sample axis yields an empty grid, which downstream stages
    /// reject with a shape error.
    #[must_use]
    pub fn build(bbox: &BoundingBox, rows: usize, cols: usize) -> Self {
        let lats = linspace(bbox.lat_min, bbox.lat_max, rows);
        let lons = linspace(bbox.lon_min, bbox.lon_max, cols);

        let mut points = Vec::with_capacity(rows * cols);
        for &lat in &lats {
            for &lon in &lons {
                points.push(GeoPoint::new(lat, lon));
            }
        }

        Self { rows, cols, points }
    }

    /// Number of latitude samples.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of longitude samples.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of sample points (`rows × cols`).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the grid has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point at row `r`, column `c`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= rows` or `c >= cols`.
    #[must_use]
    pub fn point(&self, r: usize, c: usize) -> GeoPoint {
        assert!(r < self.rows && c < self.cols, "grid index out of bounds");
        self.points[r * self.cols + c]
    }

    /// Iterates over all points in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, GeoPoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a GeoPoint;
    type IntoIter = std::slice::Iter<'a, GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// `n` values linearly spaced over `[start, end]`, inclusive of both ends.
/// `n == 0` yields an empty axis, `n == 1` just the start.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![start; n];
    }
    #[allow(clippy::cast_precision_loss)]
    let step = (end - start) / (n - 1) as f64;
    (0..n)
        .map(|i| {
            if i == n - 1 {
                // Land exactly on the requested endpoint.
                end
            } else {
                #[allow(clippy::cast_precision_loss)]
                let offset = step * i as f64;
                start + offset
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_rows_times_cols_points() {
        let bbox = BoundingBox::new(32.5, 33.0, -97.2, -96.5);
        for (rows, cols) in [(1, 1), (1, 7), (4, 4), (50, 50), (90, 180)] {
            let grid = Grid::build(&bbox, rows, cols);
            assert_eq!(grid.len(), rows * cols);
            assert_eq!(grid.rows(), rows);
            assert_eq!(grid.cols(), cols);
        }
    }

    #[test]
    fn axes_are_monotone_with_exact_endpoints() {
        let bbox = BoundingBox::new(32.5, 33.0, -97.2, -96.5);
        let grid = Grid::build(&bbox, 13, 29);

        for r in 0..grid.rows() {
            for c in 1..grid.cols() {
                assert!(grid.point(r, c).longitude >= grid.point(r, c - 1).longitude);
            }
        }
        for c in 0..grid.cols() {
            for r in 1..grid.rows() {
                assert!(grid.point(r, c).latitude >= grid.point(r - 1, c).latitude);
            }
        }

        assert_eq!(grid.point(0, 0).latitude, 32.5);
        assert_eq!(grid.point(12, 0).latitude, 33.0);
        assert_eq!(grid.point(0, 0).longitude, -97.2);
        assert_eq!(grid.point(0, 28).longitude, -96.5);
    }

    #[test]
    fn world_grid_covers_both_poles_and_datelines() {
        let grid = Grid::build(&BoundingBox::WORLD, 90, 180);
        assert_eq!(grid.point(0, 0).latitude, -90.0);
        assert_eq!(grid.point(89, 0).latitude, 90.0);
        assert_eq!(grid.point(0, 0).longitude, -180.0);
        assert_eq!(grid.point(0, 179).longitude, 180.0);
    }

    #[test]
    fn single_sample_axis_yields_lower_bound() {
        let bbox = BoundingBox::new(10.0, 20.0, 30.0, 40.0);
        let grid = Grid::build(&bbox, 1, 1);
        assert_eq!(grid.point(0, 0), GeoPoint::new(10.0, 30.0));
    }

    #[test]
    fn zero_sample_axis_yields_empty_grid() {
        let bbox = BoundingBox::new(10.0, 20.0, 30.0, 40.0);
        let grid = Grid::build(&bbox, 0, 5);
        assert!(grid.is_empty());
        assert_eq!(grid.len(), 0);
    }

    #[test]
    fn iteration_is_row_major() {
        let bbox = BoundingBox::new(0.0, 1.0, 0.0, 2.0);
        let grid = Grid::build(&bbox, 2, 3);
        let points: Vec<_> = grid.iter().copied().collect();
        assert_eq!(points[0], grid.point(0, 0));
        assert_eq!(points[1], grid.point(0, 1));
        assert_eq!(points[2], grid.point(0, 2));
        assert_eq!(points[3], grid.point(1, 0));
    }

    #[test]
    fn degree_distance_is_euclidean() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(3.0, 4.0);
        assert!((a.degree_distance(&b) - 5.0).abs() < 1e-12);
    }
}
