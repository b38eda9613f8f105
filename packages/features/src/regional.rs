//! Regional (city-scale) feature synthesis.
//!
//! Five drivers per grid point, computed against a fixed reference center:
//! urban proximity decays with distance from the center, industrial /
//! traffic / weather drivers are independent random draws, and topography
//! is a deterministic function of position.

use aqi_map_grid::{GeoPoint, Grid};
use rand::Rng;
use rand_distr::{Exp, Gamma, Normal};

use crate::FeatureMatrix;

/// Number of feature columns in the regional pipeline.
pub const REGIONAL_FEATURE_WIDTH: usize = 5;

/// Column indices, part of the prediction-adapter contract.
pub mod column {
    /// `1 / (1 + 100·distance-from-center)`.
    pub const URBAN: usize = 0;
    /// Exponentially distributed industrial activity, mean 0.3.
    pub const INDUSTRIAL: usize = 1;
    /// Gamma-distributed traffic density, shape 2, scale 0.5.
    pub const TRAFFIC: usize = 2;
    /// Normally distributed weather driver, mean 0.5, stddev 0.2.
    pub const WEATHER: usize = 3;
    /// Deterministic topography driver, roughly `[0.4, 0.6]`.
    pub const TOPO: usize = 4;
}

/// Mean of the exponential industrial-activity draw.
const INDUSTRIAL_MEAN: f64 = 0.3;

/// Synthesizes the 5-column regional feature matrix, one row per grid
/// point in row-major order.
///
/// The urban and topography columns are deterministic functions of
/// position; the other three are independent draws from `rng` per point.
///
/// # Panics
///
/// Never panics for the fixed distribution parameters used here; the
/// constructors only reject non-positive rates.
#[must_use]
pub fn synthesize_regional<R: Rng + ?Sized>(
    grid: &Grid,
    center: GeoPoint,
    rng: &mut R,
) -> FeatureMatrix {
    let industrial = Exp::new(1.0 / INDUSTRIAL_MEAN).expect("positive rate");
    let traffic = Gamma::new(2.0, 0.5).expect("positive shape and scale");
    let weather = Normal::new(0.5, 0.2).expect("finite stddev");

    let mut features = FeatureMatrix::with_capacity(REGIONAL_FEATURE_WIDTH, grid.len());
    for point in grid {
        features.push_row(&[
            urban_factor(point, &center),
            rng.sample(industrial),
            rng.sample(traffic),
            rng.sample(weather),
            topo_factor(point),
        ]);
    }
    features
}

/// Urban proximity: approaches 1 at the center, decays toward 0 far away.
fn urban_factor(point: &GeoPoint, center: &GeoPoint) -> f64 {
    1.0 / (1.0 + 100.0 * point.degree_distance(center))
}

/// Topography driver: `sin(10·lat)·cos(10·lon)·0.1 + 0.5`, bounded to
/// roughly `[0.4, 0.6]`.
fn topo_factor(point: &GeoPoint) -> f64 {
    (point.latitude * 10.0).sin() * (point.longitude * 10.0).cos() * 0.1 + 0.5
}
