//! World-scale feature synthesis.
//!
//! Eight drivers per grid point: the summed plume influence of the major
//! cities, table-driven zone offsets (industrial, desert, ocean, polar,
//! forest), a random population proxy, and weather noise. Each column is
//! normalized by the scale its fallback weight was calibrated against.

use aqi_map_grid::{GeoPoint, Grid};
use rand::Rng;
use rand_distr::{Exp, Normal};

use crate::FeatureMatrix;
use crate::cities::City;
use crate::zones::{
    DESERT_ZONES, FOREST_ZONES, INDUSTRIAL_ZONES, ocean_offset, polar_offset, zone_offset,
};

/// Number of feature columns in the world pipeline.
pub const WORLD_FEATURE_WIDTH: usize = 8;

/// Column indices, part of the prediction-adapter contract.
pub mod column {
    /// Summed city plume influence, normalized by 100.
    pub const CITY_INFLUENCE: usize = 0;
    /// Industrial-belt offset, normalized by 50.
    pub const INDUSTRIAL: usize = 1;
    /// Desert offset, normalized by 40.
    pub const DESERT: usize = 2;
    /// Absolute ocean offset, normalized by 30.
    pub const OCEAN: usize = 3;
    /// Absolute polar offset, normalized by 20.
    pub const POLAR: usize = 4;
    /// Absolute forest offset, normalized by 15.
    pub const FOREST: usize = 5;
    /// Exponential population proxy, normalized by 20.
    pub const POPULATION: usize = 6;
    /// Gaussian weather noise, normalized by 10.
    pub const WEATHER: usize = 7;
}

/// Characteristic plume radius in degrees: each city's influence decays
/// as `exp(-distance / 5.0)`.
const CITY_PLUME_RADIUS: f64 = 5.0;

/// Mean of the exponential population draw (before the ×10 scale).
const POPULATION_MEAN: f64 = 0.2;

/// Synthesizes the 8-column world feature matrix, one row per grid point
/// in row-major order.
///
/// City influence and the zone columns are deterministic functions of
/// position; population and weather are independent draws from `rng`.
///
/// # Panics
///
/// Never panics for the fixed distribution parameters used here.
#[must_use]
pub fn synthesize_world<R: Rng + ?Sized>(
    grid: &Grid,
    cities: &[City],
    rng: &mut R,
) -> FeatureMatrix {
    let population = Exp::new(1.0 / POPULATION_MEAN).expect("positive rate");
    let weather = Normal::new(0.0, 5.0).expect("finite stddev");

    let mut features = FeatureMatrix::with_capacity(WORLD_FEATURE_WIDTH, grid.len());
    for point in grid {
        let lat = point.latitude;
        let lon = point.longitude;
        features.push_row(&[
            city_influence(point, cities) / 100.0,
            zone_offset(INDUSTRIAL_ZONES, lat, lon) / 50.0,
            zone_offset(DESERT_ZONES, lat, lon) / 40.0,
            ocean_offset(lat, lon).abs() / 30.0,
            polar_offset(lat).abs() / 20.0,
            zone_offset(FOREST_ZONES, lat, lon).abs() / 15.0,
            rng.sample(population) * 10.0 / 20.0,
            rng.sample(weather) / 10.0,
        ]);
    }
    features
}

/// Summed plume influence of all reference cities at a point.
///
/// Each city contributes `baseline · exp(-distance / 5.0)`; contributions
/// sum across cities rather than taking the nearest.
#[must_use]
pub fn city_influence(point: &GeoPoint, cities: &[City]) -> f64 {
    cities
        .iter()
        .map(|city| {
            let dist = point.degree_distance(&GeoPoint::new(city.latitude, city.longitude));
            city.baseline_pollution * (-dist / CITY_PLUME_RADIUS).exp()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use aqi_map_grid::BoundingBox;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::cities::MAJOR_CITIES;

    #[test]
    fn one_row_per_point_with_world_width() {
        let grid = Grid::build(&BoundingBox::WORLD, 9, 18);
        let mut rng = StdRng::seed_from_u64(0);
        let features = synthesize_world(&grid, MAJOR_CITIES, &mut rng);
        assert_eq!(features.len(), grid.len());
        assert_eq!(features.width(), WORLD_FEATURE_WIDTH);
    }

    #[test]
    fn deterministic_columns_match_position() {
        let grid = Grid::build(&BoundingBox::WORLD, 9, 18);
        let a = synthesize_world(&grid, MAJOR_CITIES, &mut StdRng::seed_from_u64(1));
        let b = synthesize_world(&grid, MAJOR_CITIES, &mut StdRng::seed_from_u64(99));

        for (i, point) in grid.iter().enumerate() {
            let row = a.row(i);
            assert_eq!(
                row[column::CITY_INFLUENCE],
                city_influence(point, MAJOR_CITIES) / 100.0
            );
            for col in [
                column::INDUSTRIAL,
                column::DESERT,
                column::OCEAN,
                column::POLAR,
                column::FOREST,
            ] {
                assert_eq!(row[col], b.row(i)[col], "zone column {col} not reproducible");
            }
        }
    }

    #[test]
    fn city_influence_decays_with_distance() {
        let delhi = GeoPoint::new(28.7041, 77.1025);
        let nearby = GeoPoint::new(30.0, 78.0);
        let remote = GeoPoint::new(-50.0, -120.0);
        let at_city = city_influence(&delhi, MAJOR_CITIES);
        assert!(at_city >= 200.0, "Delhi contributes its full baseline");
        assert!(city_influence(&nearby, MAJOR_CITIES) < at_city);
        assert!(city_influence(&remote, MAJOR_CITIES) < 1.0);
    }

    #[test]
    fn zone_columns_are_normalized_magnitudes() {
        // A polar point: ocean gated off, polar column = 15/20.
        let grid = Grid::build(&BoundingBox::new(75.0, 80.0, -150.0, -140.0), 2, 2);
        let features = synthesize_world(&grid, MAJOR_CITIES, &mut StdRng::seed_from_u64(3));
        for row in features.rows() {
            assert_eq!(row[column::POLAR], 0.75);
            assert_eq!(row[column::OCEAN], 0.0);
        }

        // A mid-Pacific point: ocean column = 20/30, polar 0.
        let grid = Grid::build(&BoundingBox::new(20.0, 30.0, -160.0, -150.0), 2, 2);
        let features = synthesize_world(&grid, MAJOR_CITIES, &mut StdRng::seed_from_u64(3));
        for row in features.rows() {
            assert!((row[column::OCEAN] - 20.0 / 30.0).abs() < 1e-12);
            assert_eq!(row[column::POLAR], 0.0);
        }
    }

    #[test]
    fn random_columns_stay_in_expected_sign_ranges() {
        let grid = Grid::build(&BoundingBox::WORLD, 6, 12);
        let features = synthesize_world(&grid, MAJOR_CITIES, &mut StdRng::seed_from_u64(11));
        for row in features.rows() {
            assert!(row[column::POPULATION] >= 0.0);
            assert!(row[column::WEATHER].is_finite());
        }
    }
}
