#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Synthetic pollution-driver feature synthesis.
//!
//! Turns a geographic sample grid into a fixed-width feature matrix of
//! semantic drivers (urban proximity, industrial activity, desert/ocean/
//! polar/forest modifiers, population proxy, weather noise). Two modes:
//!
//! - **regional**: 5 columns per point, distance-from-center model
//! - **world**: 8 columns per point, city-plume + regional-zone model
//!
//! Column order is part of the contract with the prediction adapter:
//! column `i` means the same driver for every point in one run. All random
//! draws flow through an injected [`rand::Rng`], so tests control
//! determinism without touching process-global state.

pub mod cities;
pub mod regional;
pub mod world;
pub mod zones;

pub use regional::{REGIONAL_FEATURE_WIDTH, synthesize_regional};
pub use world::{WORLD_FEATURE_WIDTH, synthesize_world};

/// A row-major matrix of feature vectors, one row per grid point.
///
/// Width is fixed at construction; every pushed row must match it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    width: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    /// Creates an empty matrix with the given fixed row width.
    #[must_use]
    pub const fn new(width: usize) -> Self {
        Self {
            width,
            data: Vec::new(),
        }
    }

    /// Creates an empty matrix with capacity reserved for `rows` rows.
    #[must_use]
    pub fn with_capacity(width: usize, rows: usize) -> Self {
        Self {
            width,
            data: Vec::with_capacity(width * rows),
        }
    }

    /// Appends one feature vector.
    ///
    /// # Panics
    ///
    /// Panics if `row.len()` does not match the matrix width.
    pub fn push_row(&mut self, row: &[f64]) {
        assert_eq!(
            row.len(),
            self.width,
            "feature row width {} does not match matrix width {}",
            row.len(),
            self.width
        );
        self.data.extend_from_slice(row);
    }

    /// Fixed row width (number of feature columns).
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows (feature vectors).
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.data.len() / self.width
        }
    }

    /// Whether the matrix has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The `i`-th feature vector.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.width..(i + 1) * self.width]
    }

    /// Iterates over feature vectors in grid order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_keep_insertion_order() {
        let mut m = FeatureMatrix::new(2);
        m.push_row(&[1.0, 2.0]);
        m.push_row(&[3.0, 4.0]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.row(0), &[1.0, 2.0]);
        assert_eq!(m.row(1), &[3.0, 4.0]);
        assert_eq!(m.rows().count(), 2);
    }

    #[test]
    #[should_panic(expected = "does not match matrix width")]
    fn mismatched_row_width_panics() {
        let mut m = FeatureMatrix::new(3);
        m.push_row(&[1.0, 2.0]);
    }
}
