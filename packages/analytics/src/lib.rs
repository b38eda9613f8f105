#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Prediction-grid summary statistics.
//!
//! Reduces a prediction vector into min/max/mean/stddev plus per-category
//! point counts over the six AQI bands. Values outside `[0, 500]` are
//! tallied separately rather than dropped or forced into the nearest band.

use aqi_map_aqi_models::AqiCategory;
use serde::{Deserialize, Serialize};

/// Count of predictions falling in a single AQI band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// The AQI band.
    pub category: AqiCategory,
    /// Number of predictions in the band.
    pub count: u64,
}

/// Summary statistics for one prediction grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSummary {
    /// Smallest prediction.
    pub min: f64,
    /// Largest prediction.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Total number of predictions.
    pub total: u64,
    /// Counts per AQI band, in severity order, all six bands present.
    pub by_category: Vec<CategoryCount>,
    /// Predictions outside `[0, 500]` that have no band.
    pub out_of_range: u64,
}

impl GridSummary {
    /// The count for one band.
    #[must_use]
    pub fn count_for(&self, category: AqiCategory) -> u64 {
        self.by_category
            .iter()
            .find(|entry| entry.category == category)
            .map_or(0, |entry| entry.count)
    }
}

/// Reduces a prediction vector into a [`GridSummary`].
///
/// In-range predictions partition exactly into the six bands; an
/// out-of-range or non-finite value contributes to `out_of_range` (and to
/// min/max/mean/stddev if finite) but to no band. An empty input yields
/// an all-zero summary.
#[must_use]
pub fn aggregate(predictions: &[f64]) -> GridSummary {
    let mut counts = [0_u64; 6];
    let mut out_of_range = 0_u64;

    for &value in predictions {
        match AqiCategory::classify(value) {
            Some(category) => {
                counts[category as usize] += 1;
            }
            None => out_of_range += 1,
        }
    }

    let by_category = AqiCategory::all()
        .iter()
        .map(|&category| CategoryCount {
            category,
            count: counts[category as usize],
        })
        .collect();

    let finite: Vec<f64> = predictions.iter().copied().filter(|v| v.is_finite()).collect();
    let (min, max, mean, std_dev) = if finite.is_empty() {
        (0.0, 0.0, 0.0, 0.0)
    } else {
        #[allow(clippy::cast_precision_loss)]
        let n = finite.len() as f64;
        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = finite.iter().sum::<f64>() / n;
        let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        (min, max, mean, variance.sqrt())
    };

    GridSummary {
        min,
        max,
        mean,
        std_dev,
        total: predictions.len() as u64,
        by_category,
        out_of_range,
    }
}
