#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! AQI prediction adapter.
//!
//! Wraps an externally supplied regression model behind the one-method
//! [`AqiModel`] trait and degrades gracefully when it is missing or
//! failing: model output verbatim, then a deterministic weighted-sum
//! formula over the feature columns, then (only if the feature matrix is
//! malformed) a uniform-random placeholder. Each tier drop is logged; the
//! tier that actually produced the values is returned to the caller so
//! degraded output is never mistaken for model output.

pub mod knn;

use aqi_map_features::FeatureMatrix;
use rand::Rng;
use rand_distr::Normal;

pub use knn::{KnnModel, load_knn_model};

/// Errors from loading or invoking a prediction model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Model artifact could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Model artifact is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Model artifact or input has inconsistent dimensions.
    #[error("Shape error: {message}")]
    Shape {
        /// Description of the mismatch.
        message: String,
    },
}

/// The single capability a prediction backend must expose.
///
/// Any regression backend satisfying this contract is substitutable; the
/// pipeline never inspects the model beyond calling it. Matrix rows follow
/// the feature synthesizer's output order and width for the pipeline in
/// use (5 regional, 8 world). The output range is a documented
/// precondition of the backend, not validated here.
pub trait AqiModel {
    /// Predicts one AQI value per feature row.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the input is incompatible with the model.
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>, ModelError>;
}

/// Which tier of the adapter produced the prediction values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionTier {
    /// The external model's output, verbatim.
    Model,
    /// The deterministic weighted-sum fallback formula.
    Formula,
    /// Uniform-random placeholder values: output is no longer derived
    /// from the input features. Surfaced as a warning.
    Degraded,
}

/// Prediction values plus the tier that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    /// One AQI value per feature row, in row order.
    pub values: Vec<f64>,
    /// Fidelity tier of the values.
    pub tier: PredictionTier,
}

/// Weights and constraints for one pipeline's fallback formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackProfile {
    /// Per-column weights; length must equal the pipeline's feature width.
    pub weights: &'static [f64],
    /// Constant added to every weighted sum.
    pub base_offset: f64,
    /// Standard deviation of the additive Gaussian noise.
    pub noise_std: f64,
    /// Lower clip bound of the final prediction.
    pub clip_min: f64,
    /// Upper clip bound of the final prediction.
    pub clip_max: f64,
}

/// Regional fallback: urban·80 + industrial·60 + traffic·40 + topo·20
/// (the weather column carries no weight), noise σ=10, clipped to
/// `[0, 300]`.
pub const REGIONAL_FALLBACK: FallbackProfile = FallbackProfile {
    weights: &[80.0, 60.0, 40.0, 0.0, 20.0],
    base_offset: 0.0,
    noise_std: 10.0,
    clip_min: 0.0,
    clip_max: 300.0,
};

/// World fallback: cityInfluence·120 + industrial·80 + desert·60 −
/// ocean·30 − polar·20 − forest·15 + population·40 + weather·10, +30 base
/// offset, noise σ=8, clipped to `[5, 400]`.
pub const WORLD_FALLBACK: FallbackProfile = FallbackProfile {
    weights: &[120.0, 80.0, 60.0, -30.0, -20.0, -15.0, 40.0, 10.0],
    base_offset: 30.0,
    noise_std: 8.0,
    clip_min: 5.0,
    clip_max: 400.0,
};

/// Bounds of the uniform-random last-resort placeholder.
const DEGRADED_RANGE: (f64, f64) = (20.0, 150.0);

/// Predicts AQI values for a feature matrix with tiered fallback.
///
/// - If `model` is present and its `predict` succeeds, the output is
///   returned verbatim ([`PredictionTier::Model`]).
/// - Otherwise a weighted linear combination per `profile` is computed,
///   with Gaussian noise and clipping ([`PredictionTier::Formula`]).
/// - If even that is impossible because the matrix width does not match
///   the profile, a uniform-random vector in `[20, 150]` is returned and
///   a warning is logged ([`PredictionTier::Degraded`]).
pub fn predict_with_fallback<R: Rng + ?Sized>(
    model: Option<&dyn AqiModel>,
    profile: &FallbackProfile,
    features: &FeatureMatrix,
    rng: &mut R,
) -> PredictionOutcome {
    if let Some(model) = model {
        match model.predict(features) {
            Ok(values) => {
                return PredictionOutcome {
                    values,
                    tier: PredictionTier::Model,
                };
            }
            Err(err) => {
                log::warn!("Model prediction failed, using fallback formula: {err}");
            }
        }
    } else {
        log::info!("No model supplied, using fallback formula");
    }

    if features.width() == profile.weights.len() {
        PredictionOutcome {
            values: formula_predictions(profile, features, rng),
            tier: PredictionTier::Formula,
        }
    } else {
        log::warn!(
            "Feature matrix width {} does not match fallback profile width {}; \
             emitting placeholder predictions not derived from features",
            features.width(),
            profile.weights.len()
        );
        let values = (0..features.len())
            .map(|_| rng.gen_range(DEGRADED_RANGE.0..=DEGRADED_RANGE.1))
            .collect();
        PredictionOutcome {
            values,
            tier: PredictionTier::Degraded,
        }
    }
}

/// The deterministic weighted-sum formula with noise and clipping.
fn formula_predictions<R: Rng + ?Sized>(
    profile: &FallbackProfile,
    features: &FeatureMatrix,
    rng: &mut R,
) -> Vec<f64> {
    let noise = Normal::new(0.0, profile.noise_std).expect("finite stddev");

    features
        .rows()
        .map(|row| {
            let base: f64 = row
                .iter()
                .zip(profile.weights)
                .map(|(value, weight)| value * weight)
                .sum();
            (base + profile.base_offset + rng.sample(noise))
                .clamp(profile.clip_min, profile.clip_max)
        })
        .collect()
}
