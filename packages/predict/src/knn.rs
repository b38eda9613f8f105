//! K-nearest-neighbors regression backend.
//!
//! The concrete model the CLI loads from disk: a JSON artifact holding the
//! training rows and targets of an externally trained KNN regressor.
//! Inference only — this crate never fits or updates the model.

use std::path::Path;

use aqi_map_features::FeatureMatrix;
use serde::{Deserialize, Serialize};

use crate::{AqiModel, ModelError};

/// Serialized form of a trained KNN regressor.
///
/// ```json
/// {
///   "k": 5,
///   "featureWidth": 5,
///   "trainFeatures": [[0.1, 0.3, ...], ...],
///   "trainTargets": [42.0, ...]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnnModel {
    /// Number of neighbors averaged per prediction.
    k: usize,
    /// Expected feature-vector width.
    feature_width: usize,
    /// Training feature rows, each of `feature_width` columns.
    train_features: Vec<Vec<f64>>,
    /// Training target AQI values, one per training row.
    train_targets: Vec<f64>,
}

impl KnnModel {
    /// Validates internal consistency of a deserialized artifact.
    fn validate(&self) -> Result<(), ModelError> {
        if self.k == 0 {
            return Err(ModelError::Shape {
                message: "k must be at least 1".into(),
            });
        }
        if self.train_features.is_empty() {
            return Err(ModelError::Shape {
                message: "model has no training rows".into(),
            });
        }
        if self.train_features.len() != self.train_targets.len() {
            return Err(ModelError::Shape {
                message: format!(
                    "{} training rows but {} targets",
                    self.train_features.len(),
                    self.train_targets.len()
                ),
            });
        }
        if let Some(row) = self
            .train_features
            .iter()
            .find(|row| row.len() != self.feature_width)
        {
            return Err(ModelError::Shape {
                message: format!(
                    "training row width {} does not match declared width {}",
                    row.len(),
                    self.feature_width
                ),
            });
        }
        Ok(())
    }
}

impl AqiModel for KnnModel {
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>, ModelError> {
        if features.width() != self.feature_width {
            return Err(ModelError::Shape {
                message: format!(
                    "input width {} does not match model width {}",
                    features.width(),
                    self.feature_width
                ),
            });
        }

        let k = self.k.min(self.train_features.len());
        let predictions = features
            .rows()
            .map(|row| {
                let mut distances: Vec<(f64, f64)> = self
                    .train_features
                    .iter()
                    .zip(&self.train_targets)
                    .map(|(train_row, &target)| (squared_distance(row, train_row), target))
                    .collect();
                distances.sort_by(|a, b| a.0.total_cmp(&b.0));
                let sum: f64 = distances[..k].iter().map(|(_, target)| target).sum();
                #[allow(clippy::cast_precision_loss)]
                {
                    sum / k as f64
                }
            })
            .collect();

        Ok(predictions)
    }
}

/// Squared Euclidean distance between two equal-width rows.
fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Loads and validates a KNN model artifact from disk.
///
/// # Errors
///
/// Returns [`ModelError`] if the file is missing, is not valid JSON, or
/// declares inconsistent shapes. Callers treat any of these as "model
/// unavailable" and continue on the fallback tier.
pub fn load_knn_model(path: &Path) -> Result<KnnModel, ModelError> {
    let raw = std::fs::read_to_string(path)?;
    let model: KnnModel = serde_json::from_str(&raw)?;
    model.validate()?;
    log::info!(
        "Loaded KNN model from {}: k={}, {} training rows, width {}",
        path.display(),
        model.k,
        model.train_features.len(),
        model.feature_width
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn tiny_model() -> KnnModel {
        KnnModel {
            k: 2,
            feature_width: 2,
            train_features: vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![10.0, 10.0],
                vec![11.0, 10.0],
            ],
            train_targets: vec![10.0, 20.0, 100.0, 120.0],
        }
    }

    #[test]
    fn predicts_mean_of_k_nearest_targets() {
        let model = tiny_model();
        let mut features = FeatureMatrix::new(2);
        features.push_row(&[0.1, 0.0]);
        features.push_row(&[10.5, 10.0]);

        let values = model.predict(&features).unwrap();
        assert_eq!(values, vec![15.0, 110.0]);
    }

    #[test]
    fn rejects_mismatched_input_width() {
        let model = tiny_model();
        let mut features = FeatureMatrix::new(3);
        features.push_row(&[0.0, 0.0, 0.0]);
        assert!(matches!(
            model.predict(&features),
            Err(ModelError::Shape { .. })
        ));
    }

    #[test]
    fn load_round_trips_through_json() {
        let model = tiny_model();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&model).unwrap().as_bytes())
            .unwrap();

        let loaded = load_knn_model(file.path()).unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn load_rejects_missing_file_and_bad_shapes() {
        assert!(matches!(
            load_knn_model(Path::new("/nonexistent/model.json")),
            Err(ModelError::Io(_))
        ));

        let broken = KnnModel {
            k: 0,
            ..tiny_model()
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&broken).unwrap().as_bytes())
            .unwrap();
        assert!(matches!(
            load_knn_model(file.path()),
            Err(ModelError::Shape { .. })
        ));
    }

    #[test]
    fn k_is_capped_by_training_size() {
        let model = KnnModel {
            k: 50,
            ..tiny_model()
        };
        let mut features = FeatureMatrix::new(2);
        features.push_row(&[0.0, 0.0]);
        let values = model.predict(&features).unwrap();
        // Mean of all four targets.
        assert_eq!(values, vec![62.5]);
    }
}
