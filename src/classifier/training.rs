use rand::Rng;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::info;

use super::{ForestClassifier, ListingClassifier, ModelError};
use crate::models::{FeatureVector, Verdict};

/// One labelled example
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingRow {
    pub features: FeatureVector,
    pub verdict: Verdict,
}

#[derive(Debug, Clone)]
pub struct ForestSettings {
    pub n_trees: u16,
    pub seed: u64,
}

impl Default for ForestSettings {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
        }
    }
}

/// Draw `n` labelled listings, half genuine and half fake on average.
///
/// Genuine listings rate higher, carry many more reviews and mostly have
/// verified reviewers; fake ones skew the other way and usually show
/// templated reviews.
pub fn generate_synthetic_dataset<R: Rng>(n: usize, rng: &mut R) -> Vec<TrainingRow> {
    (0..n)
        .map(|_| {
            if rng.gen_bool(0.5) {
                TrainingRow {
                    features: FeatureVector::new(
                        round_tenth(rng.gen_range(3.5..=5.0)),
                        rng.gen_range(100..=5000),
                        rng.gen_bool(0.7),
                        rng.gen_bool(0.9),
                        rng.gen_bool(0.15),
                    ),
                    verdict: Verdict::Genuine,
                }
            } else {
                TrainingRow {
                    features: FeatureVector::new(
                        round_tenth(rng.gen_range(1.0..=4.0)),
                        rng.gen_range(0..=500),
                        rng.gen_bool(0.2),
                        rng.gen_bool(0.3),
                        rng.gen_bool(0.8),
                    ),
                    verdict: Verdict::Fake,
                }
            }
        })
        .collect()
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn train_forest(rows: &[TrainingRow], settings: &ForestSettings) -> Result<ForestClassifier, ModelError> {
    if rows.is_empty() {
        return Err(ModelError::Training("no training rows".to_string()));
    }

    let matrix: Vec<Vec<f64>> = rows.iter().map(|row| row.features.to_row()).collect();
    let labels: Vec<i32> = rows.iter().map(|row| row.verdict.class_label()).collect();
    let x = DenseMatrix::from_2d_vec(&matrix);

    let params = RandomForestClassifierParameters::default()
        .with_n_trees(settings.n_trees)
        .with_seed(settings.seed);

    let forest = RandomForestClassifier::fit(&x, &labels, params)
        .map_err(|e| ModelError::Training(e.to_string()))?;

    info!(
        "Trained random forest with {} trees on {} rows",
        settings.n_trees,
        rows.len()
    );
    Ok(ForestClassifier::new(forest))
}

/// Share of rows the classifier labels correctly
pub fn accuracy(classifier: &dyn ListingClassifier, rows: &[TrainingRow]) -> Result<f64, ModelError> {
    if rows.is_empty() {
        return Ok(0.0);
    }

    let mut correct = 0usize;
    for row in rows {
        if classifier.predict(&row.features)? == row.verdict {
            correct += 1;
        }
    }
    Ok(correct as f64 / rows.len() as f64)
}
