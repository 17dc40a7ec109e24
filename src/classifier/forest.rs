use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::RandomForestClassifier;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::path::Path;
use tracing::info;

use super::{ListingClassifier, ModelError};
use crate::models::{FEATURE_NAMES, FeatureVector, Verdict};

pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

pub type Forest = RandomForestClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>;

/// On-disk model: the forest plus the column order it was fitted on
#[derive(Deserialize)]
struct ModelArtifact {
    format_version: u32,
    feature_names: Vec<String>,
    forest: Forest,
}

/// Borrowing twin of `ModelArtifact`; encodes to the same bytes
#[derive(Serialize)]
struct ModelArtifactRef<'a> {
    format_version: u32,
    feature_names: Vec<String>,
    forest: &'a Forest,
}

/// Random forest over `FeatureVector` rows
pub struct ForestClassifier {
    forest: Forest,
}

impl ForestClassifier {
    pub fn new(forest: Forest) -> Self {
        Self { forest }
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let classifier = Self::from_bytes(&bytes)?;

        info!("Loaded model artifact from {}", path.display());
        Ok(classifier)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ModelError> {
        let artifact: ModelArtifact =
            bincode::deserialize(bytes).map_err(|e| ModelError::Decode(e.to_string()))?;

        if artifact.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ModelError::Version {
                found: artifact.format_version,
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }

        let expected: Vec<String> = FEATURE_NAMES.iter().map(|n| n.to_string()).collect();
        if artifact.feature_names != expected {
            return Err(ModelError::FeatureMismatch {
                found: artifact.feature_names,
                expected,
            });
        }

        Ok(Self::new(artifact.forest))
    }

    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let bytes = self.to_bytes()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ModelError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        std::fs::write(path, bytes).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;

        info!("Saved model artifact to {}", path.display());
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ModelError> {
        let artifact = ModelArtifactRef {
            format_version: ARTIFACT_FORMAT_VERSION,
            feature_names: FEATURE_NAMES.iter().map(|n| n.to_string()).collect(),
            forest: &self.forest,
        };
        bincode::serialize(&artifact).map_err(|e| ModelError::Encode(e.to_string()))
    }
}

impl ListingClassifier for ForestClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<Verdict, ModelError> {
        let matrix = DenseMatrix::from_2d_vec(&vec![features.to_row()]);
        let labels = self
            .forest
            .predict(&matrix)
            .map_err(|e| ModelError::Prediction(e.to_string()))?;

        labels
            .first()
            .map(|&label| Verdict::from_class_label(label))
            .ok_or_else(|| ModelError::Prediction("model returned no label".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{ForestSettings, generate_synthetic_dataset, train_forest};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn small_model() -> ForestClassifier {
        let mut rng = StdRng::seed_from_u64(7);
        let rows = generate_synthetic_dataset(200, &mut rng);
        let settings = ForestSettings {
            n_trees: 15,
            seed: 7,
        };
        train_forest(&rows, &settings).unwrap()
    }

    #[test]
    fn test_predicts_clear_cut_listings() {
        let model = small_model();

        let genuine = FeatureVector::new(4.8, 3200, true, true, false);
        let fake = FeatureVector::new(1.5, 3, false, false, true);

        assert_eq!(model.predict(&genuine).unwrap(), Verdict::Genuine);
        assert_eq!(model.predict(&fake).unwrap(), Verdict::Fake);
    }

    #[test]
    fn test_artifact_round_trip_through_file() {
        let model = small_model();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("model.bin");

        model.save(&path).unwrap();
        let loaded = ForestClassifier::load(&path).unwrap();

        let probe = FeatureVector::new(4.6, 2500, true, true, false);
        assert_eq!(loaded.predict(&probe).unwrap(), model.predict(&probe).unwrap());
    }

    #[test]
    fn test_missing_artifact_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ForestClassifier::load(&dir.path().join("absent.bin")).err().unwrap();
        assert!(matches!(err, ModelError::Io { .. }));
    }

    #[test]
    fn test_corrupt_artifact_is_rejected() {
        let err = ForestClassifier::from_bytes(b"not a model").err().unwrap();
        assert!(matches!(err, ModelError::Decode(_)));
    }

    #[test]
    fn test_reordered_features_are_rejected() {
        let model = small_model();
        let mut names: Vec<String> = FEATURE_NAMES.iter().map(|n| n.to_string()).collect();
        names.swap(1, 4);
        let artifact = ModelArtifactRef {
            format_version: ARTIFACT_FORMAT_VERSION,
            feature_names: names,
            forest: &model.forest,
        };
        let bytes = bincode::serialize(&artifact).unwrap();

        let err = ForestClassifier::from_bytes(&bytes).err().unwrap();
        assert!(matches!(err, ModelError::FeatureMismatch { .. }));
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let model = small_model();
        let artifact = ModelArtifactRef {
            format_version: 99,
            feature_names: FEATURE_NAMES.iter().map(|n| n.to_string()).collect(),
            forest: &model.forest,
        };
        let bytes = bincode::serialize(&artifact).unwrap();

        let err = ForestClassifier::from_bytes(&bytes).err().unwrap();
        assert!(matches!(err, ModelError::Version { found: 99, .. }));
    }
}
