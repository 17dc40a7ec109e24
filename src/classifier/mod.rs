pub mod forest;
pub mod training;

pub use forest::{ARTIFACT_FORMAT_VERSION, ForestClassifier};
pub use training::{ForestSettings, TrainingRow, accuracy, generate_synthetic_dataset, train_forest};

use thiserror::Error;

use crate::models::{FeatureVector, Verdict};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode model artifact: {0}")]
    Decode(String),

    #[error("failed to encode model artifact: {0}")]
    Encode(String),

    #[error("unsupported model artifact version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("model was trained on features {found:?}, expected {expected:?}")]
    FeatureMismatch {
        found: Vec<String>,
        expected: Vec<String>,
    },

    #[error("training failed: {0}")]
    Training(String),

    #[error("prediction failed: {0}")]
    Prediction(String),
}

/// Pre-trained binary classifier over the listing feature vector
pub trait ListingClassifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<Verdict, ModelError>;
}
