pub mod data_models;
pub mod features;

pub use data_models::*;
pub use features::{FEATURE_NAMES, FeatureVector, REVIEW_COUNT_CAP};
