use serde::{Deserialize, Serialize};

/// Column order the classifier was trained with. Persisted inside the model
/// artifact and compared on load.
pub const FEATURE_NAMES: [&str; 5] = [
    "rating",
    "review_count",
    "owner_response",
    "verified_reviewers",
    "templated_reviews",
];

/// Review counts above this are clamped, for training rows and live pages alike
pub const REVIEW_COUNT_CAP: u32 = 5000;

/// Classifier input. Field order matches `FEATURE_NAMES`; `to_row` is the only
/// way the values reach the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub rating: f64,
    pub review_count: f64,
    pub owner_response: f64,
    pub verified_reviewers: f64,
    pub templated_reviews: f64,
}

impl FeatureVector {
    pub fn new(
        rating: f64,
        review_count: u32,
        owner_response: bool,
        verified_reviewers: bool,
        templated_reviews: bool,
    ) -> Self {
        Self {
            rating,
            review_count: f64::from(review_count.min(REVIEW_COUNT_CAP)),
            owner_response: flag(owner_response),
            verified_reviewers: flag(verified_reviewers),
            templated_reviews: flag(templated_reviews),
        }
    }

    pub fn to_row(&self) -> Vec<f64> {
        vec![
            self.rating,
            self.review_count,
            self.owner_response,
            self.verified_reviewers,
            self.templated_reviews,
        ]
    }
}

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_follows_declared_order() {
        let features = FeatureVector::new(4.2, 120, false, true, false);
        assert_eq!(features.to_row(), vec![4.2, 120.0, 0.0, 1.0, 0.0]);
        assert_eq!(FEATURE_NAMES.len(), features.to_row().len());
    }

    #[test]
    fn test_review_count_is_capped() {
        let features = FeatureVector::new(4.0, 90_000, true, true, true);
        assert_eq!(features.review_count, 5000.0);
    }
}
