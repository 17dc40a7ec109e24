use tracing::debug;

use crate::models::{ExtractedListing, FeatureVector, ProductSignals, ReviewAnalysis, TrustSignals};

/// Derives trust signals from an extracted listing and lays them out as
/// classifier input.
pub struct FeatureAssembler {
    templated_threshold: usize,
}

impl FeatureAssembler {
    pub fn new(templated_threshold: usize) -> Self {
        Self { templated_threshold }
    }

    pub fn trust_signals(&self, listing: &ExtractedListing, analysis: &ReviewAnalysis) -> TrustSignals {
        // No part of the page is inspected for seller replies
        debug!("owner_response is not detected; reported as false");

        TrustSignals {
            owner_response: None,
            verified_reviewers: listing.signals.review_count > 0,
            templated_reviews: listing.degraded
                || analysis.suspicious_mentions > self.templated_threshold,
        }
    }

    pub fn assemble(&self, signals: &ProductSignals, trust: &TrustSignals) -> FeatureVector {
        FeatureVector::new(
            signals.rating,
            signals.review_count,
            trust.owner_responded(),
            trust.verified_reviewers,
            trust.templated_reviews,
        )
    }
}
