use tracing::info;

use crate::models::{Decision, HeuristicBreakdown, TrustSignals, Verdict};

/// Signals needed before the model's prediction is overruled as Genuine
pub const MIN_TRUST_SIGNALS: usize = 2;
/// Review count at which the listing passes the review-count check
pub const MIN_REVIEW_COUNT: u32 = 5;

pub const ZERO_REVIEWS_REASON: &str = "Product has 0 reviews";

/// Priority-ordered rules over the four trust signals:
/// 1. no reviews forces Fake;
/// 2. at least two satisfied signals force Genuine;
/// 3. otherwise the model's prediction stands.
pub fn apply_heuristics(review_count: u32, trust: &TrustSignals, model_prediction: Verdict) -> Decision {
    let rules = HeuristicBreakdown {
        owner_response: trust.owner_responded(),
        verified_reviewers: review_count > 0 && trust.verified_reviewers,
        no_templated_reviews: !trust.templated_reviews,
        review_count_check: review_count >= MIN_REVIEW_COUNT,
    };
    let rules_satisfied = rules.satisfied();

    let (prediction, heuristic_override, reason) = if review_count == 0 {
        (Verdict::Fake, true, ZERO_REVIEWS_REASON.to_string())
    } else if rules_satisfied >= MIN_TRUST_SIGNALS {
        (
            Verdict::Genuine,
            true,
            format!(
                "{} out of {} trust signals satisfied",
                rules_satisfied,
                HeuristicBreakdown::TOTAL
            ),
        )
    } else {
        (model_prediction, false, String::new())
    };

    if heuristic_override {
        info!("Prediction overridden by heuristic rules: {} ({})", prediction, reason);
    } else {
        info!("Model prediction used: {}", prediction);
    }

    Decision {
        prediction,
        model_prediction,
        heuristic_override,
        reason,
        rules_satisfied,
        rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trust(owner: Option<bool>, verified: bool, templated: bool) -> TrustSignals {
        TrustSignals {
            owner_response: owner,
            verified_reviewers: verified,
            templated_reviews: templated,
        }
    }

    #[test]
    fn test_zero_reviews_is_always_fake() {
        for model in [Verdict::Genuine, Verdict::Fake] {
            let decision = apply_heuristics(0, &trust(Some(true), true, false), model);

            assert_eq!(decision.prediction, Verdict::Fake);
            assert!(decision.heuristic_override);
            assert_eq!(decision.reason, "Product has 0 reviews");
            assert!(!decision.rules.verified_reviewers);
        }
    }

    #[test]
    fn test_two_signals_force_genuine() {
        let decision = apply_heuristics(3, &trust(None, true, false), Verdict::Fake);

        assert_eq!(decision.rules_satisfied, 2);
        assert_eq!(decision.prediction, Verdict::Genuine);
        assert_eq!(decision.model_prediction, Verdict::Fake);
        assert!(decision.heuristic_override);
        assert_eq!(decision.reason, "2 out of 4 trust signals satisfied");
    }

    #[test]
    fn test_all_signals_satisfied() {
        let decision = apply_heuristics(120, &trust(Some(true), true, false), Verdict::Fake);

        assert_eq!(decision.rules_satisfied, 4);
        assert_eq!(decision.reason, "4 out of 4 trust signals satisfied");
    }

    #[test]
    fn test_model_prediction_kept_below_threshold() {
        // verified only; templated reviews and a thin review count
        let decision = apply_heuristics(2, &trust(None, true, true), Verdict::Fake);

        assert_eq!(decision.rules_satisfied, 1);
        assert_eq!(decision.prediction, Verdict::Fake);
        assert!(!decision.heuristic_override);
        assert!(decision.reason.is_empty());

        let decision = apply_heuristics(2, &trust(None, true, true), Verdict::Genuine);
        assert_eq!(decision.prediction, Verdict::Genuine);
    }

    #[test]
    fn test_rules_satisfied_matches_true_signals() {
        for review_count in [0, 1, 4, 5, 500] {
            for owner in [None, Some(false), Some(true)] {
                for verified in [false, true] {
                    for templated in [false, true] {
                        let decision = apply_heuristics(
                            review_count,
                            &trust(owner, verified, templated),
                            Verdict::Fake,
                        );
                        let expected = [
                            owner == Some(true),
                            review_count > 0 && verified,
                            !templated,
                            review_count >= 5,
                        ]
                        .into_iter()
                        .filter(|b| *b)
                        .count();

                        assert_eq!(decision.rules_satisfied, expected);
                        assert!(decision.rules_satisfied <= 4);
                    }
                }
            }
        }
    }
}
