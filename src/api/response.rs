use serde::Serialize;

use crate::models::{HeuristicBreakdown, SentimentCounts, Verdict};
use crate::pipeline::ListingReport;

/// JSON payload returned by `POST /api/check`
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub product_name: String,
    pub seller_name: String,
    pub image: String,
    pub rating: f64,
    pub review_count: u32,
    /// 1 for Genuine, 0 for Fake
    pub prediction: u8,
    pub label: &'static str,
    pub model_prediction: &'static str,
    pub heuristics_passed: usize,
    pub heuristics_total: usize,
    pub heuristic_override: bool,
    pub heuristic_reason: String,
    pub heuristic_rules: RuleStatuses,
    pub details: SignalDetails,
    pub analysis: AnalysisDetails,
}

#[derive(Debug, Serialize)]
pub struct RuleStatuses {
    pub owner_response: &'static str,
    pub verified_reviewers: &'static str,
    pub no_templated_reviews: &'static str,
    pub review_count_check: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SignalDetails {
    pub owner_response: bool,
    pub verified_reviewers: bool,
    pub templated_reviews: bool,
    pub rating: f64,
    pub review_count: u32,
}

#[derive(Debug, Serialize)]
pub struct AnalysisDetails {
    pub sentiments: SentimentCounts,
    pub suspicious_mentions: usize,
    pub burst_detected: bool,
    pub reviews_analyzed: usize,
    pub extraction_degraded: bool,
}

pub fn build_response(report: &ListingReport) -> CheckResponse {
    let signals = &report.listing.signals;
    let decision = &report.decision;

    CheckResponse {
        product_name: signals.title.clone(),
        seller_name: signals.seller.clone(),
        image: signals.image.clone(),
        rating: signals.rating,
        review_count: signals.review_count,
        prediction: prediction_code(decision.prediction),
        label: decision.prediction.label(),
        model_prediction: decision.model_prediction.label(),
        heuristics_passed: decision.rules_satisfied,
        heuristics_total: HeuristicBreakdown::TOTAL,
        heuristic_override: decision.heuristic_override,
        heuristic_reason: decision.reason.clone(),
        heuristic_rules: rule_statuses(&decision.rules),
        details: SignalDetails {
            owner_response: decision.rules.owner_response,
            verified_reviewers: decision.rules.verified_reviewers,
            templated_reviews: report.trust.templated_reviews,
            rating: signals.rating,
            review_count: signals.review_count,
        },
        analysis: AnalysisDetails {
            sentiments: report.analysis.sentiment_counts,
            suspicious_mentions: report.analysis.suspicious_mentions,
            burst_detected: report.analysis.burst_detected,
            reviews_analyzed: report.listing.reviews.len(),
            extraction_degraded: report.listing.degraded,
        },
    }
}

fn prediction_code(verdict: Verdict) -> u8 {
    if verdict.is_genuine() { 1 } else { 0 }
}

fn rule_statuses(rules: &HeuristicBreakdown) -> RuleStatuses {
    RuleStatuses {
        owner_response: status(rules.owner_response),
        verified_reviewers: status(rules.verified_reviewers),
        no_templated_reviews: status(rules.no_templated_reviews),
        review_count_check: status(rules.review_count_check),
    }
}

fn status(passed: bool) -> &'static str {
    if passed { "passed" } else { "failed" }
}
