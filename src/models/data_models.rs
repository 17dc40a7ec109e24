use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_PRODUCT: &str = "Unknown Product";
pub const UNKNOWN_SELLER: &str = "Unknown Seller";

/// Fields read from a product page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSignals {
    pub title: String,
    pub image: String,
    /// Star rating in [0, 5]
    pub rating: f64,
    pub review_count: u32,
    pub seller: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub text: String,
    pub date: Option<NaiveDate>,
}

/// Extraction result for one page. `degraded` marks the fallback record used
/// when the page could not be fetched or parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedListing {
    pub signals: ProductSignals,
    pub reviews: Vec<ReviewRecord>,
    pub degraded: bool,
}

impl ExtractedListing {
    pub fn fallback() -> Self {
        Self {
            signals: ProductSignals {
                title: UNKNOWN_PRODUCT.to_string(),
                image: String::new(),
                rating: 0.0,
                review_count: 0,
                seller: UNKNOWN_SELLER.to_string(),
            },
            reviews: Vec::new(),
            degraded: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewAnalysis {
    pub sentiment_counts: SentimentCounts,
    pub suspicious_mentions: usize,
    pub burst_detected: bool,
}

/// Boolean trust indicators derived from the extracted listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustSignals {
    /// Seller replies to reviews. Nothing on the page is inspected for this,
    /// so it is always `None` and never counts as satisfied.
    pub owner_response: Option<bool>,
    pub verified_reviewers: bool,
    pub templated_reviews: bool,
}

impl TrustSignals {
    pub fn owner_responded(&self) -> bool {
        self.owner_response.unwrap_or(false)
    }
}

/// Classifier outcome, also the final label of a check.
/// Training data encodes Genuine as 0 and Fake as 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Genuine,
    Fake,
}

impl Verdict {
    pub fn from_class_label(label: i32) -> Self {
        if label == 1 { Verdict::Fake } else { Verdict::Genuine }
    }

    pub fn class_label(self) -> i32 {
        match self {
            Verdict::Genuine => 0,
            Verdict::Fake => 1,
        }
    }

    pub fn is_genuine(self) -> bool {
        self == Verdict::Genuine
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Genuine => "Genuine",
            Verdict::Fake => "Fake",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-rule outcome of the four trust checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicBreakdown {
    pub owner_response: bool,
    pub verified_reviewers: bool,
    pub no_templated_reviews: bool,
    pub review_count_check: bool,
}

impl HeuristicBreakdown {
    pub const TOTAL: usize = 4;

    pub fn satisfied(&self) -> usize {
        [
            self.owner_response,
            self.verified_reviewers,
            self.no_templated_reviews,
            self.review_count_check,
        ]
        .into_iter()
        .filter(|passed| *passed)
        .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub prediction: Verdict,
    pub model_prediction: Verdict,
    pub heuristic_override: bool,
    pub reason: String,
    pub rules_satisfied: usize,
    pub rules: HeuristicBreakdown,
}
