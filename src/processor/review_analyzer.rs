use chrono::Datelike;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::models::{ReviewAnalysis, ReviewRecord, SentimentCounts};
use crate::processor::sentiment::SentimentScorer;

pub const POSITIVE_THRESHOLD: f64 = 0.1;
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Sentiment tallies, suspicious phrasing and date clustering over a review list
pub struct ReviewAnalyzer {
    scorer: Arc<dyn SentimentScorer>,
    suspicious_keywords: Vec<String>,
    burst_min_dated_reviews: usize,
}

impl ReviewAnalyzer {
    pub fn new(scorer: Arc<dyn SentimentScorer>, config: &AnalysisConfig) -> Self {
        Self {
            scorer,
            suspicious_keywords: config
                .suspicious_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            burst_min_dated_reviews: config.burst_min_dated_reviews,
        }
    }

    pub fn analyze(&self, reviews: &[ReviewRecord]) -> ReviewAnalysis {
        let mut sentiment_counts = SentimentCounts::default();
        let mut suspicious_mentions = 0;

        for review in reviews {
            let polarity = self.scorer.polarity(&review.text);
            if polarity > POSITIVE_THRESHOLD {
                sentiment_counts.positive += 1;
            } else if polarity < NEGATIVE_THRESHOLD {
                sentiment_counts.negative += 1;
            } else {
                sentiment_counts.neutral += 1;
            }

            if self.is_suspicious(&review.text) {
                suspicious_mentions += 1;
            }
        }

        let burst_detected = self.detect_burst(reviews);

        debug!(
            "Review analysis: {:?}, suspicious={}, burst={}",
            sentiment_counts, suspicious_mentions, burst_detected
        );

        ReviewAnalysis {
            sentiment_counts,
            suspicious_mentions,
            burst_detected,
        }
    }

    fn is_suspicious(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.suspicious_keywords
            .iter()
            .any(|keyword| lowered.contains(keyword.as_str()))
    }

    /// True when one calendar month holds more than half of the dated reviews
    fn detect_burst(&self, reviews: &[ReviewRecord]) -> bool {
        let mut per_month: HashMap<(i32, u32), usize> = HashMap::new();
        for date in reviews.iter().filter_map(|r| r.date) {
            *per_month.entry((date.year(), date.month())).or_insert(0) += 1;
        }

        let dated: usize = per_month.values().sum();
        if dated == 0 || dated < self.burst_min_dated_reviews {
            return false;
        }

        let plurality = per_month.values().copied().max().unwrap_or(0);
        plurality * 2 > dated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::sentiment::LexiconScorer;
    use chrono::NaiveDate;

    /// Scores by a leading marker so bucket tests don't depend on the lexicon
    struct MarkerScorer;

    impl SentimentScorer for MarkerScorer {
        fn polarity(&self, text: &str) -> f64 {
            match text.chars().next() {
                Some('+') => 0.5,
                Some('-') => -0.5,
                Some('~') => 0.1,
                _ => 0.0,
            }
        }
    }

    fn analyzer_with(scorer: Arc<dyn SentimentScorer>) -> ReviewAnalyzer {
        ReviewAnalyzer::new(scorer, &AnalysisConfig::default())
    }

    fn review(text: &str, date: Option<(i32, u32, u32)>) -> ReviewRecord {
        ReviewRecord {
            text: text.to_string(),
            date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        }
    }

    #[test]
    fn test_empty_reviews() {
        let analysis = analyzer_with(Arc::new(LexiconScorer::new())).analyze(&[]);

        assert_eq!(analysis.sentiment_counts, SentimentCounts::default());
        assert_eq!(analysis.suspicious_mentions, 0);
        assert!(!analysis.burst_detected);
    }

    #[test]
    fn test_sentiment_buckets_sum_to_review_count() {
        let reviews = vec![
            review("+ loved it", None),
            review("- nope", None),
            review("~ boundary is neutral", None),
            review("plain", None),
            review("+ again", None),
        ];
        let analysis = analyzer_with(Arc::new(MarkerScorer)).analyze(&reviews);

        assert_eq!(analysis.sentiment_counts.positive, 2);
        assert_eq!(analysis.sentiment_counts.negative, 1);
        assert_eq!(analysis.sentiment_counts.neutral, 2);
        assert_eq!(analysis.sentiment_counts.total(), reviews.len());
    }

    #[test]
    fn test_suspicious_keywords_case_insensitive_once_per_review() {
        let reviews = vec![
            review("GREAT PRODUCT!!! Very Good!!!", None),
            review("very good value", None),
            review("Works as described", None),
        ];
        let analysis = analyzer_with(Arc::new(MarkerScorer)).analyze(&reviews);

        assert_eq!(analysis.suspicious_mentions, 2);
    }

    #[test]
    fn test_burst_when_one_month_dominates() {
        let reviews = vec![
            review("a", Some((2024, 3, 1))),
            review("b", Some((2024, 3, 9))),
            review("c", Some((2024, 3, 28))),
            review("d", Some((2023, 11, 2))),
            review("e", None),
        ];
        let analysis = analyzer_with(Arc::new(MarkerScorer)).analyze(&reviews);

        assert!(analysis.burst_detected);
    }

    #[test]
    fn test_no_burst_on_even_split() {
        let reviews = vec![
            review("a", Some((2024, 3, 1))),
            review("b", Some((2024, 3, 9))),
            review("c", Some((2024, 4, 2))),
            review("d", Some((2024, 5, 2))),
        ];
        let analysis = analyzer_with(Arc::new(MarkerScorer)).analyze(&reviews);

        assert!(!analysis.burst_detected);
    }

    #[test]
    fn test_same_month_different_year_is_not_grouped() {
        let reviews = vec![
            review("a", Some((2023, 3, 1))),
            review("b", Some((2024, 3, 1))),
            review("c", Some((2025, 3, 1))),
        ];
        let analysis = analyzer_with(Arc::new(MarkerScorer)).analyze(&reviews);

        assert!(!analysis.burst_detected);
    }

    #[test]
    fn test_single_dated_review_is_a_burst() {
        let reviews = vec![review("a", Some((2024, 3, 1))), review("b", None)];
        let analysis = analyzer_with(Arc::new(MarkerScorer)).analyze(&reviews);

        assert!(analysis.burst_detected);
    }

    #[test]
    fn test_minimum_dated_reviews_gates_burst() {
        let config = AnalysisConfig {
            burst_min_dated_reviews: 3,
            ..AnalysisConfig::default()
        };
        let analyzer = ReviewAnalyzer::new(Arc::new(MarkerScorer), &config);
        let reviews = vec![review("a", Some((2024, 3, 1))), review("b", Some((2024, 3, 5)))];

        assert!(!analyzer.analyze(&reviews).burst_detected);
    }
}
