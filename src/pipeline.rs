use anyhow::Result;
use std::sync::Arc;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::classifier::{ListingClassifier, ModelError};
use crate::config::AppConfig;
use crate::fetcher::{PageFetcher, PageSource};
use crate::models::{Decision, ExtractedListing, FeatureVector, ReviewAnalysis, TrustSignals};
use crate::processor::{
    FeatureAssembler, LexiconScorer, ProductExtractor, ReviewAnalyzer, SentimentScorer,
    apply_heuristics,
};

/// Everything produced while checking one listing
#[derive(Debug, Clone)]
pub struct ListingReport {
    pub listing: ExtractedListing,
    pub analysis: ReviewAnalysis,
    pub trust: TrustSignals,
    pub features: FeatureVector,
    pub decision: Decision,
}

/// Fetch → extract → analyse → assemble → classify → override
pub struct ListingChecker {
    source: Arc<dyn PageSource>,
    extractor: ProductExtractor,
    analyzer: ReviewAnalyzer,
    assembler: FeatureAssembler,
}

impl ListingChecker {
    pub fn new(
        source: Arc<dyn PageSource>,
        extractor: ProductExtractor,
        analyzer: ReviewAnalyzer,
        assembler: FeatureAssembler,
    ) -> Self {
        Self {
            source,
            extractor,
            analyzer,
            assembler,
        }
    }

    /// Build the live checker: HTTP fetcher, configured selectors, lexicon scorer
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let source: Arc<dyn PageSource> = Arc::new(PageFetcher::new(&config.scraper)?);
        Self::with_source(config, source)
    }

    /// Same as `from_config` with a caller-supplied page source
    pub fn with_source(config: &AppConfig, source: Arc<dyn PageSource>) -> Result<Self> {
        let selectors = config.selectors.compile()?;
        let scorer: Arc<dyn SentimentScorer> = Arc::new(LexiconScorer::new());

        Ok(Self::new(
            source,
            ProductExtractor::new(selectors, config.scraper.max_reviews),
            ReviewAnalyzer::new(scorer, &config.analysis),
            FeatureAssembler::new(config.analysis.templated_threshold),
        ))
    }

    pub async fn check(
        &self,
        url: &str,
        classifier: &dyn ListingClassifier,
    ) -> Result<ListingReport, ModelError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("check", %request_id, url);

        async {
            let page = self.source.fetch(url).await;
            let listing = self.extractor.extract_or_fallback(page);
            self.evaluate(listing, classifier)
        }
        .instrument(span)
        .await
    }

    /// Everything after the fetch; synchronous and side-effect free
    pub fn evaluate(
        &self,
        listing: ExtractedListing,
        classifier: &dyn ListingClassifier,
    ) -> Result<ListingReport, ModelError> {
        let analysis = self.analyzer.analyze(&listing.reviews);
        let trust = self.assembler.trust_signals(&listing, &analysis);
        let features = self.assembler.assemble(&listing.signals, &trust);

        info!(
            "Rating: {}, review count: {}, product: {}, seller: {}",
            listing.signals.rating,
            listing.signals.review_count,
            listing.signals.title,
            listing.signals.seller
        );
        info!("Model input: {:?}", features);

        let model_prediction = classifier.predict(&features)?;
        let decision = apply_heuristics(listing.signals.review_count, &trust, model_prediction);

        Ok(ListingReport {
            listing,
            analysis,
            trust,
            features,
            decision,
        })
    }
}
