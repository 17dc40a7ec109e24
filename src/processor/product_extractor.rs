use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::{info, warn};

use crate::config::CompiledSelectors;
use crate::models::{
    ExtractedListing, ProductSignals, ReviewRecord, UNKNOWN_PRODUCT, UNKNOWN_SELLER,
};

const DATE_FORMATS: [&str; 2] = ["%B %d, %Y", "%d %B %Y"];

/// Reads product signals and the leading reviews out of a product page
pub struct ProductExtractor {
    selectors: CompiledSelectors,
    max_reviews: usize,
    date_pattern: Regex,
}

impl ProductExtractor {
    pub fn new(selectors: CompiledSelectors, max_reviews: usize) -> Self {
        Self {
            selectors,
            max_reviews,
            // "March 3, 2024" or "3 March 2024", usually after "Reviewed in ... on"
            date_pattern: Regex::new(r"(?:[A-Za-z]+ \d{1,2}, \d{4}|\d{1,2} [A-Za-z]+ \d{4})\s*$")
                .expect("date pattern is valid"),
        }
    }

    /// Extract from fetched markup, or produce the fallback record when the
    /// fetch failed. Never returns an error.
    pub fn extract_or_fallback(&self, page: anyhow::Result<String>) -> ExtractedListing {
        match page {
            Ok(html) => self.extract(&html),
            Err(e) => {
                warn!("[extract] Failed to extract data: {}", e);
                ExtractedListing::fallback()
            }
        }
    }

    pub fn extract(&self, html: &str) -> ExtractedListing {
        let document = Html::parse_document(html);

        let title = self
            .first_text(&document, &self.selectors.title)
            .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());
        let image = document
            .select(&self.selectors.image)
            .next()
            .and_then(|img| img.value().attr("src"))
            .unwrap_or_default()
            .to_string();
        let review_count = self.extract_review_count(&document);
        let rating = self.extract_rating(&document, review_count);
        let seller = self
            .first_text(&document, &self.selectors.seller)
            .unwrap_or_else(|| UNKNOWN_SELLER.to_string());
        let reviews = self.extract_reviews(&document);

        info!(
            "Extracted '{}' by '{}': rating {}, {} reviews listed, {} review texts",
            title,
            seller,
            rating,
            review_count,
            reviews.len()
        );

        ExtractedListing {
            signals: ProductSignals {
                title,
                image,
                rating,
                review_count,
                seller,
            },
            reviews,
            degraded: false,
        }
    }

    fn first_text(&self, document: &Html, selector: &scraper::Selector) -> Option<String> {
        document
            .select(selector)
            .next()
            .map(element_text)
            .filter(|text| !text.is_empty())
    }

    /// "1,234 ratings" -> 1234; anything not purely numeric counts as zero
    fn extract_review_count(&self, document: &Html) -> u32 {
        let Some(text) = self.first_text(document, &self.selectors.review_count) else {
            return 0;
        };

        let token = text
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .replace(',', "");

        if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
            return 0;
        }
        // All digits, so the only parse failure left is overflow
        token.parse::<u64>().map_or(u32::MAX, |count| u32::try_from(count).unwrap_or(u32::MAX))
    }

    /// "4.3 out of 5 stars" -> 4.3. Pages without reviews always rate 0.0.
    fn extract_rating(&self, document: &Html, review_count: u32) -> f64 {
        if review_count == 0 {
            return 0.0;
        }

        self.first_text(document, &self.selectors.rating)
            .and_then(|text| text.split_whitespace().next().map(str::to_string))
            .and_then(|token| token.parse::<f64>().ok())
            .filter(|rating| rating.is_finite())
            .map(|rating| rating.clamp(0.0, 5.0))
            .unwrap_or(0.0)
    }

    fn extract_reviews(&self, document: &Html) -> Vec<ReviewRecord> {
        let containers: Vec<ElementRef> = document.select(&self.selectors.review_container).collect();

        if containers.is_empty() {
            // No review wrappers: take bodies alone, undated
            return document
                .select(&self.selectors.review_body)
                .map(element_text)
                .filter(|text| !text.is_empty())
                .take(self.max_reviews)
                .map(|text| ReviewRecord { text, date: None })
                .collect();
        }

        containers
            .into_iter()
            .filter_map(|container| {
                let text = container
                    .select(&self.selectors.review_body)
                    .next()
                    .map(element_text)
                    .filter(|text| !text.is_empty())?;
                let date = container
                    .select(&self.selectors.review_date)
                    .next()
                    .and_then(|el| self.parse_review_date(&element_text(el)));
                Some(ReviewRecord { text, date })
            })
            .take(self.max_reviews)
            .collect()
    }

    pub fn parse_review_date(&self, text: &str) -> Option<NaiveDate> {
        let matched = self.date_pattern.find(text.trim())?.as_str().trim();
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(matched, format).ok())
    }
}

/// Text nodes trimmed and joined by single spaces
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
