use anyhow::{Result, anyhow};
use scraper::Selector;
use serde::{Deserialize, Serialize};

/// CSS selectors for the product page fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub title: String,
    pub image: String,
    pub review_count: String,
    pub rating: String,
    pub seller: String,
    pub review_container: String,
    pub review_body: String,
    pub review_date: String,
}

/// Parsed selectors, built once at start-up
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub title: Selector,
    pub image: Selector,
    pub review_count: Selector,
    pub rating: Selector,
    pub seller: Selector,
    pub review_container: Selector,
    pub review_body: Selector,
    pub review_date: Selector,
}

impl SelectorConfig {
    /// Parse every selector, failing on the first invalid one
    pub fn compile(&self) -> Result<CompiledSelectors> {
        Ok(CompiledSelectors {
            title: parse_selector("title", &self.title)?,
            image: parse_selector("image", &self.image)?,
            review_count: parse_selector("review_count", &self.review_count)?,
            rating: parse_selector("rating", &self.rating)?,
            seller: parse_selector("seller", &self.seller)?,
            review_container: parse_selector("review_container", &self.review_container)?,
            review_body: parse_selector("review_body", &self.review_body)?,
            review_date: parse_selector("review_date", &self.review_date)?,
        })
    }
}

fn parse_selector(field: &str, raw: &str) -> Result<Selector> {
    Selector::parse(raw).map_err(|e| anyhow!("Invalid {} selector '{}': {}", field, raw, e))
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            title: "#productTitle".to_string(),
            image: "#landingImage".to_string(),
            review_count: "#acrCustomerReviewText".to_string(),
            rating: "span[data-asin] i span.a-icon-alt".to_string(),
            seller: "#bylineInfo".to_string(),
            review_container: "[data-hook='review']".to_string(),
            review_body: ".review-text-content span".to_string(),
            review_date: "[data-hook='review-date']".to_string(),
        }
    }
}
