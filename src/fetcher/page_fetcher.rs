use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;
use wreq::Client;
use wreq_util::Emulation;

use crate::config::ScraperConfig;

/// Source of product page markup
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Single-attempt HTTP fetcher with browser emulation
pub struct PageFetcher {
    client: Client,
    user_agent: Option<String>,
}

impl PageFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .emulation(Emulation::Firefox136)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(PageFetcher {
            client,
            user_agent: config.user_agent.clone(),
        })
    }
}

#[async_trait]
impl PageSource for PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let mut request = self.client.get(url);
        if let Some(ref user_agent) = self.user_agent {
            request = request.header("User-Agent", user_agent.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| anyhow!("Network error: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP {}", response.status()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read response text: {}", e))?;

        if html.trim().is_empty() {
            return Err(anyhow!("Empty HTML response"));
        }

        // Robot-check interstitials come back as 200 with no product markup
        if html.contains("/errors/validateCaptcha") {
            return Err(anyhow!("Bot detection page returned"));
        }

        info!("Successfully fetched {} characters from {}", html.len(), url);
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> PageFetcher {
        PageFetcher::new(&ScraperConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body_on_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/dp/B000TEST")
            .with_status(200)
            .with_body("<html><body><span id=\"productTitle\">Kettle</span></body></html>")
            .create_async()
            .await;

        let html = fetcher()
            .fetch(&format!("{}/dp/B000TEST", server.url()))
            .await
            .unwrap();

        assert!(html.contains("productTitle"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_fails_on_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/dp/missing")
            .with_status(503)
            .with_body("<html></html>")
            .create_async()
            .await;

        let err = fetcher()
            .fetch(&format!("{}/dp/missing", server.url()))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("503"), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_fetch_sends_configured_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/dp/ua")
            .match_header("user-agent", "listing-check-test")
            .with_status(200)
            .with_body("<html></html>")
            .create_async()
            .await;

        let config = ScraperConfig {
            user_agent: Some("listing-check-test".to_string()),
            ..ScraperConfig::default()
        };
        let fetcher = PageFetcher::new(&config).unwrap();
        fetcher.fetch(&format!("{}/dp/ua", server.url())).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_rejects_empty_and_captcha_pages() {
        let mut server = mockito::Server::new_async().await;
        let _empty = server
            .mock("GET", "/empty")
            .with_status(200)
            .with_body("   ")
            .create_async()
            .await;
        let _captcha = server
            .mock("GET", "/captcha")
            .with_status(200)
            .with_body("<html><form action=\"/errors/validateCaptcha\"></form></html>")
            .create_async()
            .await;

        let fetcher = fetcher();
        assert!(fetcher.fetch(&format!("{}/empty", server.url())).await.is_err());
        assert!(fetcher.fetch(&format!("{}/captcha", server.url())).await.is_err());
    }
}
