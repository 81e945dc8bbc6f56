//! Firecrawl API client for scraping websites.
//!
//! Uses the Firecrawl `/scrape` endpoint which provides JavaScript
//! rendering, anti-bot protection, and markdown conversion.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{EnrichmentError, Result};
use crate::traits::{BaseWebScraper, ScrapedPage};

const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1";

/// Firecrawl implementation of BaseWebScraper.
pub struct FirecrawlScraper {
    http_client: Client,
    api_key: String,
    base_url: String,
}

// Request/Response types for the Firecrawl API

#[derive(Debug, Serialize)]
struct ScrapeRequest {
    url: String,
    formats: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    success: bool,
    data: Option<ScrapeData>,
}

#[derive(Debug, Deserialize)]
struct ScrapeData {
    markdown: Option<String>,
    metadata: Option<PageMetadata>,
}

#[derive(Debug, Deserialize)]
struct PageMetadata {
    title: Option<String>,
}

impl FirecrawlScraper {
    /// Create a new Firecrawl scraper with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| EnrichmentError::Http(Box::new(e)))?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            base_url: FIRECRAWL_API_URL.to_string(),
        })
    }

    /// Create from environment variable `FIRECRAWL_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("FIRECRAWL_API_KEY").map_err(|_| {
            EnrichmentError::Http(Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "FIRECRAWL_API_KEY environment variable not set",
            )))
        })?;
        Self::new(api_key)
    }

    /// Override the API base URL (for local stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn scrape_error(url: &str, message: impl Into<String>) -> EnrichmentError {
        EnrichmentError::Scrape {
            url: url.to_string(),
            source: Box::new(std::io::Error::other(message.into())),
        }
    }
}

#[async_trait]
impl BaseWebScraper for FirecrawlScraper {
    async fn scrape(&self, url: &str) -> Result<ScrapedPage> {
        let request = ScrapeRequest {
            url: url.to_string(),
            formats: vec!["markdown".to_string()],
        };

        let response = self
            .http_client
            .post(format!("{}/scrape", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| EnrichmentError::Scrape {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Self::scrape_error(
                url,
                format!("Firecrawl API error: {} - {}", status, text),
            ));
        }

        let api_response: ScrapeResponse =
            response.json().await.map_err(|e| EnrichmentError::Scrape {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        if !api_response.success {
            return Err(Self::scrape_error(url, "Firecrawl scrape failed"));
        }

        let data = api_response
            .data
            .ok_or_else(|| Self::scrape_error(url, "No data returned from Firecrawl"))?;

        let markdown = data
            .markdown
            .ok_or_else(|| Self::scrape_error(url, "No markdown content returned from Firecrawl"))?;

        let mut page = ScrapedPage {
            url: url.to_string(),
            markdown,
            title: None,
            fetched_at: Utc::now(),
        };

        if let Some(title) = data.metadata.and_then(|m| m.title) {
            page = page.with_title(title);
        }

        Ok(page)
    }

    fn name(&self) -> &str {
        "firecrawl"
    }
}
