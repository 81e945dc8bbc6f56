//! Web scraper trait for pluggable content fetching.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single scraped page in markdown form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedPage {
    /// URL the content was fetched from
    pub url: String,

    /// Rendered page content as markdown
    pub markdown: String,

    /// Page title if the provider returned one
    pub title: Option<String>,

    /// When the content was fetched
    pub fetched_at: DateTime<Utc>,
}

impl ScrapedPage {
    /// Create a new scraped page with minimal fields.
    pub fn new(url: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            markdown: markdown.into(),
            title: None,
            fetched_at: Utc::now(),
        }
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Check if this page has content.
    pub fn has_content(&self) -> bool {
        !self.markdown.trim().is_empty()
    }
}

/// Web scraper trait for fetching rendered page content.
///
/// Implementations wrap scrape providers (Firecrawl, plain HTTP, mocks).
/// Each call is treated as independently fallible; callers decide whether
/// a failure degrades or aborts.
#[async_trait]
pub trait BaseWebScraper: Send + Sync {
    /// Scrape one URL, returning its content as markdown.
    async fn scrape(&self, url: &str) -> Result<ScrapedPage>;

    /// Get the scraper name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scraped_page_builder() {
        let page = ScrapedPage::new("https://example.com", "# Hello").with_title("Example");

        assert_eq!(page.url, "https://example.com");
        assert_eq!(page.title, Some("Example".to_string()));
        assert!(page.has_content());
    }

    #[test]
    fn test_empty_content_detection() {
        let empty = ScrapedPage::new("https://example.com", "   ");
        assert!(!empty.has_content());
    }
}
