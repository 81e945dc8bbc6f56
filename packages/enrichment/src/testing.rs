//! Mock implementations for testing.
//!
//! Both mocks share interior state across clones so tests can hold a
//! handle for assertions while the pipeline owns another.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{EnrichmentError, Result};
use crate::traits::{BaseTextGenerator, BaseWebScraper, ScrapedPage};

/// Mock scraper with canned pages and call tracking.
///
/// URLs without a canned page fail, as do URLs explicitly marked with
/// [`MockScraper::with_failure`].
#[derive(Default)]
pub struct MockScraper {
    /// Canned markdown indexed by URL
    pages: Arc<RwLock<HashMap<String, String>>>,
    /// URLs that always fail
    failures: Arc<RwLock<HashSet<String>>>,
    /// URLs requested via scrape, in call order
    scrape_calls: Arc<RwLock<Vec<String>>>,
}

impl MockScraper {
    /// Create a new empty mock scraper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned page (builder pattern).
    pub fn with_page(self, url: &str, markdown: &str) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(url.to_string(), markdown.to_string());
        self
    }

    /// Mark a URL as always failing (builder pattern).
    pub fn with_failure(self, url: &str) -> Self {
        self.failures.write().unwrap().insert(url.to_string());
        self
    }

    /// Get the number of times scrape was called.
    pub fn scrape_call_count(&self) -> usize {
        self.scrape_calls.read().unwrap().len()
    }

    /// Get the URLs that were requested via scrape.
    pub fn scrape_calls(&self) -> Vec<String> {
        self.scrape_calls.read().unwrap().clone()
    }

    /// Clear recorded calls.
    pub fn reset_calls(&self) {
        self.scrape_calls.write().unwrap().clear();
    }
}

impl Clone for MockScraper {
    fn clone(&self) -> Self {
        Self {
            pages: Arc::clone(&self.pages),
            failures: Arc::clone(&self.failures),
            scrape_calls: Arc::clone(&self.scrape_calls),
        }
    }
}

#[async_trait]
impl BaseWebScraper for MockScraper {
    async fn scrape(&self, url: &str) -> Result<ScrapedPage> {
        self.scrape_calls.write().unwrap().push(url.to_string());

        if self.failures.read().unwrap().contains(url) {
            return Err(EnrichmentError::Scrape {
                url: url.to_string(),
                source: Box::new(std::io::Error::other("scripted failure")),
            });
        }

        let markdown = self.pages.read().unwrap().get(url).cloned();
        match markdown {
            Some(markdown) => Ok(ScrapedPage::new(url, markdown)),
            None => Err(EnrichmentError::Scrape {
                url: url.to_string(),
                source: Box::new(std::io::Error::other("no canned page for URL")),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mock generator that records prompts and returns a canned response.
#[derive(Default)]
pub struct MockGenerator {
    response: Arc<RwLock<String>>,
    fail_next: Arc<AtomicBool>,
    /// Final prompts received, in call order
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockGenerator {
    /// Create a mock that answers with an empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canned response (builder pattern).
    pub fn with_response(self, response: &str) -> Self {
        *self.response.write().unwrap() = response.to_string();
        self
    }

    /// Make the next generate call fail.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Get the prompts that were passed to generate.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }

    /// Get the number of times generate was called.
    pub fn generate_call_count(&self) -> usize {
        self.prompts.read().unwrap().len()
    }
}

impl Clone for MockGenerator {
    fn clone(&self) -> Self {
        Self {
            response: Arc::clone(&self.response),
            fail_next: Arc::clone(&self.fail_next),
            prompts: Arc::clone(&self.prompts),
        }
    }
}

#[async_trait]
impl BaseTextGenerator for MockGenerator {
    async fn generate_with_model(&self, prompt: &str, _model: Option<&str>) -> Result<String> {
        self.prompts.write().unwrap().push(prompt.to_string());

        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(EnrichmentError::Generation(Box::new(std::io::Error::other(
                "scripted failure",
            ))));
        }

        Ok(self.response.read().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_scraper_returns_canned_pages() {
        let scraper = MockScraper::new().with_page("https://a.test", "content-A");

        let page = tokio_test::block_on(scraper.scrape("https://a.test")).unwrap();
        assert_eq!(page.markdown, "content-A");

        let missing = tokio_test::block_on(scraper.scrape("https://b.test"));
        assert!(missing.is_err());

        assert_eq!(
            scraper.scrape_calls(),
            vec!["https://a.test".to_string(), "https://b.test".to_string()]
        );
    }

    #[test]
    fn mock_generator_records_prompts() {
        let generator = MockGenerator::new().with_response("ok");

        let answer = tokio_test::block_on(generator.generate("what?")).unwrap();
        assert_eq!(answer, "ok");
        assert_eq!(generator.prompts(), vec!["what?".to_string()]);
    }

    #[test]
    fn mock_generator_fail_next_is_one_shot() {
        let generator = MockGenerator::new().with_response("ok");
        generator.fail_next();

        assert!(tokio_test::block_on(generator.generate("first")).is_err());
        assert!(tokio_test::block_on(generator.generate("second")).is_ok());
        assert_eq!(generator.generate_call_count(), 2);
    }
}
