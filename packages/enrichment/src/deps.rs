//! Dependency container for the pipeline (using traits for testability).
//!
//! Clients are explicitly constructed and injected rather than held as
//! module-level singletons, so tests substitute doubles freely.

use std::sync::Arc;

use crate::traits::{BaseTextGenerator, BaseWebScraper};

/// Dependencies accessible to pipeline stages and event handlers.
#[derive(Clone)]
pub struct EnrichmentDeps {
    /// Scrape provider for fetching page content as markdown
    pub scraper: Arc<dyn BaseWebScraper>,
    /// Text generation provider
    pub generator: Arc<dyn BaseTextGenerator>,
}

impl EnrichmentDeps {
    /// Create new EnrichmentDeps with the given clients.
    pub fn new(scraper: Arc<dyn BaseWebScraper>, generator: Arc<dyn BaseTextGenerator>) -> Self {
        Self { scraper, generator }
    }
}
