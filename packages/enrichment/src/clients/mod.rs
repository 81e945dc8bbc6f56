//! Vendor API clients.
//!
//! These are the infrastructure implementations of the scraper and
//! generator traits. Pipeline logic never talks to a provider directly;
//! it goes through [`crate::deps::EnrichmentDeps`].

mod anthropic;
mod firecrawl;

pub use anthropic::{AnthropicClient, DEFAULT_MODEL};
pub use firecrawl::FirecrawlScraper;
