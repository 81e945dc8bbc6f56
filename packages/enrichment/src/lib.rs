//! Prompt Enrichment Pipeline Library
//!
//! A background job that enriches a free-text prompt with live web
//! content before text generation:
//!
//! 1. Extract URL-shaped tokens from the prompt
//! 2. Scrape every URL concurrently (best-effort; failures degrade, never abort)
//! 3. Compose a context-augmented prompt and call the generation provider
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use enrichment::{
//!     build_event_registry, AnthropicClient, EnrichPrompt, EnrichmentDeps,
//!     EnrichmentRunner, FirecrawlScraper, MemoryStepJournal,
//! };
//!
//! let deps = Arc::new(EnrichmentDeps::new(
//!     Arc::new(FirecrawlScraper::from_env()?),
//!     Arc::new(AnthropicClient::from_env()?),
//! ));
//!
//! let (dispatcher, runner) = EnrichmentRunner::new(
//!     Arc::new(build_event_registry()),
//!     deps,
//!     Arc::new(MemoryStepJournal::new()),
//! );
//!
//! let handle = tokio::spawn(runner.run());
//! dispatcher.dispatch(&EnrichPrompt::new("Summarize https://example.com")).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (BaseWebScraper, BaseTextGenerator)
//! - [`clients`] - Vendor clients (Firecrawl, Anthropic)
//! - [`pipeline`] - The three pipeline stages and their orchestration
//! - [`jobs`] - Event plumbing, registry, runner, and step journal
//! - [`testing`] - Mock implementations for testing

pub mod clients;
pub mod deps;
pub mod error;
pub mod jobs;
pub mod pipeline;
pub mod testing;
pub mod traits;

// Re-export core types at crate root
pub use clients::{AnthropicClient, FirecrawlScraper, DEFAULT_MODEL};
pub use deps::EnrichmentDeps;
pub use error::{EnrichmentError, Result};
pub use jobs::{
    EnrichPrompt, EnrichmentRunner, EventDispatcher, EventMeta, EventRegistry, JobContext,
    MemoryStepJournal, SharedEventRegistry, StepJournal, StepRecord, TriggeredEvent,
};
pub use pipeline::{
    aggregate_context, build_event_registry, compose_prompt, enrich_prompt, extract_urls,
    generate_answer, scrape_all, EnrichmentOutcome,
};
pub use traits::{BaseTextGenerator, BaseWebScraper, ScrapedPage};
