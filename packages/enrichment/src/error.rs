//! Typed errors for the enrichment library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during enrichment operations.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Scrape provider call failed for one URL
    #[error("scrape failed for {url}: {source}")]
    Scrape {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Text generation call failed (terminal for the pipeline)
    #[error("generation error: {0}")]
    Generation(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Journaled step result could not be serialized or replayed
    #[error("step journal error: {0}")]
    Journal(#[from] serde_json::Error),

    /// Event payload did not match the registered event type
    #[error("invalid payload for event {event}: {reason}")]
    InvalidPayload { event: String, reason: String },

    /// No handler registered for the event name
    #[error("unknown event: {0}")]
    UnknownEvent(String),

    /// Event could not be delivered because the runner has stopped
    #[error("dispatch failed: {0}")]
    Dispatch(String),
}

/// Result type alias for enrichment operations.
pub type Result<T> = std::result::Result<T, EnrichmentError>;
