//! Job infrastructure for background event execution.
//!
//! This module provides the infrastructure for running the enrichment
//! pipeline as a background job:
//! - [`EnrichPrompt`] / [`TriggeredEvent`] - Named trigger events
//! - [`EventRegistry`] - Maps event names to typed handlers
//! - [`EnrichmentRunner`] / [`EventDispatcher`] - In-process event loop
//! - [`StepJournal`] / [`JobContext`] - Durable-step result journaling
//!
//! Business logic lives in [`crate::pipeline`]; this module only carries
//! events to handlers and journals their step results.

mod event;
mod journal;
mod registry;
mod runner;

pub use event::{EnrichPrompt, EventMeta, TriggeredEvent};
pub use journal::{JobContext, MemoryStepJournal, StepJournal, StepRecord};
pub use registry::{EventRegistry, SharedEventRegistry};
pub use runner::{EnrichmentRunner, EventDispatcher};
