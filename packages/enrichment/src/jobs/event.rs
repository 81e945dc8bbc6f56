//! Trigger events for background jobs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// Metadata for event serialization.
///
/// Events implement this trait to provide their name, which the registry
/// uses for handler dispatch.
pub trait EventMeta {
    /// The event name (e.g., "prompt/enrich").
    fn event_name(&self) -> &'static str;
}

/// Event that triggers the prompt enrichment pipeline.
///
/// Dispatched by an external caller with a free-text prompt; the pipeline
/// consumes it exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichPrompt {
    pub prompt: String,
}

impl EnrichPrompt {
    pub const EVENT_NAME: &'static str = "prompt/enrich";

    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

impl EventMeta for EnrichPrompt {
    fn event_name(&self) -> &'static str {
        Self::EVENT_NAME
    }
}

/// A dispatched event instance, bound to a job id.
///
/// Immutable once dispatched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggeredEvent {
    /// Job id for this delivery (journal scope for step results)
    pub job_id: Uuid,
    /// Event name used for handler dispatch
    pub name: String,
    /// Serialized event payload
    pub payload: serde_json::Value,
    /// When the event was dispatched
    pub dispatched_at: DateTime<Utc>,
}

impl TriggeredEvent {
    /// Wrap an event into a dispatchable instance with a fresh job id.
    pub fn new<E: EventMeta + Serialize>(event: &E) -> Result<Self> {
        Ok(Self {
            job_id: Uuid::new_v4(),
            name: event.event_name().to_string(),
            payload: serde_json::to_value(event)?,
            dispatched_at: Utc::now(),
        })
    }

    /// Re-dispatch the same payload under the same job id.
    ///
    /// Used by a host that retries a failed job: keeping the job id lets
    /// the step journal skip completed stages.
    pub fn retry(&self) -> Self {
        Self {
            job_id: self.job_id,
            name: self.name.clone(),
            payload: self.payload.clone(),
            dispatched_at: Utc::now(),
        }
    }
}
