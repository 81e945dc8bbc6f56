//! Event registry for deserializing and executing jobs.
//!
//! The registry maps event names (e.g., "prompt/enrich") to handlers that
//! reconstruct typed payloads from JSON and run the job logic. The runner
//! dispatches claimed events through the registry without knowing the
//! concrete payload types.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::event::TriggeredEvent;
use super::journal::JobContext;
use crate::deps::EnrichmentDeps;
use crate::error::{EnrichmentError, Result};

/// Type alias for the async handler function.
///
/// Handlers take the raw payload, the per-job context, and the dependency
/// container. The typed payload is reconstructed inside the boxed closure.
type BoxedHandler = Box<
    dyn Fn(
            serde_json::Value,
            JobContext,
            Arc<EnrichmentDeps>,
        ) -> Pin<Box<dyn Future<Output = Result<()>> + Send>>
        + Send
        + Sync,
>;

struct EventRegistration {
    handler: BoxedHandler,
}

/// Registry that maps event names to handlers.
///
/// # Example
///
/// ```ignore
/// let mut registry = EventRegistry::new();
/// registry.register::<EnrichPrompt, _, _>(
///     EnrichPrompt::EVENT_NAME,
///     |event, ctx, deps| async move {
///         pipeline::enrich_prompt(&event, &ctx, deps.as_ref()).await.map(|_| ())
///     },
/// );
/// ```
#[derive(Default)]
pub struct EventRegistry {
    registrations: HashMap<&'static str, EventRegistration>,
}

impl EventRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            registrations: HashMap::new(),
        }
    }

    /// Register an event name with its handler.
    pub fn register<E, F, Fut>(&mut self, event_name: &'static str, handler: F)
    where
        E: DeserializeOwned + Send + Sync + 'static,
        F: Fn(E, JobContext, Arc<EnrichmentDeps>) -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let boxed_handler: BoxedHandler = Box::new(move |value, ctx, deps| {
            let handler = handler.clone();
            Box::pin(async move {
                let event: E =
                    serde_json::from_value(value).map_err(|e| EnrichmentError::InvalidPayload {
                        event: event_name.to_string(),
                        reason: e.to_string(),
                    })?;
                handler(event, ctx, deps).await
            })
        });

        self.registrations.insert(
            event_name,
            EventRegistration {
                handler: boxed_handler,
            },
        );
    }

    /// Execute a triggered event using its registered handler.
    ///
    /// Returns an error if the event name is unknown, the payload cannot
    /// be deserialized, or the handler fails.
    pub async fn execute(
        &self,
        event: &TriggeredEvent,
        ctx: JobContext,
        deps: Arc<EnrichmentDeps>,
    ) -> Result<()> {
        let registration = self
            .registrations
            .get(event.name.as_str())
            .ok_or_else(|| EnrichmentError::UnknownEvent(event.name.clone()))?;

        (registration.handler)(event.payload.clone(), ctx, deps).await
    }

    /// Check if an event name is registered.
    pub fn is_registered(&self, event_name: &str) -> bool {
        self.registrations.contains_key(event_name)
    }

    /// Get all registered event names.
    pub fn registered_names(&self) -> Vec<&'static str> {
        self.registrations.keys().copied().collect()
    }
}

/// Thread-safe registry wrapped in Arc.
pub type SharedEventRegistry = Arc<EventRegistry>;
