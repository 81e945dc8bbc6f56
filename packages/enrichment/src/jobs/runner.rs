//! In-process job runner for triggered events.
//!
//! The runner owns the receiving half of a bounded event channel and
//! executes events sequentially through the registry:
//!
//! ```text
//! EventDispatcher.dispatch(event)
//!     │
//!     └─► mpsc channel
//!             │
//! EnrichmentRunner
//!     ├─► Deserialize + execute via EventRegistry
//!     └─► Log succeeded/failed (retry is the caller's policy)
//! ```
//!
//! The loop stops once every dispatcher handle has been dropped and the
//! channel drains. A failed job is terminal here: completed steps stay in
//! the journal, so a caller that re-dispatches with `TriggeredEvent::retry`
//! resumes from the failed step.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::event::{EventMeta, TriggeredEvent};
use super::journal::{JobContext, StepJournal};
use super::registry::SharedEventRegistry;
use crate::deps::EnrichmentDeps;
use crate::error::{EnrichmentError, Result};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Sending half of the event channel.
///
/// Cheap to clone; the runner stops when all clones are dropped.
#[derive(Clone)]
pub struct EventDispatcher {
    tx: mpsc::Sender<TriggeredEvent>,
}

impl EventDispatcher {
    /// Dispatch a named event, returning the job id assigned to it.
    pub async fn dispatch<E: EventMeta + Serialize>(&self, event: &E) -> Result<Uuid> {
        let triggered = TriggeredEvent::new(event)?;
        let job_id = triggered.job_id;

        info!(job_id = %job_id, event = %triggered.name, "dispatching event");

        self.tx
            .send(triggered)
            .await
            .map_err(|_| EnrichmentError::Dispatch("runner has stopped".to_string()))?;

        Ok(job_id)
    }

    /// Re-dispatch a previously triggered event under its original job id.
    pub async fn redispatch(&self, event: &TriggeredEvent) -> Result<()> {
        self.tx
            .send(event.retry())
            .await
            .map_err(|_| EnrichmentError::Dispatch("runner has stopped".to_string()))
    }
}

/// Background service that executes triggered events.
pub struct EnrichmentRunner {
    registry: SharedEventRegistry,
    deps: Arc<EnrichmentDeps>,
    journal: Arc<dyn StepJournal>,
    rx: mpsc::Receiver<TriggeredEvent>,
}

impl EnrichmentRunner {
    /// Create a runner and the dispatcher feeding it.
    pub fn new(
        registry: SharedEventRegistry,
        deps: Arc<EnrichmentDeps>,
        journal: Arc<dyn StepJournal>,
    ) -> (EventDispatcher, Self) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let dispatcher = EventDispatcher { tx };
        let runner = Self {
            registry,
            deps,
            journal,
            rx,
        };

        (dispatcher, runner)
    }

    /// Run until every dispatcher handle is dropped and the channel drains.
    pub async fn run(mut self) -> Result<()> {
        info!(
            events = ?self.registry.registered_names(),
            "enrichment runner starting"
        );

        while let Some(event) = self.rx.recv().await {
            debug!(job_id = %event.job_id, event = %event.name, "executing job");

            let ctx = JobContext::new(event.job_id, self.journal.clone());
            match self.registry.execute(&event, ctx, self.deps.clone()).await {
                Ok(()) => {
                    info!(job_id = %event.job_id, event = %event.name, "job succeeded");
                }
                Err(e) => {
                    // Terminal for this delivery. Journaled steps are kept,
                    // so a redispatch resumes from the failed step.
                    warn!(job_id = %event.job_id, event = %event.name, error = %e, "job failed");
                }
            }
        }

        info!("enrichment runner stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::journal::MemoryStepJournal;
    use crate::jobs::{EnrichPrompt, EventRegistry};
    use crate::testing::{MockGenerator, MockScraper};

    fn runner_fixture(
        registry: EventRegistry,
    ) -> (EventDispatcher, EnrichmentRunner, MockGenerator) {
        let generator = MockGenerator::new();
        let deps = Arc::new(EnrichmentDeps::new(
            Arc::new(MockScraper::new()),
            Arc::new(generator.clone()),
        ));
        let (dispatcher, runner) = EnrichmentRunner::new(
            Arc::new(registry),
            deps,
            Arc::new(MemoryStepJournal::new()),
        );
        (dispatcher, runner, generator)
    }

    #[tokio::test]
    async fn runner_drains_and_stops_when_dispatchers_drop() {
        let mut registry = EventRegistry::new();
        registry.register::<EnrichPrompt, _, _>(
            EnrichPrompt::EVENT_NAME,
            |event, _ctx, deps| async move {
                deps.generator.generate(&event.prompt).await.map(|_| ())
            },
        );

        let (dispatcher, runner, generator) = runner_fixture(registry);

        dispatcher.dispatch(&EnrichPrompt::new("hello")).await.unwrap();
        drop(dispatcher);

        runner.run().await.unwrap();

        assert_eq!(generator.prompts(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn failed_jobs_do_not_stop_the_runner() {
        let mut registry = EventRegistry::new();
        registry.register::<EnrichPrompt, _, _>(
            EnrichPrompt::EVENT_NAME,
            |event, _ctx, deps| async move {
                deps.generator.generate(&event.prompt).await.map(|_| ())
            },
        );

        let (dispatcher, runner, generator) = runner_fixture(registry);
        generator.fail_next();

        dispatcher.dispatch(&EnrichPrompt::new("first")).await.unwrap();
        dispatcher.dispatch(&EnrichPrompt::new("second")).await.unwrap();
        drop(dispatcher);

        runner.run().await.unwrap();

        // Both events were attempted despite the first one failing
        assert_eq!(generator.generate_call_count(), 2);
    }

    #[tokio::test]
    async fn dispatch_after_runner_stops_is_an_error() {
        let registry = EventRegistry::new();
        let (dispatcher, runner, _generator) = runner_fixture(registry);

        drop(runner);

        let result = dispatcher.dispatch(&EnrichPrompt::new("hello")).await;
        assert!(matches!(result, Err(EnrichmentError::Dispatch(_))));
    }
}
