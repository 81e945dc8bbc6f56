//! Step journal for durable-step execution.
//!
//! Each pipeline step's result is journaled under `(job_id, step_name)`.
//! When a job is executed again with the same job id (a host-driven retry
//! after a terminal failure), completed steps replay their journaled
//! results instead of re-running.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;

/// A journaled step result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// Serialized step output
    pub value: serde_json::Value,
    /// When the step completed
    pub recorded_at: DateTime<Utc>,
}

impl StepRecord {
    /// Journal a step output, serializing it to JSON.
    pub fn new<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self {
            value: serde_json::to_value(value)?,
            recorded_at: Utc::now(),
        })
    }
}

/// Storage for journaled step results, keyed by `(job_id, step_name)`.
#[async_trait]
pub trait StepJournal: Send + Sync {
    /// Look up a journaled result for a step of a job.
    async fn get(&self, job_id: Uuid, step: &str) -> Option<StepRecord>;

    /// Journal a step result.
    async fn put(&self, job_id: Uuid, step: &str, record: StepRecord);
}

/// In-memory step journal.
///
/// Survives re-executions within one process, which is the durability a
/// host retrying in-process needs. A persistent backend would implement
/// the same trait.
#[derive(Default)]
pub struct MemoryStepJournal {
    entries: Arc<RwLock<HashMap<(Uuid, String), StepRecord>>>,
}

impl MemoryStepJournal {
    /// Create a new empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of journaled steps across all jobs.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether the journal holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

impl Clone for MemoryStepJournal {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

#[async_trait]
impl StepJournal for MemoryStepJournal {
    async fn get(&self, job_id: Uuid, step: &str) -> Option<StepRecord> {
        self.entries
            .read()
            .unwrap()
            .get(&(job_id, step.to_string()))
            .cloned()
    }

    async fn put(&self, job_id: Uuid, step: &str, record: StepRecord) {
        self.entries
            .write()
            .unwrap()
            .insert((job_id, step.to_string()), record);
    }
}

/// Per-job execution context handed to event handlers.
#[derive(Clone)]
pub struct JobContext {
    /// The job id this execution belongs to
    pub job_id: Uuid,
    journal: Arc<dyn StepJournal>,
}

impl JobContext {
    /// Create a context for one job execution.
    pub fn new(job_id: Uuid, journal: Arc<dyn StepJournal>) -> Self {
        Self { job_id, journal }
    }

    /// Run a step at most once per job.
    ///
    /// If the step already has a journaled result for this job id, it is
    /// replayed without executing `f`. Otherwise `f` runs and its output
    /// is journaled before being returned. Failed steps journal nothing,
    /// so they run again on the next execution.
    pub async fn run_step<T, F, Fut>(&self, step: &str, f: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(record) = self.journal.get(self.job_id, step).await {
            debug!(job_id = %self.job_id, step = step, "replaying journaled step result");
            return Ok(serde_json::from_value(record.value)?);
        }

        let value = f().await?;
        self.journal
            .put(self.job_id, step, StepRecord::new(&value)?)
            .await;

        Ok(value)
    }
}
