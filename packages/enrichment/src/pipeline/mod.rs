//! The prompt enrichment pipeline.
//!
//! Three stages, executed strictly in sequence:
//!
//! ```text
//! extract_urls ──► gather_context ──► generate_answer
//! ```
//!
//! Stage two is best-effort: per-URL scrape failures degrade the context,
//! never the control flow. Stage three is terminal-on-failure. Each stage
//! runs under [`JobContext::run_step`], so a re-execution of the same job
//! id resumes after the last completed stage instead of starting over.

mod extract;
mod generate;
mod scrape;

pub use extract::extract_urls;
pub use generate::{compose_prompt, generate_answer};
pub use scrape::{aggregate_context, scrape_all};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::deps::EnrichmentDeps;
use crate::error::Result;
use crate::jobs::{EnrichPrompt, EventRegistry, JobContext};

/// What one pipeline run produced, for logging by the caller.
///
/// The generated text is not persisted anywhere; the job's side effect is
/// the generation call itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentOutcome {
    /// URLs found in the prompt
    pub urls_found: usize,
    /// URLs that contributed content to the context
    pub pages_used: usize,
    /// Generated text
    pub answer: String,
}

/// Journaled output of the scrape stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GatheredContext {
    context: String,
    pages_used: usize,
}

/// Run the enrichment pipeline for one triggered event.
pub async fn enrich_prompt(
    event: &EnrichPrompt,
    ctx: &JobContext,
    deps: &EnrichmentDeps,
) -> Result<EnrichmentOutcome> {
    let urls: Vec<String> = ctx
        .run_step("extract_urls", || async {
            Ok(extract_urls(&event.prompt))
        })
        .await?;

    let urls_found = urls.len();

    let gathered: GatheredContext = ctx
        .run_step("gather_context", || async {
            let results = scrape_all(&urls, deps.scraper.as_ref()).await;
            let pages_used = results.iter().filter(|c| !c.is_empty()).count();
            Ok(GatheredContext {
                context: aggregate_context(&results),
                pages_used,
            })
        })
        .await?;

    let answer: String = ctx
        .run_step("generate_answer", || async {
            generate_answer(&event.prompt, &gathered.context, deps.generator.as_ref()).await
        })
        .await?;

    let outcome = EnrichmentOutcome {
        urls_found,
        pages_used: gathered.pages_used,
        answer,
    };

    info!(
        job_id = %ctx.job_id,
        urls_found = outcome.urls_found,
        pages_used = outcome.pages_used,
        context_length = gathered.context.len(),
        answer_length = outcome.answer.len(),
        "prompt enrichment complete"
    );

    Ok(outcome)
}

/// Build the event registry with the enrichment pipeline registered.
pub fn build_event_registry() -> EventRegistry {
    let mut registry = EventRegistry::new();

    registry.register::<EnrichPrompt, _, _>(
        EnrichPrompt::EVENT_NAME,
        |event, ctx, deps| async move { enrich_prompt(&event, &ctx, deps.as_ref()).await.map(|_| ()) },
    );

    registry
}
