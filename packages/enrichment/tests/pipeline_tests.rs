//! End-to-end tests for the enrichment pipeline.
//!
//! Uses the mock scraper and generator from `enrichment::testing` so the
//! full extract → scrape → generate flow runs without the network.

use std::sync::Arc;

use uuid::Uuid;

use enrichment::testing::{MockGenerator, MockScraper};
use enrichment::{
    build_event_registry, enrich_prompt, EnrichPrompt, EnrichmentDeps, EnrichmentRunner,
    JobContext, MemoryStepJournal, StepJournal, TriggeredEvent,
};

fn deps_with(scraper: &MockScraper, generator: &MockGenerator) -> EnrichmentDeps {
    EnrichmentDeps::new(Arc::new(scraper.clone()), Arc::new(generator.clone()))
}

fn fresh_ctx(journal: &Arc<MemoryStepJournal>) -> JobContext {
    JobContext::new(Uuid::new_v4(), journal.clone() as Arc<dyn StepJournal>)
}

#[tokio::test]
async fn prompt_without_urls_skips_scraping_entirely() {
    let scraper = MockScraper::new();
    let generator = MockGenerator::new().with_response("answer");
    let deps = deps_with(&scraper, &generator);
    let journal = Arc::new(MemoryStepJournal::new());

    let event = EnrichPrompt::new("tell me about rust");
    let outcome = enrich_prompt(&event, &fresh_ctx(&journal), &deps)
        .await
        .unwrap();

    assert_eq!(outcome.urls_found, 0);
    assert_eq!(outcome.pages_used, 0);
    // Zero network calls for a URL-free prompt
    assert_eq!(scraper.scrape_call_count(), 0);
    // The generator sees the original prompt verbatim, no "Context:" header
    assert_eq!(generator.prompts(), vec!["tell me about rust".to_string()]);
}

#[tokio::test]
async fn urls_are_scraped_and_folded_into_the_prompt() {
    let scraper = MockScraper::new()
        .with_page("https://a.test", "content-A")
        .with_page("https://b.test", "content-B");
    let generator = MockGenerator::new().with_response("answer");
    let deps = deps_with(&scraper, &generator);
    let journal = Arc::new(MemoryStepJournal::new());

    let event = EnrichPrompt::new("See https://a.test and https://b.test now");
    let outcome = enrich_prompt(&event, &fresh_ctx(&journal), &deps)
        .await
        .unwrap();

    assert_eq!(outcome.urls_found, 2);
    assert_eq!(outcome.pages_used, 2);
    assert_eq!(outcome.answer, "answer");
    assert_eq!(
        scraper.scrape_calls(),
        vec!["https://a.test".to_string(), "https://b.test".to_string()]
    );
    assert_eq!(
        generator.prompts(),
        vec![
            "Context:\ncontent-A\n\ncontent-B\n\nQuestion:\nSee https://a.test and https://b.test now"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn failed_scrapes_degrade_without_stray_separators() {
    let scraper = MockScraper::new()
        .with_page("https://a.test", "content-A")
        .with_failure("https://b.test");
    let generator = MockGenerator::new().with_response("answer");
    let deps = deps_with(&scraper, &generator);
    let journal = Arc::new(MemoryStepJournal::new());

    let event = EnrichPrompt::new("https://a.test https://b.test what gives?");
    let outcome = enrich_prompt(&event, &fresh_ctx(&journal), &deps)
        .await
        .unwrap();

    assert_eq!(outcome.urls_found, 2);
    assert_eq!(outcome.pages_used, 1);
    assert_eq!(
        generator.prompts(),
        vec![
            "Context:\ncontent-A\n\nQuestion:\nhttps://a.test https://b.test what gives?"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn all_scrapes_failing_falls_back_to_the_bare_prompt() {
    let scraper = MockScraper::new().with_failure("https://a.test");
    let generator = MockGenerator::new().with_response("answer");
    let deps = deps_with(&scraper, &generator);
    let journal = Arc::new(MemoryStepJournal::new());

    let event = EnrichPrompt::new("read https://a.test please");
    let outcome = enrich_prompt(&event, &fresh_ctx(&journal), &deps)
        .await
        .unwrap();

    // The pipeline still completes; enrichment is best-effort
    assert_eq!(outcome.pages_used, 0);
    assert_eq!(
        generator.prompts(),
        vec!["read https://a.test please".to_string()]
    );
}

#[tokio::test]
async fn generation_failure_is_terminal_and_does_not_rerun_prior_stages() {
    let scraper = MockScraper::new().with_page("https://a.test", "content-A");
    let generator = MockGenerator::new().with_response("answer");
    let deps = deps_with(&scraper, &generator);
    let journal = Arc::new(MemoryStepJournal::new());

    let job_id = Uuid::new_v4();
    let ctx = JobContext::new(job_id, journal.clone() as Arc<dyn StepJournal>);
    let event = EnrichPrompt::new("summarize https://a.test");

    generator.fail_next();
    let first = enrich_prompt(&event, &ctx, &deps).await;
    assert!(first.is_err());
    assert_eq!(scraper.scrape_call_count(), 1);

    // Host-driven retry under the same job id: extraction and scraping
    // replay from the journal, only generation runs again.
    let retry_ctx = JobContext::new(job_id, journal.clone() as Arc<dyn StepJournal>);
    let second = enrich_prompt(&event, &retry_ctx, &deps).await.unwrap();

    assert_eq!(second.answer, "answer");
    assert_eq!(scraper.scrape_call_count(), 1);
    assert_eq!(generator.generate_call_count(), 2);
}

#[tokio::test]
async fn identical_prompts_compose_identical_final_prompts() {
    let scraper = MockScraper::new().with_page("https://a.test", "stable content");
    let generator = MockGenerator::new().with_response("answer");
    let deps = deps_with(&scraper, &generator);
    let journal = Arc::new(MemoryStepJournal::new());

    let event = EnrichPrompt::new("explain https://a.test");
    enrich_prompt(&event, &fresh_ctx(&journal), &deps)
        .await
        .unwrap();
    enrich_prompt(&event, &fresh_ctx(&journal), &deps)
        .await
        .unwrap();

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0], prompts[1]);
}

#[tokio::test]
async fn redispatched_job_resumes_from_the_failed_step() {
    let scraper = MockScraper::new().with_page("https://a.test", "content-A");
    let generator = MockGenerator::new().with_response("answer");
    let deps = Arc::new(deps_with(&scraper, &generator));

    let (dispatcher, runner) = EnrichmentRunner::new(
        Arc::new(build_event_registry()),
        deps,
        Arc::new(MemoryStepJournal::new()),
    );

    let handle = tokio::spawn(runner.run());

    // First delivery fails at generation; the redispatch keeps the job id
    // so extraction and scraping replay from the journal.
    let event = TriggeredEvent::new(&EnrichPrompt::new("summarize https://a.test")).unwrap();
    generator.fail_next();
    dispatcher.redispatch(&event).await.unwrap();
    dispatcher.redispatch(&event).await.unwrap();
    drop(dispatcher);

    handle.await.unwrap().unwrap();

    assert_eq!(scraper.scrape_call_count(), 1);
    assert_eq!(generator.generate_call_count(), 2);
}

#[tokio::test]
async fn dispatched_event_flows_through_registry_and_runner() {
    let scraper = MockScraper::new().with_page("https://a.test", "content-A");
    let generator = MockGenerator::new().with_response("answer");
    let deps = Arc::new(deps_with(&scraper, &generator));

    let (dispatcher, runner) = EnrichmentRunner::new(
        Arc::new(build_event_registry()),
        deps,
        Arc::new(MemoryStepJournal::new()),
    );

    let handle = tokio::spawn(runner.run());

    dispatcher
        .dispatch(&EnrichPrompt::new("summarize https://a.test"))
        .await
        .unwrap();
    drop(dispatcher);

    handle.await.unwrap().unwrap();

    assert_eq!(scraper.scrape_call_count(), 1);
    assert_eq!(
        generator.prompts(),
        vec!["Context:\ncontent-A\n\nQuestion:\nsummarize https://a.test".to_string()]
    );
}
