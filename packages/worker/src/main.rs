// Worker entry point: dispatches one enrichment event and runs the job
// loop until it drains.

mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use enrichment::{
    build_event_registry, AnthropicClient, EnrichPrompt, EnrichmentDeps, EnrichmentRunner,
    FirecrawlScraper, MemoryStepJournal,
};

/// Enrich a prompt with live web content before generation.
#[derive(Parser, Debug)]
#[command(name = "enrichment-worker")]
struct Args {
    /// Prompt to enrich; URLs inside it are scraped for context
    prompt: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,enrichment=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Wire vendor clients behind the pipeline traits
    let scraper =
        FirecrawlScraper::new(config.firecrawl_api_key).context("Failed to create scraper")?;

    let mut generator = AnthropicClient::new(config.anthropic_api_key)
        .context("Failed to create generation client")?;
    if let Some(model) = config.anthropic_model {
        generator = generator.with_default_model(model);
    }

    let deps = Arc::new(EnrichmentDeps::new(Arc::new(scraper), Arc::new(generator)));

    // Build the event loop
    let (dispatcher, runner) = EnrichmentRunner::new(
        Arc::new(build_event_registry()),
        deps,
        Arc::new(MemoryStepJournal::new()),
    );

    let handle = tokio::spawn(runner.run());

    let job_id = dispatcher
        .dispatch(&EnrichPrompt::new(args.prompt))
        .await
        .context("Failed to dispatch enrichment event")?;
    tracing::info!(job_id = %job_id, "enrichment job dispatched");

    // Dropping the dispatcher lets the runner drain and stop
    drop(dispatcher);

    handle
        .await
        .context("Runner task panicked")?
        .context("Runner error")?;

    Ok(())
}
