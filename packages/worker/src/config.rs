use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Worker configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub firecrawl_api_key: String,
    pub anthropic_api_key: String,
    pub anthropic_model: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            firecrawl_api_key: env::var("FIRECRAWL_API_KEY")
                .context("FIRECRAWL_API_KEY must be set")?,
            anthropic_api_key: env::var("ANTHROPIC_API_KEY")
                .context("ANTHROPIC_API_KEY must be set")?,
            anthropic_model: env::var("ANTHROPIC_MODEL").ok(),
        })
    }
}
