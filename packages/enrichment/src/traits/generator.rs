//! Text generation trait for LLM providers.

use async_trait::async_trait;

use crate::error::Result;

/// Text generation trait for LLM completion.
///
/// Implementations wrap specific providers (Anthropic, mocks) and handle
/// the specifics of the wire format. Model selection is a design-time
/// choice: callers use the provider's default model unless they have a
/// reason to override per call.
#[async_trait]
pub trait BaseTextGenerator: Send + Sync {
    /// Generate text from a prompt using the default model.
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_model(prompt, None).await
    }

    /// Generate text from a prompt with a specific model.
    /// If model is None, uses the provider's default model.
    async fn generate_with_model(&self, prompt: &str, model: Option<&str>) -> Result<String>;
}
