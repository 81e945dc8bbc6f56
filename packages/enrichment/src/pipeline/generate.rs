//! Final prompt composition and the generation call.

use crate::error::Result;
use crate::traits::BaseTextGenerator;

/// Compose the final prompt from the original prompt and aggregated context.
///
/// Pure function: same inputs always yield the same string. An empty
/// context returns the prompt verbatim, with no "Context:" header.
pub fn compose_prompt(prompt: &str, context: &str) -> String {
    if context.is_empty() {
        prompt.to_string()
    } else {
        format!("Context:\n{}\n\nQuestion:\n{}", context, prompt)
    }
}

/// Run the generation call against the composed prompt.
///
/// A provider failure here is terminal for the pipeline; retry policy
/// belongs to whoever is driving the job, not to this stage.
pub async fn generate_answer(
    prompt: &str,
    context: &str,
    generator: &dyn BaseTextGenerator,
) -> Result<String> {
    let final_prompt = compose_prompt(prompt, context);

    tracing::debug!(
        prompt_length = final_prompt.len(),
        has_context = !context.is_empty(),
        "requesting generation"
    );

    generator.generate(&final_prompt).await
}
