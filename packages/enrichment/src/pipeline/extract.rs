//! URL extraction from free-form prompt text.

use std::sync::LazyLock;

use regex::Regex;

// A URL token starts with http:// or https:// and runs to the next
// whitespace character.
static RE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("URL pattern is valid"));

/// Extract URL-shaped tokens from a prompt, in encounter order.
///
/// Absence of matches is a normal outcome, not a failure: a prompt with
/// no URLs yields an empty vector. Duplicates are preserved.
pub fn extract_urls(text: &str) -> Vec<String> {
    RE_URL
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
