//! Concurrent scrape fan-out with partial-failure tolerance.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::traits::BaseWebScraper;

/// Scrape every URL concurrently, degrading failures to empty strings.
///
/// All fetches are launched at once and the function returns only after
/// every one has settled (join-all barrier). The result vector is in the
/// same order as `urls`; a slot is empty when that URL's scrape failed or
/// returned no content. An empty input issues no network calls.
pub async fn scrape_all(urls: &[String], scraper: &dyn BaseWebScraper) -> Vec<String> {
    if urls.is_empty() {
        return Vec::new();
    }

    let futures: Vec<_> = urls
        .iter()
        .map(|url| async move {
            match scraper.scrape(url).await {
                Ok(page) => {
                    debug!(
                        url = %url,
                        content_length = page.markdown.len(),
                        "scraped page"
                    );
                    page.markdown
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "scrape failed, dropping URL from context");
                    String::new()
                }
            }
        })
        .collect();

    join_all(futures).await
}

/// Join non-empty scrape results with a blank line, preserving order.
pub fn aggregate_context(results: &[String]) -> String {
    results
        .iter()
        .filter(|content| !content.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n\n")
}
