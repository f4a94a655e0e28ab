use pz_core::{Result, ReviewSummary};

use crate::extract::assemble_html;
use crate::fetch::DocumentFetcher;
use crate::logging::Logger;
use crate::summary::rank_and_summarize;

/// Fetches one review page and summarises its `limit` newest reviews.
pub async fn summarize_document(
    fetcher: &dyn DocumentFetcher,
    location: &str,
    limit: usize,
) -> Result<ReviewSummary> {
    let logger = Logger::new().with_prefix(format!("[{}]", location));

    let html = fetcher.fetch(location).await?;
    logger.debug(&format!("fetched {} bytes", html.len()));

    // Html isn't Send, so parsing stays inside this synchronous call.
    let records = assemble_html(&html);
    if records.is_empty() {
        logger.warn("no reviews found on page");
    }

    let summary = rank_and_summarize(records, limit);
    logger.info(&format!(
        "kept {} reviews, average {}",
        summary.reviews.len(),
        summary
            .average_rating
            .map(|a| format!("{:.2}", a))
            .unwrap_or_else(|| "n/a".to_string())
    ));
    Ok(summary)
}
