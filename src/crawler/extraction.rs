//! Extraction stage
//!
//! Fetches every discovered nationality page under a fixed concurrency cap and
//! runs the page extractor over it. Workers never touch the aggregate: each
//! sends one [`PageOutcome`] over a channel, and the receiver closes once all
//! workers have finished (the stage's drain signal).

use crate::crawler::discovery::ExtractionTask;
use crate::crawler::fetcher::fetch_url;
use crate::extract::{PageExtraction, PageExtractor};
use crate::model::EntityIdentifier;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

/// Result of one extraction task
#[derive(Debug)]
pub struct PageOutcome {
    pub identifier: EntityIdentifier,

    /// Extracted records, or the fetch failure description
    pub result: Result<PageExtraction, String>,
}

/// Spawns one worker per task and returns the outcome channel
///
/// At most `max_concurrent` pages are in flight at once; the rest wait for a
/// permit. Must be called from within a tokio runtime.
pub fn spawn_extraction(
    client: Client,
    extractor: Arc<PageExtractor>,
    tasks: Vec<ExtractionTask>,
    max_concurrent: usize,
) -> mpsc::Receiver<PageOutcome> {
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let (tx, rx) = mpsc::channel(max_concurrent.max(1) * 2);

    for task in tasks {
        let client = client.clone();
        let extractor = Arc::clone(&extractor);
        let semaphore = Arc::clone(&semaphore);
        let tx = tx.clone();

        tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return;
            };

            let outcome = extract_one(&client, &extractor, task).await;
            let _ = tx.send(outcome).await;
        });
    }

    // Drop our copy of tx so rx closes when all spawned tasks finish
    drop(tx);

    rx
}

/// Fetches and extracts a single page
pub async fn extract_one(
    client: &Client,
    extractor: &PageExtractor,
    task: ExtractionTask,
) -> PageOutcome {
    let ExtractionTask { identifier, url } = task;
    tracing::debug!("Fetching {} for {}", url, identifier);

    let result = fetch_url(client, url.as_str())
        .await
        .into_body()
        .map(|body| extractor.extract_page(&body));

    match &result {
        Ok(extraction) => tracing::info!(
            "{}: Scraped {} entries from {} tables",
            identifier,
            extraction.records.len(),
            extraction.tables_total
        ),
        Err(reason) => tracing::warn!("{}: failed to fetch {}: {}", identifier, url, reason),
    }

    PageOutcome { identifier, result }
}
