//! Discovery stage
//!
//! Fetches the category index once and turns every nationality-page link on it
//! into an extraction task. The first link to an identifier wins; later links
//! to the same identifier are ignored.

use crate::crawler::fetcher::fetch_url;
use crate::model::EntityIdentifier;
use crate::output::Aggregator;
use crate::url::{resolve_link, IdentifierResolver};
use crate::HarvestError;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// One nationality page to fetch and extract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionTask {
    pub identifier: EntityIdentifier,
    pub url: Url,
}

/// Tasks produced by the discovery stage
#[derive(Debug, Clone, Default)]
pub struct DiscoveredTasks {
    pub tasks: Vec<ExtractionTask>,

    /// Links that resolved to an identifier, duplicates included
    pub links_matched: usize,
}

/// Builds extraction tasks from the category page HTML
///
/// Each new identifier gets its slot reserved in `aggregator`; a link whose
/// identifier is already reserved produces no task.
pub fn discover_tasks(
    html: &str,
    base_url: &Url,
    resolver: &IdentifierResolver,
    aggregator: &mut Aggregator,
) -> DiscoveredTasks {
    let document = Html::parse_document(html);
    let mut discovered = DiscoveredTasks::default();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let Some(identifier) = resolver.resolve(href) else {
            continue;
        };
        discovered.links_matched += 1;

        if aggregator.is_reserved(&identifier) {
            tracing::trace!("Identifier {} already queued, skipping {}", identifier, href);
            continue;
        }

        let Some(url) = resolve_link(href, base_url) else {
            tracing::debug!("Cannot resolve link {} for {}", href, identifier);
            continue;
        };

        aggregator.reserve(identifier.clone());
        discovered.tasks.push(ExtractionTask { identifier, url });
    }

    discovered
}

/// Runs the discovery stage
///
/// # Returns
///
/// * `Ok(DiscoveredTasks)` - Every task, ready for the extraction stage
/// * `Err(HarvestError::Discovery)` - The category page could not be fetched
pub async fn run_discovery(
    client: &Client,
    base_url: &Url,
    category_path: &str,
    resolver: &IdentifierResolver,
    aggregator: &mut Aggregator,
) -> Result<DiscoveredTasks, HarvestError> {
    let category_url = base_url.join(category_path)?;
    tracing::info!("Fetching category index {}", category_url);

    let body = fetch_url(client, category_url.as_str())
        .await
        .into_body()
        .map_err(|reason| HarvestError::Discovery {
            url: category_url.to_string(),
            reason,
        })?;

    let discovered = discover_tasks(&body, base_url, resolver, aggregator);
    tracing::info!(
        "Discovered {} identifiers from {} matching links",
        discovered.tasks.len(),
        discovered.links_matched
    );

    Ok(discovered)
}
