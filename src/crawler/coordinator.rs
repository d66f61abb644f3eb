//! Harvest coordinator - stage orchestration
//!
//! Runs the two stages back to back and hands the result to the output:
//! 1. Discovery: fetch the category index, build the task list
//! 2. Extraction: fetch every nationality page under the worker cap
//! 3. Aggregation: drain extraction outcomes into the aggregate (single writer)
//! 4. Persistence: hand the finished document to the output handler, once

use crate::config::Config;
use crate::crawler::discovery::run_discovery;
use crate::crawler::extraction::spawn_extraction;
use crate::crawler::fetcher::build_http_client;
use crate::extract::PageExtractor;
use crate::output::{Aggregator, HarvestReport, JsonFileOutput, OutputHandler};
use crate::url::IdentifierResolver;
use crate::HarvestError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Main harvest coordinator structure
pub struct Harvester {
    config: Arc<Config>,
    client: Client,
    base_url: Url,
    resolver: IdentifierResolver,
    extractor: Arc<PageExtractor>,
}

impl Harvester {
    /// Creates a new harvester with the default extraction policies
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Ready to run
    /// * `Err(HarvestError)` - Invalid base URL or HTTP client failure
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        Self::with_policies(config, IdentifierResolver::default(), PageExtractor::default())
    }

    /// Creates a harvester with custom link and page policies
    pub fn with_policies(
        config: Config,
        resolver: IdentifierResolver,
        extractor: PageExtractor,
    ) -> Result<Self, HarvestError> {
        let base_url = Url::parse(&config.source.base_url)?;
        let client = build_http_client(&config)?;

        Ok(Self {
            config: Arc::new(config),
            client,
            base_url,
            resolver,
            extractor: Arc::new(extractor),
        })
    }

    /// Runs discovery, extraction and persistence
    ///
    /// Page fetch failures and the output failure are logged and counted in
    /// the report; only a failed category fetch aborts the run.
    pub async fn run(&self, output: &dyn OutputHandler) -> Result<HarvestReport, HarvestError> {
        let start_time = Instant::now();
        let mut report = HarvestReport::new();
        let mut aggregator = Aggregator::new();

        let discovered = run_discovery(
            &self.client,
            &self.base_url,
            &self.config.source.category_path,
            &self.resolver,
            &mut aggregator,
        )
        .await?;
        report.links_matched = discovered.links_matched;
        report.identifiers_discovered = discovered.tasks.len();

        let max_concurrent = self.config.crawler.max_concurrent_pages_open as usize;
        tracing::info!(
            "Extracting {} pages with {} workers",
            discovered.tasks.len(),
            max_concurrent
        );

        let mut outcomes = spawn_extraction(
            self.client.clone(),
            Arc::clone(&self.extractor),
            discovered.tasks,
            max_concurrent,
        );

        while let Some(outcome) = outcomes.recv().await {
            match outcome.result {
                Ok(extraction) => {
                    report.pages_extracted += 1;
                    report.tables_total += extraction.tables_total;
                    report.tables_matched += extraction.tables_matched;
                    aggregator.fill(&outcome.identifier, extraction.records);
                }
                Err(_) => report.pages_failed += 1,
            }

            let done = report.pages_extracted + report.pages_failed;
            if done % 25 == 0 {
                tracing::info!(
                    "Progress: {}/{} pages done",
                    done,
                    report.identifiers_discovered
                );
            }
        }

        tracing::info!(
            "Extraction drained: {} extracted, {} failed",
            report.pages_extracted,
            report.pages_failed
        );

        report.countries_recorded = aggregator.country_count();
        let document = aggregator.into_document();

        match output.persist(&document) {
            Ok(()) => {
                tracing::info!(
                    "Wrote {} identifiers to {}",
                    document.len(),
                    output.destination()
                );
                report.persisted = true;
            }
            Err(e) => {
                tracing::error!("Failed to write {}: {}", output.destination(), e);
            }
        }

        report.elapsed = start_time.elapsed();
        Ok(report)
    }
}

/// Runs a complete harvest, writing the JSON document to `output.json-path`
///
/// # Example
///
/// ```no_run
/// use visa_harvest::config::Config;
/// use visa_harvest::crawler::harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = harvest(Config::default()).await?;
/// println!("{} countries recorded", report.countries_recorded);
/// # Ok(())
/// # }
/// ```
pub async fn harvest(config: Config) -> Result<HarvestReport, HarvestError> {
    let output = JsonFileOutput::new(&config.output.json_path);
    let harvester = Harvester::new(config)?;
    harvester.run(&output).await
}
