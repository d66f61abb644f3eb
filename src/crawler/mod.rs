//! Crawler module for page fetching and stage orchestration
//!
//! This module contains the harvesting logic, including:
//! - HTTP fetching
//! - The discovery stage (category index to task list)
//! - The extraction stage (bounded worker pool over nationality pages)
//! - Overall coordination and hand-off to the output

mod coordinator;
mod discovery;
mod extraction;
mod fetcher;

pub use coordinator::{harvest, Harvester};
pub use discovery::{discover_tasks, run_discovery, DiscoveredTasks, ExtractionTask};
pub use extraction::{extract_one, spawn_extraction, PageOutcome};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
