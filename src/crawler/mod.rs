//! Crawler module for page fetching and crawl orchestration
//!
//! This module contains:
//! - HTTP fetching and outcome classification
//! - The typed work queue with URL dedup and domain restriction
//! - The crawl loop coordinating fetches, handlers, and record emission

mod coordinator;
mod fetcher;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use scheduler::Scheduler;

use crate::config::Config;
use crate::MinerError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It seeds the work
/// queue with the configured category pages, traverses song, artist and
/// album links within the allowed domain, and writes one record per
/// qualifying song.
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(())` - Crawl completed successfully
/// * `Err(MinerError)` - Crawl failed
pub async fn crawl(config: Config) -> Result<(), MinerError> {
    run_crawl(config).await
}
