//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator owns the work queue, the HTTP client, the shared
//! traversal state, and the record emitter. It keeps a bounded number of
//! fetches in flight, runs the synchronous page handler for each fetched
//! document, feeds the handler's follow-up requests back into the queue,
//! and forwards extracted records to the emitter. The run terminates when
//! the queue and the in-flight set are both empty.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::crawler::scheduler::Scheduler;
use crate::output::RecordEmitter;
use crate::pages::{handle_page, CrawlRequest, PageKind};
use crate::state::TraversalState;
use crate::MinerError;
use reqwest::Client;
use std::sync::Arc;
use tokio::task::JoinSet;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    scheduler: Scheduler,
    state: Arc<TraversalState>,
    emitter: RecordEmitter,
}

impl Coordinator {
    /// Creates a new coordinator and seeds the queue with the configured
    /// category pages.
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(MinerError)` - Failed to initialize
    pub fn new(config: Config) -> Result<Self, MinerError> {
        let client = build_http_client(&config.user_agent)?;
        let emitter = RecordEmitter::new(&config.output.records_dir)?;
        let state = Arc::new(TraversalState::new(
            config.crawler.excluded_artists.iter().cloned(),
            config.crawler.max_category_pages,
        ));

        let mut scheduler = Scheduler::new(config.crawler.allowed_domain.clone());
        for seed in &config.crawler.category_seeds {
            let url = Url::parse(seed)?;
            tracing::info!(seed = %url, "seeding category page");
            scheduler.submit(CrawlRequest::new(url, PageKind::Category));
        }

        Ok(Self {
            config: Arc::new(config),
            client,
            scheduler,
            state,
            emitter,
        })
    }

    /// Runs the crawl to its fixpoint.
    ///
    /// The loop keeps up to `max-concurrent-pages-open` fetches in flight.
    /// Handlers run here, on the coordinator task, as fetches complete;
    /// they only touch the traversal state through its atomic insert
    /// primitives, so their effects are order-independent.
    pub async fn run(&mut self) -> Result<(), MinerError> {
        let max_in_flight = self.config.crawler.max_concurrent_pages_open as usize;
        let mut in_flight: JoinSet<(CrawlRequest, FetchOutcome)> = JoinSet::new();

        let mut pages_processed: u64 = 0;
        let mut records_emitted: u64 = 0;
        let start_time = std::time::Instant::now();

        tracing::info!(
            domain = %self.config.crawler.allowed_domain,
            seeds = self.config.crawler.category_seeds.len(),
            "starting crawl run"
        );

        loop {
            // Top up in-flight fetches from the queue.
            while in_flight.len() < max_in_flight {
                let Some(request) = self.scheduler.next_request() else {
                    break;
                };
                let client = self.client.clone();
                in_flight.spawn(async move {
                    let outcome = fetch_page(&client, request.url.as_str()).await;
                    (request, outcome)
                });
            }

            // Queue empty and nothing in flight: the fixpoint is reached.
            let Some(joined) = in_flight.join_next().await else {
                break;
            };

            let (request, outcome) = match joined {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::error!(error = %e, "fetch task failed");
                    continue;
                }
            };

            match outcome {
                FetchOutcome::Success { body, .. } => {
                    let output = handle_page(
                        request.kind,
                        &body,
                        &request.url,
                        &self.state,
                        &self.config,
                    );

                    for follow_up in output.requests {
                        self.scheduler.submit(follow_up);
                    }

                    if let Some(record) = output.record {
                        self.emitter.emit(&record)?;
                        records_emitted += 1;
                    }
                }
                FetchOutcome::HttpError { status_code } => {
                    tracing::warn!(
                        url = %request.url,
                        kind = request.kind.as_str(),
                        status = status_code,
                        "page fetch returned error status"
                    );
                }
                FetchOutcome::NetworkError { error } => {
                    tracing::warn!(
                        url = %request.url,
                        kind = request.kind.as_str(),
                        error = %error,
                        "page fetch failed"
                    );
                }
            }

            pages_processed += 1;

            // Progress reporting every 10 pages
            if pages_processed % 10 == 0 {
                let elapsed = start_time.elapsed();
                let rate = pages_processed as f64 / elapsed.as_secs_f64();
                tracing::info!(
                    pages = pages_processed,
                    queued = self.scheduler.queue_len(),
                    in_flight = in_flight.len(),
                    records = records_emitted,
                    rate = format!("{:.2}/s", rate),
                    "crawl progress"
                );
            }
        }

        self.emitter.close()?;

        tracing::info!(
            pages = pages_processed,
            records = records_emitted,
            deduplicated = self.scheduler.deduplicated_count(),
            offsite = self.scheduler.rejected_offsite_count(),
            allow_list = self.state.category_artist_count(),
            artists_expanded = self.state.viewed_artist_count(),
            elapsed = ?start_time.elapsed(),
            "crawl complete"
        );

        Ok(())
    }
}

/// Runs the main crawl operation
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(())` - Crawl completed successfully
/// * `Err(MinerError)` - Crawl failed with an error
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use verse_miner::config::load_config;
/// use verse_miner::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// run_crawl(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<(), MinerError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
