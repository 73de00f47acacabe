//! Scheduler for the crawl work queue
//!
//! One FIFO queue of typed requests plus URL-level dedup and the domain
//! allow-list. Every request enters through [`Scheduler::submit`], which
//! rejects off-domain URLs and URLs already seen this run; a song reached
//! both via its category page and via an album is therefore fetched once.
//! The queue emptying is the crawl's natural termination condition.

use crate::pages::CrawlRequest;
use std::collections::{HashSet, VecDeque};

/// Work queue with URL dedup and domain restriction
#[derive(Debug)]
pub struct Scheduler {
    queue: VecDeque<CrawlRequest>,
    seen: HashSet<String>,
    allowed_domain: String,
    submitted: u64,
    rejected_offsite: u64,
    deduplicated: u64,
}

impl Scheduler {
    /// Creates an empty scheduler restricted to one domain
    pub fn new(allowed_domain: impl Into<String>) -> Self {
        Self {
            queue: VecDeque::new(),
            seen: HashSet::new(),
            allowed_domain: allowed_domain.into(),
            submitted: 0,
            rejected_offsite: 0,
            deduplicated: 0,
        }
    }

    /// Submits a request, returning true if it was enqueued.
    ///
    /// Requests for other domains and URLs already seen this run are
    /// dropped. A seen URL stays seen regardless of its request's page
    /// kind; the first submission wins.
    pub fn submit(&mut self, request: CrawlRequest) -> bool {
        match request.url.host_str() {
            Some(host) if host == self.allowed_domain => {}
            _ => {
                tracing::debug!(url = %request.url, "off-domain URL rejected");
                self.rejected_offsite += 1;
                return false;
            }
        }

        if !self.seen.insert(request.url.to_string()) {
            self.deduplicated += 1;
            return false;
        }

        tracing::debug!(url = %request.url, kind = request.kind.as_str(), "request enqueued");
        self.submitted += 1;
        self.queue.push_back(request);
        true
    }

    /// Pops the next request in submission order
    pub fn next_request(&mut self) -> Option<CrawlRequest> {
        self.queue.pop_front()
    }

    /// Number of requests currently waiting
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total requests accepted this run
    pub fn submitted_count(&self) -> u64 {
        self.submitted
    }

    /// Total submissions dropped as duplicates
    pub fn deduplicated_count(&self) -> u64 {
        self.deduplicated
    }

    /// Total submissions dropped as off-domain
    pub fn rejected_offsite_count(&self) -> u64 {
        self.rejected_offsite
    }
}
