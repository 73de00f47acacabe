//! State module for tracking crawl progress
//!
//! Holds the run-scoped traversal state: the artist allow-list built from
//! category pages, the viewed-artist set guarding one-time discography
//! expansion, the excluded-artist constant set, and the pagination bound.

mod traversal;

pub use traversal::TraversalState;
