//! Run-scoped traversal state shared across page handlers
//!
//! The crawl keeps two growing name sets: `category_artists`, the
//! allow-list of artists observed directly on category pages, and
//! `viewed_artists`, the artists whose discography has already been
//! scheduled for expansion. Both are mutated exclusively through atomic
//! insert-if-absent operations so that concurrent handler invocations
//! cannot schedule the same artist twice.

use std::collections::HashSet;
use std::sync::Mutex;

/// Shared traversal state for one crawl run.
///
/// Created fresh at run start and discarded at run end; nothing here is
/// persisted.
#[derive(Debug)]
pub struct TraversalState {
    /// Artists whose pages have already been scheduled for album expansion
    viewed_artists: Mutex<HashSet<String>>,

    /// Artists observed on category pages; only their songs are recorded
    category_artists: Mutex<HashSet<String>>,

    /// Category-account pseudo-artists that are never followed
    excluded_artists: HashSet<String>,

    /// Maximum category page index the crawl will paginate to
    max_category_pages: u32,
}

impl TraversalState {
    /// Creates a fresh traversal state for a new run
    pub fn new(excluded_artists: impl IntoIterator<Item = String>, max_category_pages: u32) -> Self {
        Self {
            viewed_artists: Mutex::new(HashSet::new()),
            category_artists: Mutex::new(HashSet::new()),
            excluded_artists: excluded_artists.into_iter().collect(),
            max_category_pages,
        }
    }

    /// Returns true if the artist is an excluded category account
    pub fn is_excluded(&self, artist: &str) -> bool {
        self.excluded_artists.contains(artist)
    }

    /// Inserts an artist into the category allow-list (insert-if-absent)
    pub fn allow_artist(&self, artist: &str) {
        let mut artists = lock_set(&self.category_artists);
        if !artists.contains(artist) {
            artists.insert(artist.to_string());
        }
    }

    /// Returns true if the artist was observed on a category page
    pub fn is_category_artist(&self, artist: &str) -> bool {
        lock_set(&self.category_artists).contains(artist)
    }

    /// Marks an artist as viewed, returning true exactly once per name.
    ///
    /// The check and the insert happen under one lock so two concurrent
    /// song handlers cannot both win for the same artist.
    pub fn mark_artist_viewed(&self, artist: &str) -> bool {
        let mut viewed = lock_set(&self.viewed_artists);
        if viewed.contains(artist) {
            return false;
        }
        viewed.insert(artist.to_string());
        true
    }

    /// Returns true while the given category page index is within the bound
    pub fn within_page_bound(&self, page_number: u32) -> bool {
        page_number <= self.max_category_pages
    }

    /// Number of artists currently on the category allow-list
    pub fn category_artist_count(&self) -> usize {
        lock_set(&self.category_artists).len()
    }

    /// Number of artists whose discography expansion has been scheduled
    pub fn viewed_artist_count(&self) -> usize {
        lock_set(&self.viewed_artists).len()
    }
}

/// Locks a state set, recovering the data from a poisoned lock.
///
/// The sets hold plain strings, so a panic in another holder cannot leave
/// them in a torn state.
fn lock_set(set: &Mutex<HashSet<String>>) -> std::sync::MutexGuard<'_, HashSet<String>> {
    match set.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
