//! Page handlers and the page-type state machine
//!
//! Every fetched document carries the page-type tag of the request that
//! produced it; [`handle_page`] routes it to exactly one handler. Handlers
//! are synchronous: one document plus the traversal state in, zero or more
//! new requests plus at most one record out. Transitions:
//!
//! ```text
//! category -> { song*, category(next) }
//! song     -> { artist }            (once per artist, plus one record)
//! artist   -> { album_overview } xor { album* }
//! album_overview -> { album* }
//! album    -> { song* }             (re-enters song; URL dedup makes it safe)
//! ```

mod album;
mod artist;
mod category;
mod metadata;
mod song;
mod text;

pub use metadata::PageData;
pub use text::normalize_lyrics;

use crate::config::Config;
use crate::output::SongRecord;
use crate::state::TraversalState;
use scraper::{Html, Selector};
use url::Url;

/// Page-type tag attached to every crawl request.
///
/// The set of tags is closed; a document can only be produced by a request
/// carrying one of these, so there is no "unknown page type" at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Category listing page (crawl seed and pagination source)
    Category,
    /// Individual song page
    Song,
    /// Artist profile page
    Artist,
    /// Full album listing for one artist
    AlbumOverview,
    /// Single album track listing
    Album,
}

impl PageKind {
    /// Stable label used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Category => "category",
            PageKind::Song => "song",
            PageKind::Artist => "artist",
            PageKind::AlbumOverview => "album_overview",
            PageKind::Album => "album",
        }
    }
}

/// A request for the scheduler: one URL plus the handler that will process
/// the fetched document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    pub url: Url,
    pub kind: PageKind,
}

impl CrawlRequest {
    pub fn new(url: Url, kind: PageKind) -> Self {
        Self { url, kind }
    }
}

/// What one handler invocation produced: follow-up requests and at most
/// one extracted record.
#[derive(Debug, Default)]
pub struct HandlerOutput {
    pub requests: Vec<CrawlRequest>,
    pub record: Option<SongRecord>,
}

impl HandlerOutput {
    /// Output of a handler that found nothing to do (skip)
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Routes a fetched document to the handler matching its page-type tag.
///
/// # Arguments
///
/// * `kind` - The tag of the request that produced this document
/// * `body` - The fetched HTML
/// * `url` - The document's URL, used for link resolution and logging
/// * `state` - Shared traversal state
/// * `config` - The crawler configuration
pub fn handle_page(
    kind: PageKind,
    body: &str,
    url: &Url,
    state: &TraversalState,
    config: &Config,
) -> HandlerOutput {
    let document = Html::parse_document(body);

    match kind {
        PageKind::Category => category::handle_category(&document, url, state),
        PageKind::Song => song::handle_song(&document, url, state, config),
        PageKind::Artist => artist::handle_artist(&document, url),
        PageKind::AlbumOverview => album::handle_album_overview(&document, url),
        PageKind::Album => album::handle_album(&document, url),
    }
}

/// Parses a compile-time CSS selector literal.
///
/// Selector syntax errors are programming defects, not page conditions.
pub(crate) fn css(selector: &'static str) -> Selector {
    match Selector::parse(selector) {
        Ok(parsed) => parsed,
        Err(e) => panic!("invalid selector '{}': {:?}", selector, e),
    }
}

/// Resolves an href against the page URL, keeping only HTTP(S) results.
pub(crate) fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_kind_labels() {
        assert_eq!(PageKind::Category.as_str(), "category");
        assert_eq!(PageKind::AlbumOverview.as_str(), "album_overview");
    }

    #[test]
    fn test_resolve_relative_link() {
        let base = Url::parse("https://genius.com/tags/rap/all").unwrap();
        let resolved = resolve_link("/Cro-easy-lyrics", &base).unwrap();
        assert_eq!(resolved.as_str(), "https://genius.com/Cro-easy-lyrics");
    }

    #[test]
    fn test_resolve_rejects_fragments_and_empty() {
        let base = Url::parse("https://genius.com/").unwrap();
        assert!(resolve_link("", &base).is_none());
        assert!(resolve_link("#top", &base).is_none());
    }

    #[test]
    fn test_resolve_rejects_non_http_schemes() {
        let base = Url::parse("https://genius.com/").unwrap();
        assert!(resolve_link("javascript:void(0)", &base).is_none());
        assert!(resolve_link("mailto:someone@example.com", &base).is_none());
    }
}
