//! Album overview and album track-listing handlers
//!
//! The overview page lists every album of one artist; an album page lists
//! its tracks. Track links whose identifier marks them as instrumental are
//! dropped, they carry no lyrics. Album track links re-enter the song
//! handler; the scheduler's URL dedup keeps the cycle finite.

use crate::pages::{css, resolve_link, CrawlRequest, HandlerOutput, PageKind};
use scraper::Html;
use url::Url;

/// Handles one fetched album-listing overview page
pub fn handle_album_overview(document: &Html, url: &Url) -> HandlerOutput {
    let album_selector = css("ul.album_list li a.album_link");
    let requests: Vec<CrawlRequest> = document
        .select(&album_selector)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| resolve_link(href, url))
        .map(|link| CrawlRequest::new(link, PageKind::Album))
        .collect();

    tracing::info!(url = %url, albums = requests.len(), "visited album overview");

    HandlerOutput {
        requests,
        record: None,
    }
}

/// Handles one fetched album page
pub fn handle_album(document: &Html, url: &Url) -> HandlerOutput {
    let track_selector = css("div.chart_row-content a.u-display_block");
    let requests: Vec<CrawlRequest> = document
        .select(&track_selector)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !is_instrumental(href))
        .filter_map(|href| resolve_link(href, url))
        .map(|link| CrawlRequest::new(link, PageKind::Song))
        .collect();

    tracing::info!(url = %url, tracks = requests.len(), "visited album page");

    HandlerOutput {
        requests,
        record: None,
    }
}

/// Track identifiers of instrumentals carry the word in their slug
fn is_instrumental(href: &str) -> bool {
    href.contains("instrumental")
}
