//! Category listing page handler
//!
//! A category page lists songs with their primary artist and carries a
//! "next page" control. The handler feeds every non-excluded artist into
//! the category allow-list, enqueues each unique song link once, and
//! follows pagination while the page number stays within the bound.

use crate::pages::{css, resolve_link, CrawlRequest, HandlerOutput, PageKind};
use crate::state::TraversalState;
use scraper::Html;
use std::collections::HashSet;
use url::Url;

/// Handles one fetched category page.
///
/// Side effect: inserts observed artists into the category allow-list.
/// Song links are deduplicated within the page; the scheduler handles
/// cross-page dedup at the URL level.
pub fn handle_category(document: &Html, url: &Url, state: &TraversalState) -> HandlerOutput {
    let song_selector = css("a.song_link");
    let artist_selector =
        css("span.title_with_artists span.artist_name span.primary_artist_name");

    // Page-local unique set; category pages repeat chart entries.
    let mut song_links: HashSet<Url> = HashSet::new();

    for song in document.select(&song_selector) {
        let artist = match song.select(&artist_selector).next() {
            Some(name) => normalize_artist_name(&name.text().collect::<String>()),
            None => {
                tracing::debug!(url = %url, "song entry without artist name, skipping");
                continue;
            }
        };

        if state.is_excluded(&artist) {
            tracing::debug!(artist = %artist, "excluded artist, song entry skipped");
            continue;
        }

        state.allow_artist(&artist);

        if let Some(link) = song.value().attr("href").and_then(|h| resolve_link(h, url)) {
            song_links.insert(link);
        }
    }

    tracing::info!(
        url = %url,
        songs = song_links.len(),
        allow_list = state.category_artist_count(),
        "visited category page"
    );

    let mut requests: Vec<CrawlRequest> = song_links
        .into_iter()
        .map(|link| CrawlRequest::new(link, PageKind::Song))
        .collect();

    if let Some((next_link, page_number)) = next_page(document, url) {
        if state.within_page_bound(page_number) {
            tracing::info!(page = page_number, next = %next_link, "following category pagination");
            requests.push(CrawlRequest::new(next_link, PageKind::Category));
        } else {
            tracing::info!(page = page_number, "category pagination bound reached");
        }
    }

    HandlerOutput {
        requests,
        record: None,
    }
}

/// Collapses non-breaking spaces so artist names compare reliably
pub(crate) fn normalize_artist_name(raw: &str) -> String {
    raw.replace('\u{a0}', " ").trim().to_string()
}

/// Extracts the "next page" link and its page number.
///
/// Returns None on the last page (no control present) or when the link
/// carries no numeric `page` parameter.
fn next_page(document: &Html, url: &Url) -> Option<(Url, u32)> {
    let next_selector = css("a.next_page");

    let href = document
        .select(&next_selector)
        .next()
        .and_then(|a| a.value().attr("href"))?;

    let next_link = resolve_link(href, url)?;
    let page_number = next_link
        .query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse::<u32>().ok())?;

    Some((next_link, page_number))
}
