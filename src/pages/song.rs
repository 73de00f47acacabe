//! Song page handler
//!
//! Validates that the fetched document really is a song page, that its
//! declared language matches the configured target, and that its primary
//! artist is on the category allow-list, then extracts the full song
//! record. Any extraction failure is caught at the handler boundary and
//! resolved by skipping this one page; partial records are never emitted.

use crate::config::Config;
use crate::output::SongRecord;
use crate::pages::category::normalize_artist_name;
use crate::pages::metadata::PageData;
use crate::pages::text::element_to_lyrics;
use crate::pages::{css, resolve_link, CrawlRequest, HandlerOutput, PageKind};
use crate::state::TraversalState;
use crate::{ExtractError, ExtractResult};
use chrono::NaiveDate;
use scraper::Html;
use url::Url;

/// Content marker a real song page carries in `meta[property='og:type']`
const SONG_PAGE_TYPE: &str = "music.song";

/// Handles one fetched document believed to be a song page.
///
/// This is the error boundary: extraction failures are logged with the
/// page URL and yield an empty output, never a run failure.
pub fn handle_song(
    document: &Html,
    url: &Url,
    state: &TraversalState,
    config: &Config,
) -> HandlerOutput {
    match extract_song(document, url, state, config) {
        Ok(Some(output)) => output,
        Ok(None) => HandlerOutput::empty(),
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "song page skipped");
            HandlerOutput::empty()
        }
    }
}

/// Runs the extraction pipeline.
///
/// `Ok(None)` means the page disqualified itself (not a song page, wrong
/// language, artist not allow-listed); `Err` means the page looked like a
/// qualifying song but could not be extracted.
fn extract_song(
    document: &Html,
    url: &Url,
    state: &TraversalState,
    config: &Config,
) -> ExtractResult<Option<HandlerOutput>> {
    // Step 1: re-validate the page type from content. Cross-links on album
    // pages occasionally point at non-song pages; those are a no-op.
    if page_type(document).as_deref() != Some(SONG_PAGE_TYPE) {
        return Ok(None);
    }

    // Step 2: embedded metadata block
    let meta_selector = css("meta[itemprop='page_data']");
    let raw_meta = document
        .select(&meta_selector)
        .next()
        .and_then(|m| m.value().attr("content"))
        .ok_or_else(|| ExtractError::MalformedPage("meta[itemprop=page_data]".to_string()))?;
    let meta = PageData::parse(raw_meta)?;

    // Step 3: language filter
    let language = meta.language()?;
    if language != config.crawler.target_language {
        tracing::debug!(url = %url, language = %language, "language mismatch, song ignored");
        return Ok(None);
    }

    // Step 4: primary artist must come from a category page. Without this
    // guard the album cycle drifts into unrelated artists reachable via
    // features and samples.
    let artist_selector = css("a.header_with_cover_art-primary_info-primary_artist");
    let artist_element = document.select(&artist_selector).next().ok_or_else(|| {
        ExtractError::MalformedPage("primary artist header".to_string())
    })?;
    let artist = normalize_artist_name(&artist_element.text().collect::<String>());
    if !state.is_category_artist(&artist) {
        tracing::debug!(url = %url, artist = %artist, "artist not on allow-list, song ignored");
        return Ok(None);
    }

    // Step 5: field extraction
    let title_selector = css("h1.header_with_cover_art-primary_info-title");
    let title = document
        .select(&title_selector)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .ok_or_else(|| ExtractError::MalformedPage("song title header".to_string()))?;

    let lyrics_selector = css("div.lyrics p");
    let song_text = document
        .select(&lyrics_selector)
        .next()
        .map(element_to_lyrics)
        .ok_or_else(|| ExtractError::MalformedPage("lyrics body".to_string()))?;

    let album_selector = css("a.song_album-info-title");
    let album = document
        .select(&album_selector)
        .next()
        .and_then(|a| a.value().attr("title"))
        .map(|t| t.to_string());

    let released_at = match release_date_raw(document) {
        Some(raw) => format_release_date(&raw)?,
        None => "N/A".to_string(),
    };

    let referent_selector = css("a.referent[classification='accepted']");
    let count_referents = document.select(&referent_selector).count();

    let pageviews = meta.pageviews()?;
    let is_explicit = meta.is_explicit()?;
    let tags = meta.tag_names().join(",");
    let contributor_count = meta.contributor_count();
    let featured_artists = featured_artists(&meta, &artist);

    // Step 6: one-time artist expansion
    let mut requests = Vec::new();
    if state.mark_artist_viewed(&artist) {
        match artist_element
            .value()
            .attr("href")
            .and_then(|href| resolve_link(href, url))
        {
            Some(link) => {
                tracing::info!(artist = %artist, link = %link, "expanding artist discography");
                requests.push(CrawlRequest::new(link, PageKind::Artist));
            }
            None => tracing::debug!(artist = %artist, "artist header carries no usable link"),
        }
    }

    // Step 7: the record itself
    let record = SongRecord {
        title,
        url: url.to_string(),
        song_text,
        artist,
        album,
        released_at,
        count_referents,
        pageviews,
        tags,
        contributor_count,
        featured_artists,
        is_explicit,
    };

    Ok(Some(HandlerOutput {
        requests,
        record: Some(record),
    }))
}

/// Reads the `og:type` content marker
fn page_type(document: &Html) -> Option<String> {
    let selector = css("meta[property='og:type']");
    document
        .select(&selector)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(|t| t.to_string())
}

/// Finds the raw release date in the track-info rows.
///
/// The date sits in the span following the "Release Date" label span.
fn release_date_raw(document: &Html) -> Option<String> {
    let span_selector = css("div[initial-content-for='track_info'] span");
    let mut label_seen = false;

    for span in document.select(&span_selector) {
        if label_seen {
            let value = span.text().collect::<String>().trim().to_string();
            if !value.is_empty() {
                return Some(value);
            }
        }
        label_seen = span.text().collect::<String>().contains("Release Date");
    }

    None
}

/// Reformats a human-readable "Month Day, Year" date to ISO-8601
fn format_release_date(raw: &str) -> ExtractResult<String> {
    let date =
        NaiveDate::parse_from_str(raw.trim(), "%B %d, %Y").map_err(|source| {
            ExtractError::DateParse {
                value: raw.to_string(),
                source,
            }
        })?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// All listed artists minus the primary, comma-joined, or "N/A"
fn featured_artists(meta: &PageData, primary: &str) -> String {
    let featured: Vec<&str> = meta
        .listed_artists()
        .iter()
        .map(String::as_str)
        .filter(|name| *name != primary)
        .collect();

    if featured.is_empty() {
        "N/A".to_string()
    } else {
        featured.join(",")
    }
}
