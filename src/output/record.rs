//! Typed records and their serialization contract

use serde::Serialize;

/// A serializable record destined for one per-type output file.
///
/// The type tag names the destination file; it is not part of the
/// serialized record body.
pub trait Record: Serialize {
    /// Tag naming the destination this record type is written to
    const TYPE_TAG: &'static str;
}

/// One fully-extracted song.
///
/// Immutable once built; emitted exactly once per qualifying song URL.
/// Optional extraction results degrade to the "N/A" sentinel (release
/// date, featured artists) or to null (album) rather than failing the
/// record.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SongRecord {
    pub title: String,
    pub url: String,
    pub song_text: String,
    pub artist: String,
    pub album: Option<String>,
    /// ISO-8601 date or "N/A"
    pub released_at: String,
    /// Accepted cross-reference annotations on the page
    pub count_referents: usize,
    /// Pageview figure as rendered by the site (e.g. "296K")
    pub pageviews: String,
    /// Comma-joined tag names
    pub tags: String,
    pub contributor_count: u64,
    /// Comma-joined names or "N/A"
    pub featured_artists: String,
    pub is_explicit: bool,
}

impl Record for SongRecord {
    const TYPE_TAG: &'static str = "genius_song";
}
