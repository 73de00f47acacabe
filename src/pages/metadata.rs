//! Embedded page metadata model
//!
//! Song pages carry a JSON blob in a `meta[itemprop=page_data]` attribute
//! holding tracking entries, ad key/values, the song object, and the data
//! layer. The blob's list sections are looked up by entry NAME, never by
//! position; an absent entry surfaces as [`ExtractError::SchemaDrift`]
//! naming the missing key.

use crate::{ExtractError, ExtractResult};
use serde::Deserialize;
use serde_json::Value;

/// Typed view over the `page_data` JSON blob of a song page
#[derive(Debug, Deserialize)]
pub struct PageData {
    tracking_data: Vec<TrackingEntry>,
    dfp_kv: Vec<DfpEntry>,
    song: SongMeta,
    dmp_data_layer: DataLayer,
}

/// One `{key, value}` tracking entry
#[derive(Debug, Deserialize)]
struct TrackingEntry {
    key: String,
    value: Value,
}

/// One `{name, values}` ad-targeting entry
#[derive(Debug, Deserialize)]
struct DfpEntry {
    name: String,
    #[serde(default)]
    values: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SongMeta {
    #[serde(default)]
    tags: Vec<TagEntry>,
    stats: SongStats,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SongStats {
    contributors: u64,
}

#[derive(Debug, Deserialize)]
struct DataLayer {
    page: DataLayerPage,
}

#[derive(Debug, Deserialize)]
struct DataLayerPage {
    #[serde(default)]
    artists: Vec<String>,
}

impl PageData {
    /// Parses the raw attribute content into the typed model
    pub fn parse(raw: &str) -> ExtractResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The song's declared lyrics language code (e.g. "de")
    pub fn language(&self) -> ExtractResult<String> {
        let value = self.tracking_value("Lyrics Language")?;
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Ok(other.to_string()),
        }
    }

    /// Raw pageview figure as rendered by the site (e.g. "296K")
    pub fn pageviews(&self) -> ExtractResult<String> {
        self.dfp_value("pageviews")
    }

    /// Whether the song is flagged explicit
    pub fn is_explicit(&self) -> ExtractResult<bool> {
        Ok(self.dfp_value("is_explicit")? == "true")
    }

    /// All tag names attached to the song
    pub fn tag_names(&self) -> Vec<&str> {
        self.song.tags.iter().map(|t| t.name.as_str()).collect()
    }

    /// Number of contributors to the song page
    pub fn contributor_count(&self) -> u64 {
        self.song.stats.contributors
    }

    /// Every artist the page lists, primary included
    pub fn listed_artists(&self) -> &[String] {
        &self.dmp_data_layer.page.artists
    }

    fn tracking_value(&self, key: &str) -> ExtractResult<&Value> {
        self.tracking_data
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
            .ok_or_else(|| ExtractError::SchemaDrift(format!("tracking_data.{}", key)))
    }

    fn dfp_value(&self, name: &str) -> ExtractResult<String> {
        self.dfp_kv
            .iter()
            .find(|entry| entry.name == name)
            .and_then(|entry| entry.values.first())
            .cloned()
            .ok_or_else(|| ExtractError::SchemaDrift(format!("dfp_kv.{}", name)))
    }
}
