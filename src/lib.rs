//! Verse-Miner: a single-domain lyrics harvester
//!
//! This crate implements a focused crawler that starts from category listing
//! pages, follows song, artist and album links within one allowed domain,
//! and extracts one structured record per qualifying song into per-type
//! JSON-lines files.

pub mod config;
pub mod crawler;
pub mod output;
pub mod pages;
pub mod state;

use thiserror::Error;

/// Main error type for Verse-Miner operations
#[derive(Debug, Error)]
pub enum MinerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while extracting data from a fetched page.
///
/// Every variant is recoverable by skipping the page that produced it;
/// they are caught at the song handler boundary and logged, never
/// propagated to the crawl loop.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// An expected structural element is absent from the document.
    #[error("expected element missing: {0}")]
    MalformedPage(String),

    /// The embedded metadata block is present but misses an expected key.
    #[error("metadata missing expected key: {0}")]
    SchemaDrift(String),

    /// The embedded metadata block is not readable JSON.
    #[error("metadata block unreadable: {0}")]
    Metadata(#[from] serde_json::Error),

    /// A date field is present but not in the expected format.
    #[error("unparseable date '{value}': {source}")]
    DateParse {
        value: String,
        source: chrono::ParseError,
    },
}

/// Result type alias for Verse-Miner operations
pub type Result<T> = std::result::Result<T, MinerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for page extraction operations
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use config::Config;
pub use output::{RecordEmitter, SongRecord};
pub use pages::{CrawlRequest, PageKind};
pub use state::TraversalState;
