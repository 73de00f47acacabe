use serde::Deserialize;

/// Main configuration structure for Verse-Miner
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// The only domain the crawler is allowed to fetch from
    #[serde(rename = "allowed-domain")]
    pub allowed_domain: String,

    /// Category listing pages the crawl starts from
    #[serde(rename = "category-seeds")]
    pub category_seeds: Vec<String>,

    /// Maximum page index followed along a category's numbered sequence
    #[serde(rename = "max-category-pages")]
    pub max_category_pages: u32,

    /// Language code a song must declare to be recorded (e.g. "de")
    #[serde(rename = "target-language")]
    pub target_language: String,

    /// Artist names that are category accounts rather than real artists;
    /// songs listed under them are never followed
    #[serde(rename = "excluded-artists", default)]
    pub excluded_artists: Vec<String>,

    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-concurrent-pages-open")]
    pub max_concurrent_pages_open: u32,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the per-type JSON-lines record files are written to
    #[serde(rename = "records-dir")]
    pub records_dir: String,
}
