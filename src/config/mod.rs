//! Configuration loading and validation
//!
//! Configuration is a TOML file with three sections: `[crawler]` (domain
//! restriction, seeds, pagination bound, language filter, excluded
//! artists, concurrency), `[user-agent]` (crawler identification), and
//! `[output]` (records directory).

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
pub use validation::validate;
