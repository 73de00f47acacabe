//! Output module: typed records and the per-type JSON-lines sink registry

mod emitter;
mod record;

pub use emitter::RecordEmitter;
pub use record::{Record, SongRecord};

use thiserror::Error;

/// Errors that can occur while emitting records
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
