//! JSON-lines record emitter
//!
//! The emitter owns an explicit registry mapping each record type tag to
//! an open `<tag>.jl` sink in the records directory, created on first use.
//! Every emitted record becomes one self-contained JSON line. `close`
//! flushes and releases every open sink; `Drop` repeats the flush so no
//! exit path leaves buffered records behind.

use crate::output::record::Record;
use crate::output::OutputError;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// Per-type-tag JSON-lines file registry
#[derive(Debug)]
pub struct RecordEmitter {
    dir: PathBuf,
    sinks: Mutex<HashMap<&'static str, BufWriter<File>>>,
}

impl RecordEmitter {
    /// Creates an emitter writing into `dir`, creating the directory if
    /// needed. Sinks are opened lazily per type tag.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, OutputError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            sinks: Mutex::new(HashMap::new()),
        })
    }

    /// Serializes one record and appends it as a line to its type's sink
    pub fn emit<R: Record>(&self, record: &R) -> Result<(), OutputError> {
        let line = serde_json::to_string(record)?;

        let mut sinks = lock_sinks(&self.sinks);
        let writer = match sinks.entry(R::TYPE_TAG) {
            std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
            std::collections::hash_map::Entry::Vacant(entry) => {
                let path = self.dir.join(format!("{}.jl", R::TYPE_TAG));
                tracing::info!(path = %path.display(), "opening record sink");
                entry.insert(BufWriter::new(File::create(&path)?))
            }
        };

        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flushes and closes every open sink.
    ///
    /// Called on every exit path of a run; emitting after close reopens
    /// the sink, which would truncate it, so the coordinator closes last.
    pub fn close(&self) -> Result<(), OutputError> {
        let mut sinks = lock_sinks(&self.sinks);
        for (tag, writer) in sinks.iter_mut() {
            tracing::info!(tag = %tag, "closing record sink");
            writer.flush()?;
        }
        sinks.clear();
        Ok(())
    }

    /// Number of sinks opened so far
    pub fn open_sink_count(&self) -> usize {
        lock_sinks(&self.sinks).len()
    }
}

impl Drop for RecordEmitter {
    fn drop(&mut self) {
        // Last-resort flush for abnormal exits; errors have nowhere to go.
        if let Ok(mut sinks) = self.sinks.lock() {
            for writer in sinks.values_mut() {
                let _ = writer.flush();
            }
        }
    }
}

fn lock_sinks<'a>(
    sinks: &'a Mutex<HashMap<&'static str, BufWriter<File>>>,
) -> std::sync::MutexGuard<'a, HashMap<&'static str, BufWriter<File>>> {
    match sinks.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
