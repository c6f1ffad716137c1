//! Sink — batch persistence of parsed records.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::parser::LogRecord;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write batch: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("batch rejected: {0}")]
    Rejected(String),
}

/// Durable storage for a finite batch of records.
///
/// Contract: all-or-nothing per call. On `Err` the caller must assume
/// nothing from the batch was committed; it logs and stops, it does not
/// retry. Retry and rollback policy belong behind the sink.
pub trait Sink {
    fn insert_batch(&mut self, records: &[LogRecord]) -> Result<(), SinkError>;
}

/// Writes each record as one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    /// Creates (and truncates) the destination so an unwritable path fails
    /// here rather than at commit time.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        File::create(&path)?;
        Ok(Self { path })
    }

    /// Serialize the whole batch, then publish it in one step.
    ///
    /// Serialization happens up front so a bad record aborts before any byte
    /// reaches the filesystem; the bytes are staged next to the destination
    /// and renamed into place, so a failed write never leaves a partial
    /// batch visible.
    fn commit<T: Serialize>(&self, records: &[T]) -> Result<(), SinkError> {
        let mut buf = Vec::new();
        for record in records {
            serde_json::to_writer(&mut buf, record)?;
            buf.push(b'\n');
        }

        let staging = staging_path(&self.path);
        if let Err(e) = std::fs::write(&staging, &buf) {
            let _ = std::fs::remove_file(&staging);
            return Err(e.into());
        }
        std::fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl Sink for JsonLinesSink {
    fn insert_batch(&mut self, records: &[LogRecord]) -> Result<(), SinkError> {
        self.commit(records)
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// In-memory sink, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<LogRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }
}

impl Sink for MemorySink {
    fn insert_batch(&mut self, records: &[LogRecord]) -> Result<(), SinkError> {
        self.records.extend_from_slice(records);
        Ok(())
    }
}
