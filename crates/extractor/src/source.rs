//! Source — line sources feeding the extractor.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open log source {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to read from log source: {0}")]
    Read(#[from] std::io::Error),
}

/// Ordered, finite supply of raw text lines.
///
/// Implementations own the underlying resource; the extractor only consumes
/// what it is given and never opens, seeks, or closes anything itself.
pub trait LineSource {
    /// Next line with its line terminator stripped; `Ok(None)` once drained.
    fn next_line(&mut self) -> Result<Option<String>, SourceError>;
}

/// Buffered reader over an access-log file on disk.
#[derive(Debug)]
pub struct FileLineSource {
    reader: BufReader<File>,
}

impl FileLineSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            reader: BufReader::new(file),
        })
    }
}

impl LineSource for FileLineSource {
    fn next_line(&mut self) -> Result<Option<String>, SourceError> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }
}

/// In-memory line source, for tests and embedding.
pub struct MemoryLineSource {
    lines: std::vec::IntoIter<String>,
}

impl MemoryLineSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        Self {
            lines: lines.into_iter(),
        }
    }
}

impl LineSource for MemoryLineSource {
    fn next_line(&mut self) -> Result<Option<String>, SourceError> {
        Ok(self.lines.next())
    }
}
