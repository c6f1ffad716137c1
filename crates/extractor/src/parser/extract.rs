//! Extract — LogRecordExtractor and the lazy extraction iterator.

use tracing::warn;

use super::grammar::AccessLogGrammar;
use super::model::{LogRecord, ParseError};
use crate::source::{LineSource, SourceError};

/// Receives per-line skip reports during extraction.
///
/// This replaces process-global log state: callers pass in the diagnostic
/// sink they want, tests pass a recording one.
pub trait DiagnosticSink {
    /// Called once for every input line that produced no record.
    fn line_skipped(&mut self, line_number: usize, error: &ParseError);
}

/// Default diagnostic sink: one tracing warning per skipped line.
#[derive(Debug, Default)]
pub struct TracingDiagnostics {
    skipped: usize,
}

impl TracingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of skipped lines reported so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl DiagnosticSink for TracingDiagnostics {
    fn line_skipped(&mut self, line_number: usize, error: &ParseError) {
        self.skipped += 1;
        warn!(line_number, %error, "skipping invalid log line");
    }
}

/// Stateless per-line transformer from raw access-log text to [`LogRecord`]s.
///
/// The only held state is the compiled grammar, immutable after
/// construction; independent parses may share one extractor across threads.
#[derive(Debug, Default)]
pub struct LogRecordExtractor {
    grammar: AccessLogGrammar,
}

impl LogRecordExtractor {
    pub fn new() -> Self {
        Self {
            grammar: AccessLogGrammar::new(),
        }
    }

    /// Parse a single line against the fixed grammar.
    pub fn parse_line(&self, line: &str) -> Result<LogRecord, ParseError> {
        self.grammar.parse_line(line)
    }

    /// Lazily extract records from `source`, preserving input order.
    ///
    /// Lines that fail to parse are reported to `diagnostics` and skipped;
    /// only a source read failure surfaces as an iterator item. Single pass:
    /// once the source is drained the iterator stays exhausted.
    pub fn extract_all<'a, S, D>(&'a self, source: S, diagnostics: &'a mut D) -> ExtractAll<'a, S, D>
    where
        S: LineSource,
        D: DiagnosticSink,
    {
        ExtractAll {
            extractor: self,
            source,
            diagnostics,
            line_number: 0,
            done: false,
        }
    }
}

/// Iterator returned by [`LogRecordExtractor::extract_all`].
pub struct ExtractAll<'a, S, D> {
    extractor: &'a LogRecordExtractor,
    source: S,
    diagnostics: &'a mut D,
    line_number: usize,
    done: bool,
}

impl<S, D> Iterator for ExtractAll<'_, S, D>
where
    S: LineSource,
    D: DiagnosticSink,
{
    type Item = Result<LogRecord, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let line = match self.source.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };
            self.line_number += 1;

            match self.extractor.parse_line(&line) {
                Ok(record) => return Some(Ok(record)),
                Err(error) => self.diagnostics.line_skipped(self.line_number, &error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryLineSource;

    /// Records every skip report instead of logging it.
    #[derive(Default)]
    struct RecordingDiagnostics {
        skips: Vec<(usize, String)>,
    }

    impl DiagnosticSink for RecordingDiagnostics {
        fn line_skipped(&mut self, line_number: usize, error: &ParseError) {
            self.skips.push((line_number, error.to_string()));
        }
    }

    /// Fails after yielding its lines, simulating a truncated read.
    struct FailingSource {
        lines: Vec<String>,
    }

    impl LineSource for FailingSource {
        fn next_line(&mut self) -> Result<Option<String>, SourceError> {
            if self.lines.is_empty() {
                Err(SourceError::Read(std::io::Error::other("stream reset")))
            } else {
                Ok(Some(self.lines.remove(0)))
            }
        }
    }

    fn valid_line(ip: &str, url: &str) -> String {
        format!(
            "{ip} - - [10/Oct/2023:13:55:36 -0700] \"GET {url} HTTP/1.1\" 200 2326 \"-\" \"Mozilla/5.0 (Windows NT 10.0; Win64; x64)\""
        )
    }

    #[test]
    fn test_extract_all_preserves_input_order() {
        let extractor = LogRecordExtractor::new();
        let source = MemoryLineSource::new([
            valid_line("10.0.0.1", "/a"),
            valid_line("10.0.0.2", "/b"),
            valid_line("10.0.0.3", "/c"),
        ]);
        let mut diagnostics = RecordingDiagnostics::default();

        let urls: Vec<String> = extractor
            .extract_all(source, &mut diagnostics)
            .map(|r| r.expect("no source errors").url)
            .collect();

        assert_eq!(urls, vec!["/a", "/b", "/c"]);
        assert!(diagnostics.skips.is_empty());
    }

    #[test]
    fn test_invalid_lines_are_skipped_and_reported() {
        let extractor = LogRecordExtractor::new();
        let source = MemoryLineSource::new([
            valid_line("10.0.0.1", "/a"),
            "not an access log line".to_string(),
            "10.0.0.9 - - [10/Okt/2023:13:55:36 -0700] \"GET /bad HTTP/1.1\" 200 1 \"-\" \"curl\"".to_string(),
            valid_line("10.0.0.2", "/b"),
        ]);
        let mut diagnostics = RecordingDiagnostics::default();

        let records: Vec<LogRecord> = extractor
            .extract_all(source, &mut diagnostics)
            .map(|r| r.expect("no source errors"))
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ip_address, "10.0.0.1");
        assert_eq!(records[1].ip_address, "10.0.0.2");

        // One report per bad line, with 1-based line numbers
        assert_eq!(diagnostics.skips.len(), 2);
        assert_eq!(diagnostics.skips[0].0, 2);
        assert_eq!(diagnostics.skips[1].0, 3);
        assert!(diagnostics.skips[1].1.contains("timestamp"), "got: {}", diagnostics.skips[1].1);
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        let extractor = LogRecordExtractor::new();
        let source = MemoryLineSource::new(Vec::<String>::new());
        let mut diagnostics = RecordingDiagnostics::default();

        assert_eq!(extractor.extract_all(source, &mut diagnostics).count(), 0);
    }

    #[test]
    fn test_source_error_surfaces_and_ends_iteration() {
        let extractor = LogRecordExtractor::new();
        let source = FailingSource {
            lines: vec![valid_line("10.0.0.1", "/a")],
        };
        let mut diagnostics = RecordingDiagnostics::default();
        let mut iter = extractor.extract_all(source, &mut diagnostics);

        assert!(iter.next().expect("first item").is_ok());
        assert!(iter.next().expect("second item").is_err());
        assert!(iter.next().is_none(), "iterator must stay exhausted after the error");
    }

    #[test]
    fn test_tracing_diagnostics_counts_skips() {
        let extractor = LogRecordExtractor::new();
        let source = MemoryLineSource::new(["garbage one", "garbage two"]);
        let mut diagnostics = TracingDiagnostics::new();

        let records: Vec<_> = extractor.extract_all(source, &mut diagnostics).collect();
        assert!(records.is_empty());
        assert_eq!(diagnostics.skipped(), 2);
    }
}
