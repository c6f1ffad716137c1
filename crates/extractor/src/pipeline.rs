//! Pipeline — drain a line source through the extractor into a sink.

use thiserror::Error;
use tracing::{info, warn};

use crate::conf::PipelineConfig;
use crate::parser::{LogRecordExtractor, TracingDiagnostics};
use crate::sink::{JsonLinesSink, Sink, SinkError};
use crate::source::{FileLineSource, LineSource, SourceError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("line source failed: {0}")]
    Source(#[from] SourceError),

    #[error("sink failed: {0}")]
    Sink(#[from] SinkError),
}

/// Counters for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub lines_read: usize,
    pub records_parsed: usize,
    pub lines_skipped: usize,
    pub records_inserted: usize,
}

/// Parse everything the source yields and hand the batch to the sink.
///
/// Invalid lines are warned about and skipped; only source and sink failures
/// abort the run, as distinguishable [`PipelineError`] kinds. The sink sees
/// at most one batch and is never retried here.
pub fn run<S, K>(
    extractor: &LogRecordExtractor,
    source: S,
    sink: &mut K,
) -> Result<PipelineReport, PipelineError>
where
    S: LineSource,
    K: Sink,
{
    let mut diagnostics = TracingDiagnostics::new();
    let mut records = Vec::new();
    for parsed in extractor.extract_all(source, &mut diagnostics) {
        records.push(parsed?);
    }

    let mut report = PipelineReport {
        lines_read: records.len() + diagnostics.skipped(),
        records_parsed: records.len(),
        lines_skipped: diagnostics.skipped(),
        records_inserted: 0,
    };

    if records.is_empty() {
        warn!("no records extracted, nothing to insert");
        return Ok(report);
    }

    sink.insert_batch(&records)?;
    report.records_inserted = records.len();
    info!(
        inserted = report.records_inserted,
        skipped = report.lines_skipped,
        "batch committed"
    );
    Ok(report)
}

/// Wire up the file source and JSON-lines sink named by `config` and run.
pub fn run_from_config(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    let extractor = LogRecordExtractor::new();
    let source = FileLineSource::open(&config.access_log_path)?;
    let mut sink = JsonLinesSink::create(&config.output_path)?;
    run(&extractor, source, &mut sink)
}
