use extractor::{boot, pipeline};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let config = boot::boot()?;
    let report = pipeline::run_from_config(&config)?;
    info!(
        "Run complete: read={} parsed={} skipped={} inserted={}",
        report.lines_read, report.records_parsed, report.lines_skipped, report.records_inserted
    );
    Ok(())
}
