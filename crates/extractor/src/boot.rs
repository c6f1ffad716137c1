//! Boot — logging init and configuration load.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::PipelineConfig;

/// Initialise the tracing / logging subsystem.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "extractor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load and validate the pipeline configuration.
pub fn boot() -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    let config = PipelineConfig::load()?;
    config.validate()?;
    info!(
        "Loaded configuration: access_log={} output={}",
        config.access_log_path, config.output_path
    );
    Ok(config)
}
