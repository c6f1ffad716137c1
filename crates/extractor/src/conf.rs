//! Conf — pipeline configuration: TOML file, env overrides, validation.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Access log to read.
    pub access_log_path: String,
    /// JSON-lines file the parsed batch is written to.
    pub output_path: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            access_log_path: "access.log".to_string(),
            output_path: "records.jsonl".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var("EXTRACTOR_CONFIG_FILE")
            .unwrap_or_else(|_| "/etc/extractor/extractor.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!(
                "Config file not found at {}, using environment variables",
                config_path
            );
            Self::from_env()
        };

        // Environment variables override file config
        if let Ok(log) = std::env::var("EXTRACTOR_ACCESS_LOG") {
            config.access_log_path = log;
        }
        if let Ok(out) = std::env::var("EXTRACTOR_OUTPUT") {
            config.output_path = out;
        }

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: PipelineConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        Self {
            access_log_path: std::env::var("EXTRACTOR_ACCESS_LOG")
                .unwrap_or_else(|_| "access.log".to_string()),
            output_path: std::env::var("EXTRACTOR_OUTPUT")
                .unwrap_or_else(|_| "records.jsonl".to_string()),
        }
    }

    /// Validate configuration values are sane
    pub fn validate(&self) -> Result<(), String> {
        if self.access_log_path.is_empty() {
            return Err("access_log_path must not be empty".to_string());
        }
        if self.output_path.is_empty() {
            return Err("output_path must not be empty".to_string());
        }
        Ok(())
    }
}
