use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::context::SpeedMode;

/// Application configuration module
/// This module handles loading and validating the settings used by the
/// ingestion binary. The library pipeline itself takes plain arguments and
/// never reads configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Maximum number of subtitle blocks per chunk
    #[serde(default = "default_chunk_max_blocks")]
    pub chunk_max_blocks: usize,

    /// Mode handed to the context-detection stage
    #[serde(default)]
    pub speed_mode: SpeedMode,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_chunk_max_blocks() -> usize {
    50
}

impl Config {
    /// Load the configuration from a JSON file, falling back to defaults
    /// when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.chunk_max_blocks == 0 {
            return Err(anyhow!("chunk_max_blocks must be greater than zero"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            chunk_max_blocks: default_chunk_max_blocks(),
            speed_mode: SpeedMode::default(),
            log_level: LogLevel::default(),
        }
    }
}
