// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use srt_ingest::app_config::{Config, LogLevel};
use srt_ingest::{Chunk, ContextDetector, MockContextDetector, SpeedMode, SubtitleParser};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for SpeedMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSpeedMode {
    Mock,
    Fast,
    Normal,
}

impl From<CliSpeedMode> for SpeedMode {
    fn from(cli_mode: CliSpeedMode) -> Self {
        match cli_mode {
            CliSpeedMode::Mock => SpeedMode::Mock,
            CliSpeedMode::Fast => SpeedMode::Fast,
            CliSpeedMode::Normal => SpeedMode::Normal,
        }
    }
}

/// srt-ingest - validate, parse and chunk SRT subtitle files
#[derive(Parser, Debug)]
#[command(name = "srt-ingest")]
#[command(version)]
#[command(about = "Validate, parse and chunk an SRT subtitle file")]
#[command(long_about = "Runs the ingestion stage of the translation pipeline on one SRT file and
reports the resulting chunks.

EXAMPLES:
    srt-ingest movie.srt                       # Summarise chunks using conf.json
    srt-ingest -n 10 movie.srt                 # At most 10 blocks per chunk
    srt-ingest --speed-mode mock movie.srt     # Also run offline context detection
    srt-ingest --json movie.srt > chunks.json  # Dump chunks as JSON")]
struct CommandLineOptions {
    /// SRT file to ingest
    #[arg(value_name = "FILE")]
    input_path: PathBuf,

    /// Maximum number of subtitle blocks per chunk
    #[arg(short = 'n', long)]
    chunk_max_blocks: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Mode for the context-detection stage
    #[arg(short, long, value_enum)]
    speed_mode: Option<CliSpeedMode>,

    /// Print chunks as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("\nError: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Start at info; the configured level is applied once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let options = CommandLineOptions::parse();

    let mut config = Config::load_or_default(&options.config_path)?;
    if let Some(level) = options.log_level {
        config.log_level = level.into();
    }
    if let Some(mode) = options.speed_mode {
        config.speed_mode = mode.into();
    }
    if let Some(chunk_max_blocks) = options.chunk_max_blocks {
        config.chunk_max_blocks = chunk_max_blocks;
    }
    log::set_max_level(config.log_level.into());

    info!("Ingesting {} with mode '{}'", options.input_path.display(), config.speed_mode);

    let parser = SubtitleParser::new();
    let chunks = parser
        .parse_srt(&options.input_path, config.chunk_max_blocks)
        .await
        .with_context(|| format!("Ingestion failed for {}", options.input_path.display()))?;
    info!("Parsed {} chunks.", chunks.len());

    if options.json {
        println!("{}", serde_json::to_string_pretty(&chunks)?);
    } else {
        print_summary(&chunks);
    }

    if config.speed_mode.requires_backend() {
        warn!("No generation backend is available in this tool; skipping context detection for '{}' mode",
              config.speed_mode);
        return Ok(());
    }

    let detector = MockContextDetector::new();
    let context = detector.detect_context(&chunks, config.speed_mode).await?;
    println!("\nDetected Context: {}", context);

    Ok(())
}

fn print_summary(chunks: &[Chunk]) {
    if chunks.is_empty() {
        println!("No subtitle blocks found; nothing to translate.");
        return;
    }

    for (i, chunk) in chunks.iter().enumerate() {
        let first = chunk.first().map(|block| block.index()).unwrap_or_default();
        let last = chunk.last().map(|block| block.index()).unwrap_or_default();
        println!("Chunk {:>3}: {:>4} blocks (indices {}..={})", i + 1, chunk.len(), first, last);
    }
}
