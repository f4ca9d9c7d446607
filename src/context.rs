/*!
 * Boundary towards the downstream context-detection stage.
 *
 * Context detection and translation are not part of this crate. This module
 * only fixes the interface chunks are handed over through, plus an offline
 * detector so the pipeline can be exercised with no generation backend.
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::chunking::Chunk;
use crate::errors::ContextError;

/// Speed/quality selector passed to the downstream stage
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeedMode {
    /// Offline, no backend client involved
    Mock,
    #[default]
    Fast,
    Normal,
}

impl SpeedMode {
    /// Whether this mode needs a generation backend client
    pub fn requires_backend(&self) -> bool {
        !matches!(self, Self::Mock)
    }
}

impl std::fmt::Display for SpeedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Mock => "mock",
            Self::Fast => "fast",
            Self::Normal => "normal",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for SpeedMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "fast" => Ok(Self::Fast),
            "normal" => Ok(Self::Normal),
            _ => Err(anyhow::anyhow!("Invalid speed mode: {}", s)),
        }
    }
}

/// Interface the context-detection stage implements
///
/// Implementations receive the full chunk sequence and must not assume a
/// backend client exists; `SpeedMode::Mock` has to work offline.
#[async_trait]
pub trait ContextDetector: Send + Sync + Debug {
    /// Describe the setting of the subtitles (genre, tone, speakers, ...)
    async fn detect_context(&self, chunks: &[Chunk], mode: SpeedMode) -> Result<String, ContextError>;
}

/// Offline detector used for mock mode and tests
#[derive(Debug, Clone)]
pub struct MockContextDetector {
    /// Number of leading lines of dialogue quoted in the summary
    sample_lines: usize,
}

impl MockContextDetector {
    pub fn new() -> Self {
        Self { sample_lines: 3 }
    }

    pub fn with_sample_lines(sample_lines: usize) -> Self {
        Self { sample_lines }
    }
}

impl Default for MockContextDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContextDetector for MockContextDetector {
    async fn detect_context(&self, chunks: &[Chunk], mode: SpeedMode) -> Result<String, ContextError> {
        if mode.requires_backend() {
            return Err(ContextError::BackendUnavailable(mode));
        }

        let total_blocks: usize = chunks.iter().map(Vec::len).sum();
        let mut summary = format!("Mock context: {} blocks in {} chunks", total_blocks, chunks.len());

        let samples: Vec<&str> = chunks
            .iter()
            .flatten()
            .flat_map(|block| block.content().lines())
            .filter(|line| !line.trim().is_empty())
            .take(self.sample_lines)
            .collect();

        if !samples.is_empty() {
            summary.push_str(&format!(" (opening lines: {})", samples.join(" / ")));
        }

        Ok(summary)
    }
}
