/*!
 * # srt-ingest - Subtitle ingestion for batched translation
 *
 * Validates an SRT subtitle file, parses it into structured blocks and
 * partitions the blocks into bounded-size chunks for a downstream
 * translation stage.
 *
 * ## Pipeline
 *
 * 1. Validation: chunk size, path, extension, accessibility and size,
 *    checked from metadata before any content is read
 * 2. Parsing: lossy UTF-8 decoding and grammar parsing into `SubtitleBlock`s
 * 3. Chunking: contiguous, order-preserving groups of at most N blocks
 *
 * Failures are reported as `IngestError`, which is either a
 * `ValidationError` or a `ParsingError`.
 *
 * ## Architecture
 *
 * - `validator`: Pre-parse input checks
 * - `subtitle_processor`: Block type and the ingestion pipeline
 * - `srt_grammar`: Grammar parser seam and the bundled SRT grammar
 * - `chunking`: Positional chunking
 * - `file_utils`: Filesystem seam
 * - `context`: Interface towards the context-detection stage
 * - `app_config`: Configuration for the inspection binary
 * - `errors`: Error types
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod chunking;
pub mod context;
pub mod errors;
pub mod file_utils;
pub mod srt_grammar;
pub mod subtitle_processor;
pub mod validator;

// Re-export main types for easier usage
pub use app_config::Config;
pub use chunking::{Chunk, chunk_blocks};
pub use context::{ContextDetector, MockContextDetector, SpeedMode};
pub use errors::{ContextError, GrammarError, IngestError, ParsingError, ValidationError};
pub use srt_grammar::{SrtGrammar, SrtRecord, SubtitleGrammar};
pub use subtitle_processor::{SubtitleBlock, SubtitleParser, parse_srt};
