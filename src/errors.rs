/*!
 * Error types for the srt-ingest library.
 *
 * The ingestion pipeline reports exactly two kinds of failure across its
 * public boundary:
 * - `ValidationError`: the input was rejected before any content was read
 * - `ParsingError`: validation passed but reading or parsing the content failed
 *
 * Both are wrapped by `IngestError`, so callers only ever match on two cases.
 * All types use the thiserror crate for ergonomic error definitions.
 */

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::context::SpeedMode;
use crate::validator::MAX_FILE_SIZE_MB;

/// Errors raised before any subtitle content is parsed
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The caller asked for chunks of zero blocks
    #[error("Chunk size must be a positive number of blocks, got {0}.")]
    InvalidChunkSize(usize),

    /// No path was given
    #[error("No file path was provided.")]
    MissingPath,

    /// The path does not carry the `.srt` extension
    #[error("Invalid file type. Only .srt files are accepted.")]
    InvalidExtension {
        /// Rejected path
        path: PathBuf,
    },

    /// The file metadata could not be read
    #[error("Could not access file: {source}")]
    Inaccessible {
        /// Path that failed the metadata query
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The path exists but is a directory or another non-regular file
    #[error("Not a regular file: {}", .path.display())]
    NotAFile {
        /// Rejected path
        path: PathBuf,
    },

    /// The file is larger than the accepted maximum
    #[error("File size exceeds the limit of {}MB.", MAX_FILE_SIZE_MB)]
    TooLarge {
        /// Rejected path
        path: PathBuf,
        /// Size reported by the filesystem, in bytes
        size: u64,
    },

    /// The file has no bytes at all
    #[error("File is empty.")]
    Empty {
        /// Rejected path
        path: PathBuf,
    },
}

/// Grammar violations reported by a subtitle grammar parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A block did not start with its numeric index
    #[error("line {line}: expected subtitle index, found '{found}'")]
    ExpectedIndex { line: usize, found: String },

    /// The line after the index is not a timing line
    #[error("line {line}: expected timing line 'HH:MM:SS,mmm --> HH:MM:SS,mmm', found '{found}'")]
    ExpectedTiming { line: usize, found: String },

    /// A timing line matched the shape but its value overflows
    #[error("line {line}: invalid timestamp '{value}'")]
    InvalidTimestamp { line: usize, value: String },

    /// The input ended in the middle of a block
    #[error("line {line}: block {index} ends before its timing line")]
    Truncated { line: usize, index: u64 },
}

/// Errors raised after validation passed, while reading or parsing content
#[derive(Error, Debug)]
pub enum ParsingError {
    /// The file disappeared between validation and read
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path that vanished
        path: PathBuf,
    },

    /// Any other failure while reading the file
    #[error("Failed to read SRT file '{}': {source}", .path.display())]
    Read {
        /// Path being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The grammar parser rejected the decoded content
    #[error("Failed to parse SRT file '{}': {source}", .path.display())]
    Grammar {
        /// Path being parsed
        path: PathBuf,
        /// Grammar violation
        #[source]
        source: GrammarError,
    },
}

impl ParsingError {
    /// Path of the file that failed to parse
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::FileNotFound { path } => path,
            Self::Read { path, .. } => path,
            Self::Grammar { path, .. } => path,
        }
    }
}

/// Top-level error returned by the ingestion pipeline
#[derive(Error, Debug)]
pub enum IngestError {
    /// Input rejected before parsing
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Content could not be read or parsed
    #[error(transparent)]
    Parsing(#[from] ParsingError),
}

impl IngestError {
    /// True when the caller can recover by fixing the input file or arguments
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Errors reported by a downstream context detector
#[derive(Error, Debug)]
pub enum ContextError {
    /// The requested mode needs a generation backend that is not available
    #[error("No generation backend available for '{0}' mode")]
    BackendUnavailable(SpeedMode),

    /// The detector ran but could not produce a context
    #[error("Context detection failed: {0}")]
    Detection(String),
}
