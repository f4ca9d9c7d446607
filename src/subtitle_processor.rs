use std::fmt;
use std::io;
use std::path::Path;
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Serialize, Serializer};

use crate::chunking::{Chunk, chunk_blocks};
use crate::errors::{IngestError, ParsingError};
use crate::file_utils::{FileSystem, LocalFileSystem};
use crate::srt_grammar::{SrtGrammar, SrtRecord, SubtitleGrammar};
use crate::validator::{validate_chunk_size, validate_subtitle_file, MAX_FILE_SIZE_BYTES};

// @module: Subtitle ingestion: validate, parse, map and chunk

// @struct: Single subtitle block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleBlock {
    // @field: Index as declared in the source file
    index: u64,

    // @field: Start offset
    #[serde(rename = "start_ms", serialize_with = "serialize_millis")]
    start: Duration,

    // @field: End offset
    #[serde(rename = "end_ms", serialize_with = "serialize_millis")]
    end: Duration,

    // @field: Source text, possibly multi-line
    content: String,

    // @field: Filled in by the translation stage
    translated_content: Option<String>,
}

impl SubtitleBlock {
    /// Creates an untranslated block
    pub fn new(index: u64, start: Duration, end: Duration, content: String) -> Self {
        SubtitleBlock {
            index,
            start,
            end,
            content,
            translated_content: None,
        }
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn start(&self) -> Duration {
        self.start
    }

    pub fn end(&self) -> Duration {
        self.end
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Translation attached downstream, `None` until then
    pub fn translated_content(&self) -> Option<&str> {
        self.translated_content.as_deref()
    }

    /// Attach a translation in place
    pub fn set_translated_content(&mut self, translated: String) {
        self.translated_content = Some(translated);
    }

    /// Format a duration as an SRT timestamp (HH:MM:SS,mmm)
    pub fn format_timestamp(offset: Duration) -> String {
        let ms = offset.as_millis();
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl From<SrtRecord> for SubtitleBlock {
    fn from(record: SrtRecord) -> Self {
        SubtitleBlock::new(record.index, record.start, record.end, record.content)
    }
}

impl fmt::Display for SubtitleBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", Self::format_timestamp(self.start), Self::format_timestamp(self.end))?;
        writeln!(f, "{}", self.translated_content.as_deref().unwrap_or(&self.content))?;
        writeln!(f)
    }
}

fn serialize_millis<S: Serializer>(offset: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(offset.as_millis()).unwrap_or(u64::MAX))
}

/// Ingestion pipeline over a filesystem and a grammar parser
///
/// Holds no per-call state; one parser can serve any number of concurrent
/// calls on different files.
#[derive(Debug, Default)]
pub struct SubtitleParser<F = LocalFileSystem, G = SrtGrammar> {
    fs: F,
    grammar: G,
}

impl SubtitleParser {
    /// Parser reading from local disk with the bundled SRT grammar
    pub fn new() -> Self {
        SubtitleParser {
            fs: LocalFileSystem,
            grammar: SrtGrammar::new(),
        }
    }
}

impl<F: FileSystem, G: SubtitleGrammar> SubtitleParser<F, G> {
    pub fn with_components(fs: F, grammar: G) -> Self {
        SubtitleParser { fs, grammar }
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Validate, parse and chunk the subtitle file at `path`
    ///
    /// Returns an empty list when the file holds no subtitle blocks.
    pub async fn parse_srt<P: AsRef<Path>>(
        &self,
        path: P,
        chunk_max_blocks: usize,
    ) -> Result<Vec<Chunk>, IngestError> {
        let path = path.as_ref();
        let chunk_max_blocks = validate_chunk_size(chunk_max_blocks)?;
        validate_subtitle_file(&self.fs, path).await?;

        let blocks = self.read_blocks(path).await?;
        if blocks.is_empty() {
            info!("No subtitle blocks found in {}", path.display());
            return Ok(Vec::new());
        }

        let total_blocks = blocks.len();
        let chunks = chunk_blocks(blocks, chunk_max_blocks);
        info!("Parsed {} blocks from {} into {} chunks",
              total_blocks, path.display(), chunks.len());
        Ok(chunks)
    }

    /// Read and parse a file that already passed validation
    pub async fn read_blocks(&self, path: &Path) -> Result<Vec<SubtitleBlock>, ParsingError> {
        let bytes = self.fs.read(path).await.map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ParsingError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => ParsingError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());

        // The file may have grown between the metadata query and the read
        if bytes.len() as u64 > MAX_FILE_SIZE_BYTES {
            return Err(ParsingError::Read {
                path: path.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("file grew past the {} byte limit after validation", MAX_FILE_SIZE_BYTES),
                ),
            });
        }

        let text = String::from_utf8_lossy(&bytes);
        let records = self
            .grammar
            .parse(&text)
            .map_err(|source| ParsingError::Grammar {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(map_records(records))
    }
}

// @maps: Grammar records to blocks, 1:1 and in order
fn map_records(records: Vec<SrtRecord>) -> Vec<SubtitleBlock> {
    let blocks: Vec<SubtitleBlock> = records.into_iter().map(SubtitleBlock::from).collect();

    let inverted = blocks.iter().filter(|block| block.end < block.start).count();
    if inverted > 0 {
        warn!("Found {} subtitle blocks ending before they start", inverted);
    }

    blocks
}

/// Validate, parse and chunk an SRT file from local disk
pub async fn parse_srt<P: AsRef<Path>>(
    path: P,
    chunk_max_blocks: usize,
) -> Result<Vec<Chunk>, IngestError> {
    SubtitleParser::new().parse_srt(path, chunk_max_blocks).await
}
