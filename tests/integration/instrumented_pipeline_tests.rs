/*!
 * Pipeline behaviour observed through an instrumented filesystem
 */

use std::path::Path;

use anyhow::Result;

use srt_ingest::errors::{GrammarError, IngestError, ParsingError, ValidationError};
use srt_ingest::srt_grammar::{SrtGrammar, SrtRecord, SubtitleGrammar};
use srt_ingest::validator::MAX_FILE_SIZE_BYTES;
use srt_ingest::SubtitleParser;
use crate::common::{self, InstrumentedFileSystem};

/// Grammar that rejects everything, standing in for a failing parser library
#[derive(Debug)]
struct RejectingGrammar;

impl SubtitleGrammar for RejectingGrammar {
    fn parse(&self, _text: &str) -> Result<Vec<SrtRecord>, GrammarError> {
        Err(GrammarError::ExpectedIndex { line: 1, found: "?".to_string() })
    }
}

#[tokio::test]
async fn test_parseSrt_withOversizedFile_shouldNeverReadContent() {
    let fs = InstrumentedFileSystem::new().with_reported_size("movie.srt", MAX_FILE_SIZE_BYTES + 1);
    let parser = SubtitleParser::with_components(fs, SrtGrammar::new());

    let err = parser.parse_srt("movie.srt", 10).await.unwrap_err();

    assert!(matches!(err, IngestError::Validation(ValidationError::TooLarge { .. })));
    assert_eq!(parser.file_system().stat_calls(), 1);
    assert_eq!(parser.file_system().read_calls(), 0);
}

#[tokio::test]
async fn test_parseSrt_withZeroChunkSize_shouldNotTouchFileSystem() {
    let fs = InstrumentedFileSystem::new().with_file("movie.srt", common::sample_srt(2));
    let parser = SubtitleParser::with_components(fs, SrtGrammar::new());

    let err = parser.parse_srt("movie.srt", 0).await.unwrap_err();

    assert!(matches!(err, IngestError::Validation(ValidationError::InvalidChunkSize(0))));
    assert_eq!(parser.file_system().stat_calls(), 0);
    assert_eq!(parser.file_system().read_calls(), 0);
}

#[tokio::test]
async fn test_parseSrt_withFileVanishingAfterValidation_shouldReportParsingError() {
    let fs = InstrumentedFileSystem::new()
        .with_file("race.srt", common::sample_srt(2))
        .vanishing_before_read("race.srt");
    let parser = SubtitleParser::with_components(fs, SrtGrammar::new());

    let err = parser.parse_srt("race.srt", 10).await.unwrap_err();

    match err {
        IngestError::Parsing(ParsingError::FileNotFound { path }) => assert_eq!(path, Path::new("race.srt")),
        other => panic!("Expected FileNotFound parsing error, got {:?}", other),
    }
    assert_eq!(parser.file_system().stat_calls(), 1);
    assert_eq!(parser.file_system().read_calls(), 1);
}

#[tokio::test]
async fn test_parseSrt_withFileGrowingAfterValidation_shouldReportReadError() {
    let grown = vec![b'x'; MAX_FILE_SIZE_BYTES as usize + 1];
    let fs = InstrumentedFileSystem::new().with_stale_size("growing.srt", 64, grown);
    let parser = SubtitleParser::with_components(fs, SrtGrammar::new());

    let err = parser.parse_srt("growing.srt", 10).await.unwrap_err();

    match err {
        IngestError::Parsing(ParsingError::Read { path, source }) => {
            assert_eq!(path, Path::new("growing.srt"));
            assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
        }
        other => panic!("Expected Read parsing error, got {:?}", other),
    }
    assert_eq!(parser.file_system().read_calls(), 1);
}

#[tokio::test]
async fn test_readBlocks_withLocalFileOverLimit_shouldReportReadError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = vec![b'x'; MAX_FILE_SIZE_BYTES as usize + 10];
    let path = common::create_test_file(temp_dir.path(), "huge.srt", content)?;

    let err = SubtitleParser::new().read_blocks(&path).await.unwrap_err();

    assert!(matches!(err, ParsingError::Read { .. }));
    Ok(())
}

#[tokio::test]
async fn test_parseSrt_withFailingGrammar_shouldWrapAsParsingError() {
    let fs = InstrumentedFileSystem::new().with_file("movie.srt", common::sample_srt(2));
    let parser = SubtitleParser::with_components(fs, RejectingGrammar);

    let err = parser.parse_srt("movie.srt", 10).await.unwrap_err();

    assert!(matches!(err, IngestError::Parsing(ParsingError::Grammar { .. })));
}

#[tokio::test]
async fn test_parseSrt_withValidFile_shouldStatOnceAndReadOnce() {
    let fs = InstrumentedFileSystem::new().with_file("movie.srt", common::sample_srt(7));
    let parser = SubtitleParser::with_components(fs, SrtGrammar::new());

    let chunks = parser.parse_srt("movie.srt", 3).await.unwrap();

    assert_eq!(chunks.iter().map(Vec::len).collect::<Vec<_>>(), vec![3, 3, 1]);
    assert_eq!(parser.file_system().stat_calls(), 1);
    assert_eq!(parser.file_system().read_calls(), 1);
}

#[tokio::test]
async fn test_readBlocks_withInvertedRange_shouldKeepBlockUnchanged() {
    let text = "1\n00:00:05,000 --> 00:00:01,000\nBackwards\n";
    let fs = InstrumentedFileSystem::new().with_file("odd.srt", text);
    let parser = SubtitleParser::with_components(fs, SrtGrammar::new());

    let blocks = parser.read_blocks(Path::new("odd.srt")).await.unwrap();

    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].end() < blocks[0].start());
}
