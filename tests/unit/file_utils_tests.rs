/*!
 * Tests for file utility functions
 */

use std::io;

use anyhow::Result;
use srt_ingest::file_utils::{FileManager, FileSystem, LocalFileSystem};
use srt_ingest::validator::MAX_FILE_SIZE_BYTES;
use crate::common;

#[test]
fn test_hasExtension_withMixedCase_shouldMatch() {
    assert!(FileManager::has_extension("movie.srt", "srt"));
    assert!(FileManager::has_extension("MOVIE.SRT", "srt"));
    assert!(FileManager::has_extension("dir/Movie.Srt", ".srt"));
}

#[test]
fn test_hasExtension_withOtherExtensions_shouldNotMatch() {
    assert!(!FileManager::has_extension("notes.txt", "srt"));
    assert!(!FileManager::has_extension("movie.srt.bak", "srt"));
    assert!(!FileManager::has_extension("moviesrt", "srt"));
}

#[tokio::test]
async fn test_localFileSystem_stat_withExistingFile_shouldReportSize() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "sized.srt", "12345")?;

    let stat = LocalFileSystem.stat(&path).await?;

    assert_eq!(stat.len, 5);
    assert!(stat.is_file);
    Ok(())
}

#[tokio::test]
async fn test_localFileSystem_stat_withDirectory_shouldNotBeFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let stat = LocalFileSystem.stat(temp_dir.path()).await?;

    assert!(!stat.is_file);
    Ok(())
}

#[tokio::test]
async fn test_localFileSystem_read_withExistingFile_shouldReturnBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bytes.srt", [0xffu8, b'a', b'b'])?;

    let bytes = LocalFileSystem.read(&path).await?;

    assert_eq!(bytes, vec![0xff, b'a', b'b']);
    Ok(())
}

#[tokio::test]
async fn test_localFileSystem_read_withMissingFile_shouldReturnNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let err = LocalFileSystem.read(&temp_dir.path().join("missing.srt")).await.unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::NotFound);
    Ok(())
}

#[tokio::test]
async fn test_localFileSystem_read_withFileOverLimit_shouldStopOneBytePastLimit() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = vec![b'x'; MAX_FILE_SIZE_BYTES as usize + 10];
    let path = common::create_test_file(temp_dir.path(), "huge.srt", content)?;

    let bytes = LocalFileSystem.read(&path).await?;

    assert_eq!(bytes.len() as u64, MAX_FILE_SIZE_BYTES + 1);
    Ok(())
}
