use async_trait::async_trait;
use std::fmt::Debug;
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::validator::MAX_FILE_SIZE_BYTES;

// @module: File system access for subtitle ingestion

// @struct: Metadata the validator needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    // @field: Size in bytes
    pub len: u64,

    // @field: Regular file (not a directory, socket, ...)
    pub is_file: bool,
}

/// Narrow filesystem seam used by the ingestion pipeline
///
/// The pipeline performs exactly two kinds of I/O: one metadata query during
/// validation and one full read during parsing. Keeping them behind a trait
/// lets tests observe and fault-inject both without touching a real disk.
#[async_trait]
pub trait FileSystem: Send + Sync + Debug {
    /// Query size and type of the file at `path` without reading content
    async fn stat(&self, path: &Path) -> io::Result<FileStat>;

    /// Read the whole file at `path`
    ///
    /// Implementations must release any handle they open before returning,
    /// on success and on failure alike. Content past the validator's size
    /// limit may be cut short; callers check the returned length.
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

// @struct: Local disk access through tokio
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = tokio::fs::metadata(path).await?;
        Ok(FileStat {
            len: metadata.len(),
            is_file: metadata.is_file(),
        })
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        {
            // Handle is dropped at the end of this block on every path
            let mut file = File::open(path).await?;
            // One byte past the limit is enough to tell the file grew after stat
            (&mut file).take(MAX_FILE_SIZE_BYTES + 1).read_to_end(&mut buffer).await?;
        }
        Ok(buffer)
    }
}

// @struct: File name helpers
pub struct FileManager;

impl FileManager {
    // @checks: Path ends with `.{extension}`, ignoring ASCII case
    // @note: Compares the whole path string so a bare ".srt" name also matches
    pub fn has_extension<P: AsRef<Path>>(path: P, extension: &str) -> bool {
        let normalized_ext = if extension.starts_with('.') {
            extension.to_lowercase()
        } else {
            format!(".{}", extension.to_lowercase())
        };

        path.as_ref()
            .to_string_lossy()
            .to_lowercase()
            .ends_with(&normalized_ext)
    }
}
