/*!
 * Pre-parse validation of subtitle input files.
 *
 * Every check here runs before a single byte of content is read. The size
 * bound is enforced from metadata alone so oversized input is never decoded.
 */

use std::num::NonZeroUsize;
use std::path::Path;

use log::debug;

use crate::errors::ValidationError;
use crate::file_utils::{FileManager, FileSystem};

/// Accepted subtitle file extension
pub const SUBTITLE_EXTENSION: &str = "srt";

/// Maximum accepted file size in megabytes
pub const MAX_FILE_SIZE_MB: u64 = 2;

/// Maximum accepted file size in bytes
pub const MAX_FILE_SIZE_BYTES: u64 = MAX_FILE_SIZE_MB * 1024 * 1024;

/// Reject a zero chunk size before any I/O happens
pub fn validate_chunk_size(chunk_max_blocks: usize) -> Result<NonZeroUsize, ValidationError> {
    NonZeroUsize::new(chunk_max_blocks).ok_or(ValidationError::InvalidChunkSize(chunk_max_blocks))
}

/// Check path, extension, accessibility and size of a candidate file
///
/// Performs a single metadata query through `fs` and returns the file size
/// on success.
pub async fn validate_subtitle_file<F>(fs: &F, path: &Path) -> Result<u64, ValidationError>
where
    F: FileSystem + ?Sized,
{
    if path.as_os_str().is_empty() {
        return Err(ValidationError::MissingPath);
    }

    if !FileManager::has_extension(path, SUBTITLE_EXTENSION) {
        return Err(ValidationError::InvalidExtension {
            path: path.to_path_buf(),
        });
    }

    let stat = fs
        .stat(path)
        .await
        .map_err(|source| ValidationError::Inaccessible {
            path: path.to_path_buf(),
            source,
        })?;

    if !stat.is_file {
        return Err(ValidationError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    if stat.len > MAX_FILE_SIZE_BYTES {
        return Err(ValidationError::TooLarge {
            path: path.to_path_buf(),
            size: stat.len,
        });
    }

    if stat.len == 0 {
        return Err(ValidationError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!("Validated {} ({} bytes)", path.display(), stat.len);
    Ok(stat.len)
}
