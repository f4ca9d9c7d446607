/*!
 * Positional chunking of subtitle blocks.
 *
 * Blocks are split into contiguous groups of a fixed maximum size. Every
 * group except possibly the last holds exactly the maximum; the order of
 * blocks is never changed. Chunk boundaries are a batching concern, so no
 * attempt is made to split on sentence or scene boundaries.
 */

use std::num::NonZeroUsize;

use log::{debug, error};

use crate::subtitle_processor::SubtitleBlock;

/// A contiguous, order-preserving group of subtitle blocks
pub type Chunk = Vec<SubtitleBlock>;

/// Number of chunks `total_blocks` will be split into
pub fn chunk_count(total_blocks: usize, chunk_max_blocks: NonZeroUsize) -> usize {
    total_blocks.div_ceil(chunk_max_blocks.get())
}

/// Split blocks into chunks of at most `chunk_max_blocks` entries
pub fn chunk_blocks(blocks: Vec<SubtitleBlock>, chunk_max_blocks: NonZeroUsize) -> Vec<Chunk> {
    let total_blocks = blocks.len();
    let max = chunk_max_blocks.get();
    let mut chunks = Vec::with_capacity(chunk_count(total_blocks, chunk_max_blocks));
    let mut remaining = blocks.into_iter();

    loop {
        let chunk: Chunk = remaining.by_ref().take(max).collect();
        if chunk.is_empty() {
            break;
        }
        chunks.push(chunk);
    }

    let total_chunked: usize = chunks.iter().map(Vec::len).sum();
    if total_chunked != total_blocks {
        error!("Lost blocks during chunking! Original: {}, after chunking: {}",
               total_blocks, total_chunked);
    } else if log::max_level() >= log::LevelFilter::Debug {
        for (i, chunk) in chunks.iter().enumerate() {
            let indices: Vec<u64> = chunk.iter().map(SubtitleBlock::index).collect();
            debug!("Chunk {}: {} blocks (indices: {:?})", i + 1, chunk.len(), indices);
        }
    }

    chunks
}
