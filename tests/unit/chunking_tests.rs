/*!
 * Tests for positional chunking
 */

use std::num::NonZeroUsize;
use std::time::Duration;

use srt_ingest::chunking::{chunk_blocks, chunk_count};
use srt_ingest::SubtitleBlock;

fn generate_blocks(count: usize) -> Vec<SubtitleBlock> {
    (0..count)
        .map(|i| {
            SubtitleBlock::new(
                i as u64 + 1,
                Duration::from_millis(i as u64 * 3000),
                Duration::from_millis(i as u64 * 3000 + 2500),
                format!("Block {}", i + 1),
            )
        })
        .collect()
}

fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn test_chunkBlocks_withTenBlocksAndMaxFour_shouldSplitFourFourTwo() {
    let chunks = chunk_blocks(generate_blocks(10), size(4));

    let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![4, 4, 2]);
}

#[test]
fn test_chunkBlocks_withVariousSizes_shouldHonourCountAndOrder() {
    for total in [1usize, 2, 7, 12, 50, 101] {
        for max in [1usize, 3, 5, 12, 200] {
            let blocks = generate_blocks(total);
            let chunks = chunk_blocks(blocks.clone(), size(max));

            assert_eq!(chunks.len(), total.div_ceil(max), "total={} max={}", total, max);
            assert_eq!(chunks.len(), chunk_count(total, size(max)));

            let (last, full) = chunks.split_last().unwrap();
            assert!(full.iter().all(|chunk| chunk.len() == max));
            assert!((1..=max).contains(&last.len()));

            let flattened: Vec<SubtitleBlock> = chunks.into_iter().flatten().collect();
            assert_eq!(flattened, blocks);
        }
    }
}

#[test]
fn test_chunkBlocks_withNoBlocks_shouldReturnNoChunks() {
    let chunks = chunk_blocks(Vec::new(), size(4));
    assert!(chunks.is_empty());
    assert_eq!(chunk_count(0, size(4)), 0);
}

#[test]
fn test_chunkBlocks_withExactMultiple_shouldLeaveNoPartialChunk() {
    let chunks = chunk_blocks(generate_blocks(8), size(4));

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[1].last().unwrap().index(), 8);
}
