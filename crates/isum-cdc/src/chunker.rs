//! Boundary scanner over an in-memory slice.
//!
//! The scan is chunk-local: the rolling hash starts fresh at each chunk and
//! the first `min_size` bytes of a chunk are skipped, so a boundary
//! decision depends only on bytes of the chunk it terminates. The streaming
//! layer relies on this to re-scan an unfinished tail without changing any
//! earlier decision.

use crate::gear::GEAR_TABLE;
use crate::params::{CHUNK_AVG_SIZE, CHUNK_MAX_SIZE, CHUNK_MIN_SIZE, MASK_L, MASK_S};

/// Parameters for the chunking algorithm.
#[derive(Debug, Clone, Copy)]
pub struct ChunkingParams {
    /// Minimum chunk size in bytes
    pub min_size: usize,
    /// Target average chunk size
    pub avg_size: usize,
    /// Maximum chunk size in bytes
    pub max_size: usize,
    /// Mask for positions before average
    pub mask_s: u64,
    /// Mask for positions at/after average
    pub mask_l: u64,
}

impl Default for ChunkingParams {
    fn default() -> Self {
        Self {
            min_size: CHUNK_MIN_SIZE,
            avg_size: CHUNK_AVG_SIZE,
            max_size: CHUNK_MAX_SIZE,
            mask_s: MASK_S,
            mask_l: MASK_L,
        }
    }
}

/// Chunks data with the default parameter set.
///
/// Returns end-exclusive boundary offsets starting with 0; the last offset
/// is always `data.len()`. Empty data returns `[0]`.
pub fn chunk(data: &[u8]) -> Vec<usize> {
    chunk_with_params(data, &ChunkingParams::default())
}

/// Chunks data with custom parameters.
pub fn chunk_with_params(data: &[u8], params: &ChunkingParams) -> Vec<usize> {
    if data.is_empty() {
        return vec![0];
    }

    let mut boundaries = vec![0];
    let mut start = 0;
    while start < data.len() {
        let end = scan_chunk(data, start, params);
        boundaries.push(end);
        start = end;
    }
    boundaries
}

/// Finds the end-exclusive boundary of the chunk starting at `start`.
///
/// The rolling hash `h := (h << 1) + GEAR[byte]` is evaluated from
/// `start + min_size` onward; a cut triggers at byte `i` when the masked
/// hash is zero, with the stricter mask before `avg_size` and the looser
/// one after. A cut is forced at `max_size`, and a remainder at or below
/// `min_size` becomes the tail chunk.
fn scan_chunk(data: &[u8], start: usize, params: &ChunkingParams) -> usize {
    if data.len() - start <= params.min_size {
        return data.len();
    }

    let gear = &*GEAR_TABLE;
    let search_end = (start + params.max_size).min(data.len());
    let mut hash = 0u64;

    for i in (start + params.min_size)..search_end {
        hash = (hash << 1).wrapping_add(gear[data[i] as usize]);
        let mask = if i - start < params.avg_size {
            params.mask_s
        } else {
            params.mask_l
        };
        if hash & mask == 0 {
            return i + 1;
        }
    }

    search_end
}
