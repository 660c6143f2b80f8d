//! Content-defined chunking for ISCC Data-Code generation.
//!
//! Splits byte streams into variable-size chunks whose boundaries depend
//! only on content, using a gear rolling hash with a two-mask boundary
//! test. Insertions or deletions therefore shift boundaries only within a
//! bounded window instead of invalidating every downstream chunk.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod chunker;
mod gear;
mod stream;

pub use chunker::{chunk, chunk_with_params, ChunkingParams};
pub use gear::{GearTable, GEAR_TABLE};
pub use stream::StreamChunker;

/// Chunk size parameters.
///
/// The two masks implement FastCDC-style normalization: the stricter mask
/// applies while a chunk is shorter than the average target, the looser one
/// after, so the expected chunk length under uniform input is approximately
/// `CHUNK_AVG_SIZE`.
pub mod params {
    /// Minimum chunk size: 256 bytes
    pub const CHUNK_MIN_SIZE: usize = 256;

    /// Target average chunk size: 1 KiB
    pub const CHUNK_AVG_SIZE: usize = 1024;

    /// Maximum chunk size: 8 KiB
    pub const CHUNK_MAX_SIZE: usize = 8192;

    /// Mask for positions before average (11 bits set)
    pub const MASK_S: u64 = (1 << 11) - 1;

    /// Mask for positions at/after average (9 bits set)
    pub const MASK_L: u64 = (1 << 9) - 1;
}
