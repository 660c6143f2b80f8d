//! Data-Code processor: CDC chunks -> xxhash-32 features -> MinHash sketch.

use isum_cdc::StreamChunker;
use xxhash_rust::xxh32::xxh32;

use crate::minhash::MinHash;

/// Seed for the per-chunk feature hash.
const FEATURE_SEED: u32 = 0;

/// Incremental Data-Code generator.
///
/// Must be fed the entire stream; the digest is only meaningful once all
/// input has been pushed. Output is independent of push slicing.
#[derive(Debug, Clone, Default)]
pub struct DataHasher {
    chunker: StreamChunker,
    sketch: MinHash,
}

impl DataHasher {
    /// Creates a new Data-Code generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes stream data, folding completed chunks into the sketch.
    pub fn push(&mut self, data: &[u8]) {
        let Self { chunker, sketch } = self;
        chunker.push(data, |chunk| sketch.add(xxh32(chunk, FEATURE_SEED)));
    }

    /// Returns the 256-bit Data-Code digest.
    ///
    /// The buffered tail is flushed on a copy, so taking a digest does not
    /// mutate the hasher.
    pub fn digest(&self) -> [u8; 32] {
        let mut sketch = self.sketch.clone();
        self.chunker
            .clone()
            .finish(|chunk| sketch.add(xxh32(chunk, FEATURE_SEED)));
        sketch.digest_wide()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lcg_data(len: usize, mut state: u64) -> Vec<u8> {
        let mut data = vec![0u8; len];
        for byte in &mut data {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            *byte = (state >> 33) as u8;
        }
        data
    }

    #[test]
    fn test_xxh32_seed_zero_empty_vector() {
        assert_eq!(xxh32(b"", 0), 0x02cc5d05);
    }

    #[test]
    fn test_push_slicing_independence() {
        let data = lcg_data(200_000, 0xFEED);

        let mut whole = DataHasher::new();
        whole.push(&data);
        let expected = whole.digest();

        for piece in [1usize, 13, 1024, 65536] {
            let mut sliced = DataHasher::new();
            for part in data.chunks(piece) {
                sliced.push(part);
            }
            assert_eq!(
                sliced.digest(),
                expected,
                "digest differs at piece size {}",
                piece
            );
        }
    }

    #[test]
    fn test_empty_stream_digest_deterministic() {
        let a = DataHasher::new().digest();
        let b = DataHasher::new().digest();
        assert_eq!(a, b);
        // The empty stream still hashes one (empty) chunk feature.
        assert_ne!(a, [0xFFu8; 32]);
    }

    #[test]
    fn test_identical_content_identical_digest() {
        let data = lcg_data(50_000, 1);
        let mut h1 = DataHasher::new();
        h1.push(&data);
        let mut h2 = DataHasher::new();
        h2.push(&data);
        assert_eq!(h1.digest(), h2.digest());
    }

    #[test]
    fn test_different_content_different_digest() {
        let mut h1 = DataHasher::new();
        h1.push(&lcg_data(50_000, 2));
        let mut h2 = DataHasher::new();
        h2.push(&lcg_data(50_000, 3));
        assert_ne!(h1.digest(), h2.digest());
    }

    #[test]
    fn test_digest_non_destructive() {
        let data = lcg_data(30_000, 4);
        let mut hasher = DataHasher::new();
        hasher.push(&data);
        let first = hasher.digest();
        let second = hasher.digest();
        assert_eq!(first, second);
    }
}
