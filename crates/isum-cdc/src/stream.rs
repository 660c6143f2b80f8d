//! Push-stream chunking over arbitrarily sliced input.
//!
//! Callers feed bytes in whatever pieces their I/O produces; the chunker
//! emits exactly the chunks a single scan over the concatenated input would
//! produce. The final chunk of each scan is withheld as the tail, because
//! only the end of the stream can prove it complete; it is re-scanned when
//! more data arrives. The scan is chunk-local, so re-scanning never changes
//! an already-emitted boundary, and the tail never exceeds the maximum
//! chunk size between pushes.

use crate::chunker::{chunk_with_params, ChunkingParams};

/// Incremental chunk boundary producer.
#[derive(Debug, Clone)]
pub struct StreamChunker {
    params: ChunkingParams,
    tail: Vec<u8>,
}

impl StreamChunker {
    /// Creates a stream chunker with the default parameter set.
    pub fn new() -> Self {
        Self::with_params(ChunkingParams::default())
    }

    /// Creates a stream chunker with custom parameters.
    pub fn with_params(params: ChunkingParams) -> Self {
        Self {
            params,
            tail: Vec::new(),
        }
    }

    /// Appends data and invokes `sink` once per completed chunk.
    pub fn push<F: FnMut(&[u8])>(&mut self, data: &[u8], mut sink: F) {
        self.tail.extend_from_slice(data);

        let boundaries = chunk_with_params(&self.tail, &self.params);
        // All chunks but the last are final; keep the last as the new tail.
        if boundaries.len() > 2 {
            let last_start = boundaries[boundaries.len() - 2];
            for pair in boundaries.windows(2).take(boundaries.len() - 2) {
                sink(&self.tail[pair[0]..pair[1]]);
            }
            self.tail.drain(..last_start);
        }
    }

    /// Flushes the tail as the final chunk.
    ///
    /// An empty stream flushes one empty chunk, mirroring the single-scan
    /// behavior where even zero bytes produce one feature.
    pub fn finish<F: FnMut(&[u8])>(mut self, mut sink: F) {
        let boundaries = chunk_with_params(&self.tail, &self.params);
        if boundaries.len() < 2 {
            sink(&[]);
            return;
        }
        for pair in boundaries.windows(2) {
            sink(&self.tail[pair[0]..pair[1]]);
        }
        self.tail.clear();
    }

    /// Returns the number of buffered tail bytes.
    pub fn pending(&self) -> usize {
        self.tail.len()
    }
}

impl Default for StreamChunker {
    fn default() -> Self {
        Self::new()
    }
}
