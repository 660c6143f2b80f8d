//! Instance-Code processor: streaming BLAKE3 plus a byte counter.

/// Multihash prefix identifying a 256-bit BLAKE3 digest.
const MULTIHASH_PREFIX: [u8; 2] = [0x1e, 0x20];

/// Incremental Instance-Code generator.
#[derive(Debug, Default)]
pub struct InstanceHasher {
    hasher: blake3::Hasher,
    filesize: u64,
}

impl InstanceHasher {
    /// Creates a new Instance-Code generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes stream data.
    pub fn push(&mut self, data: &[u8]) {
        self.filesize += data.len() as u64;
        self.hasher.update(data);
    }

    /// Returns the full 32-byte BLAKE3 digest of everything pushed so far.
    pub fn digest(&self) -> [u8; 32] {
        *self.hasher.finalize().as_bytes()
    }

    /// Returns the digest as a multihash hex string (`1e20` + 64 hex digits).
    pub fn multihash(&self) -> String {
        let mut bytes = Vec::with_capacity(34);
        bytes.extend_from_slice(&MULTIHASH_PREFIX);
        bytes.extend_from_slice(&self.digest());
        hex::encode(bytes)
    }

    /// Returns the total number of bytes pushed.
    pub fn filesize(&self) -> u64 {
        self.filesize
    }
}
