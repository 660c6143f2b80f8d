//! Gear table for the rolling hash.
//!
//! The 256-entry table is fixed by derivation rather than by a literal
//! constant block: entry `i` is the BLAKE3 hash of the single byte `i`,
//! truncated to its first 8 bytes as a little-endian u64. Any independent
//! implementation of the code format must reproduce it byte for byte; the
//! spot-check values below pin the derivation.

use std::sync::LazyLock;

/// Type alias for the gear table.
pub type GearTable = [u64; 256];

/// The shared gear table (derived once at first use).
///
/// # Spot Checks
/// - `GEAR_TABLE[0]`   = 0xf1611bf1dfde3a2d
/// - `GEAR_TABLE[1]`   = 0xe072c1bb1f72fc48
/// - `GEAR_TABLE[255]` = 0x6d93c57b374dd499
pub static GEAR_TABLE: LazyLock<GearTable> = LazyLock::new(derive_table);

fn derive_table() -> GearTable {
    let mut table = [0u64; 256];
    for (i, entry) in table.iter_mut().enumerate() {
        let hash = blake3::hash(&[i as u8]);
        let mut word = [0u8; 8];
        word.copy_from_slice(&hash.as_bytes()[..8]);
        *entry = u64::from_le_bytes(word);
    }
    table
}
