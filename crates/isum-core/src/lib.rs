//! ISCC code model for the `isum` workspace.
//!
//! This crate provides:
//! - Header nibble types (`MainType`, `SubType`) and 2-byte header packing
//! - The `IsccCode` value type with base32 rendering and parsing
//! - The `IsccSumResult` record returned by the ISCC-SUM processor

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod codec;
pub mod result;

pub use codec::{decode_base32, encode_base32, CodecError, IsccCode, MainType, SubType};
pub use result::IsccSumResult;

/// Packed length of a narrow (2x64-bit body) ISCC-SUM code in bytes.
pub const SUM_NARROW_LEN: usize = 18;

/// Packed length of a wide (2x128-bit body) ISCC-SUM code in bytes.
pub const SUM_WIDE_LEN: usize = 34;

/// Packed length of a standalone 256-bit unit code in bytes.
pub const UNIT_LEN: usize = 34;
