//! ISCC header packing and base32 rendering.
//!
//! An ISCC code is a 2-byte self-describing header followed by a digest
//! body, rendered as `"ISCC:"` plus RFC 4648 base32 without padding.
//!
//! Header layout:
//! - Byte 0: main-type nibble (high) | sub-type nibble (low)
//! - Byte 1: version nibble (high) | length nibble (low)

use std::fmt;
use std::str::FromStr;

use bytes::{BufMut, BytesMut};
use thiserror::Error;

use crate::{SUM_NARROW_LEN, SUM_WIDE_LEN, UNIT_LEN};

/// Errors from packing or parsing ISCC codes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input does not start with the `ISCC:` prefix
    #[error("missing ISCC: prefix")]
    MissingPrefix,

    /// Input is not valid unpadded base32
    #[error("invalid base32 payload")]
    InvalidBase32,

    /// Packed code has an unexpected length
    #[error("invalid code length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected packed length in bytes
        expected: usize,
        /// Actual packed length in bytes
        actual: usize,
    },

    /// Unknown main-type nibble
    #[error("unknown main-type nibble: {0:#06b}")]
    UnknownMainType(u8),

    /// Unknown sub-type nibble for the given main-type
    #[error("unknown sub-type nibble: {0:#06b}")]
    UnknownSubType(u8),

    /// Unsupported version nibble (only v0 exists)
    #[error("unsupported version nibble: {0:#06b}")]
    UnsupportedVersion(u8),

    /// Digest body is shorter than the header demands
    #[error("digest too short: need {need} bytes, got {got}")]
    DigestTooShort {
        /// Required body length
        need: usize,
        /// Provided body length
        got: usize,
    },
}

/// ISCC main-type nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MainType {
    /// Standalone Data-Code unit
    Data = 0b0011,
    /// Standalone Instance-Code unit
    Instance = 0b0100,
    /// Composite ISCC-SUM code
    Sum = 0b0101,
}

impl MainType {
    /// Creates from a nibble value.
    pub fn from_nibble(nibble: u8) -> Result<Self, CodecError> {
        match nibble {
            0b0011 => Ok(MainType::Data),
            0b0100 => Ok(MainType::Instance),
            0b0101 => Ok(MainType::Sum),
            other => Err(CodecError::UnknownMainType(other)),
        }
    }
}

/// ISCC sub-type nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SubType {
    /// No sub-type (standalone units)
    None = 0b0000,
    /// ISCC-SUM with 2x64-bit body
    Sum = 0b0101,
    /// ISCC-SUM with 2x128-bit body
    SumWide = 0b0111,
}

impl SubType {
    /// Creates from a nibble value in the context of a main-type.
    pub fn from_nibble(main: MainType, nibble: u8) -> Result<Self, CodecError> {
        match (main, nibble) {
            (MainType::Data | MainType::Instance, 0b0000) => Ok(SubType::None),
            (MainType::Sum, 0b0101) => Ok(SubType::Sum),
            (MainType::Sum, 0b0111) => Ok(SubType::SumWide),
            (_, other) => Err(CodecError::UnknownSubType(other)),
        }
    }
}

/// Length nibble denoting a 256-bit body on standalone units.
const LENGTH_256: u8 = 0b0111;

/// A packed ISCC code: 2-byte header plus digest body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IsccCode {
    bytes: Vec<u8>,
    main_type: MainType,
    sub_type: SubType,
}

impl IsccCode {
    /// Packs an ISCC-SUM code from Data-Code and Instance-Code bodies.
    ///
    /// Each body must hold at least 8 bytes (narrow) or 16 bytes (wide);
    /// only the required prefix is packed.
    pub fn new_sum(data_body: &[u8], instance_body: &[u8], wide: bool) -> Result<Self, CodecError> {
        let body_len = if wide { 16 } else { 8 };
        for body in [data_body, instance_body] {
            if body.len() < body_len {
                return Err(CodecError::DigestTooShort {
                    need: body_len,
                    got: body.len(),
                });
            }
        }

        let sub_type = if wide { SubType::SumWide } else { SubType::Sum };
        let mut buf = BytesMut::with_capacity(2 + 2 * body_len);
        buf.put_u8(((MainType::Sum as u8) << 4) | sub_type as u8);
        buf.put_u8(0x00);
        buf.put_slice(&data_body[..body_len]);
        buf.put_slice(&instance_body[..body_len]);

        Ok(Self {
            bytes: buf.to_vec(),
            main_type: MainType::Sum,
            sub_type,
        })
    }

    /// Packs a standalone 256-bit unit code for a Data- or Instance-Code digest.
    pub fn new_unit(main_type: MainType, digest: &[u8; 32]) -> Result<Self, CodecError> {
        if main_type == MainType::Sum {
            return Err(CodecError::UnknownSubType(SubType::None as u8));
        }

        let mut buf = BytesMut::with_capacity(UNIT_LEN);
        buf.put_u8(((main_type as u8) << 4) | SubType::None as u8);
        buf.put_u8(LENGTH_256);
        buf.put_slice(digest);

        Ok(Self {
            bytes: buf.to_vec(),
            main_type,
            sub_type: SubType::None,
        })
    }

    /// Parses the packed representation, validating header and length.
    pub fn from_packed(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < 2 {
            return Err(CodecError::InvalidLength {
                expected: SUM_NARROW_LEN,
                actual: bytes.len(),
            });
        }

        let main_type = MainType::from_nibble(bytes[0] >> 4)?;
        let sub_type = SubType::from_nibble(main_type, bytes[0] & 0x0F)?;
        let version = bytes[1] >> 4;
        if version != 0 {
            return Err(CodecError::UnsupportedVersion(version));
        }

        let expected = match sub_type {
            SubType::Sum => SUM_NARROW_LEN,
            SubType::SumWide => SUM_WIDE_LEN,
            SubType::None => UNIT_LEN,
        };
        if bytes.len() != expected {
            return Err(CodecError::InvalidLength {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            bytes: bytes.to_vec(),
            main_type,
            sub_type,
        })
    }

    /// Returns the main-type from the header.
    pub fn main_type(&self) -> MainType {
        self.main_type
    }

    /// Returns the sub-type from the header.
    pub fn sub_type(&self) -> SubType {
        self.sub_type
    }

    /// Returns true for an ISCC-SUM code with the 2x128-bit body.
    pub fn is_wide(&self) -> bool {
        self.sub_type == SubType::SumWide
    }

    /// Returns the full packed bytes (header included).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the Data-Code half of an ISCC-SUM body.
    ///
    /// These are the bits compared by Hamming distance for similarity.
    pub fn data_body(&self) -> Result<&[u8], CodecError> {
        match self.sub_type {
            SubType::Sum => Ok(&self.bytes[2..10]),
            SubType::SumWide => Ok(&self.bytes[2..18]),
            SubType::None => Err(CodecError::UnknownSubType(self.sub_type as u8)),
        }
    }
}

impl fmt::Display for IsccCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ISCC:{}", encode_base32(&self.bytes))
    }
}

impl FromStr for IsccCode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let payload = s.strip_prefix("ISCC:").ok_or(CodecError::MissingPrefix)?;
        let bytes = decode_base32(payload)?;
        Self::from_packed(&bytes)
    }
}

/// Standard RFC 4648 base32 encoding without padding, upper-case alphabet.
pub fn encode_base32(data: &[u8]) -> String {
    base32::encode(base32::Alphabet::Rfc4648 { padding: false }, data)
}

/// Decodes unpadded RFC 4648 base32.
pub fn decode_base32(s: &str) -> Result<Vec<u8>, CodecError> {
    base32::decode(base32::Alphabet::Rfc4648 { padding: false }, s).ok_or(CodecError::InvalidBase32)
}
