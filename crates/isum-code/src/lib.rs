//! ISCC-SUM hashing pipeline.
//!
//! Three processors, each driven by a push-stream `update`/`push` call:
//! - `DataHasher`: content-defined chunks, xxhash-32 features, MinHash sketch
//! - `InstanceHasher`: streaming BLAKE3 plus a byte counter
//! - `IsccSumProcessor`: fans one stream out to both and packs the result
//!
//! Every digest is a pure function of the concatenated input bytes,
//! independent of how callers slice their `update` calls.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod data;
mod instance;
mod minhash;
mod sum;

pub use data::DataHasher;
pub use instance::InstanceHasher;
pub use minhash::{minhash_permutations, MinHash, MINHASH_LANES};
pub use sum::IsccSumProcessor;
