//! Test support for end-to-end ISCC-SUM scenarios.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod harness;

pub use harness::TreeFixture;
