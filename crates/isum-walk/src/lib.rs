//! Deterministic directory tree traversal.
//!
//! Turns a directory into a reproducible stream of file paths, independent
//! of filesystem enumeration order, platform, or locale:
//! - `listdir` sorts entries by NFC-normalized UTF-8 name with the original
//!   bytes as tie-breaker and never follows symlinks
//! - `treewalk` yields `.*ignore` files first, then regular files, then
//!   recurses into subdirectories
//! - `treewalk_ignore` applies cascading gitignore-style rules with
//!   last-match-wins negation
//! - `treewalk_iscc` is `treewalk_ignore(".isccignore")` minus `.iscc.json`
//!   metadata files

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod listdir;
mod rules;
mod walk;

pub use listdir::{listdir, DirEntry};
pub use rules::{MatchOutcome, RuleSet};
pub use walk::{treewalk, treewalk_ignore, treewalk_iscc};

use thiserror::Error;

/// Errors from traversal operations.
#[derive(Debug, Error)]
pub enum WalkError {
    /// Underlying filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Path cannot be represented or related to the walk root
    #[error("invalid path: {0}")]
    InvalidPath(String),
}
