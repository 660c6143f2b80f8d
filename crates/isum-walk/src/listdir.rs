//! Deterministic directory listing.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

use crate::WalkError;

/// A directory entry that is a regular file or directory.
///
/// Built transiently per listing; symlinks and special files are absent.
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// File name as stored in the directory
    pub name: String,
    /// Full path (listing path joined with the name)
    pub path: PathBuf,
    /// True for a regular directory
    pub is_dir: bool,
    /// True for a regular file
    pub is_file: bool,
}

/// Lists directory entries with deterministic cross-platform ordering.
///
/// Entries are sorted by the NFC-normalized UTF-8 bytes of their name, with
/// the original name bytes as a secondary key so that names normalizing to
/// the same string still order deterministically. Symlinks are excluded and
/// never followed; non-Unicode names are an error.
pub fn listdir<P: AsRef<Path>>(path: P) -> Result<Vec<DirEntry>, WalkError> {
    let path = path.as_ref();
    let mut entries = Vec::new();

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        // DirEntry::metadata does not traverse symlinks.
        let metadata = entry.metadata()?;

        if metadata.is_symlink() {
            continue;
        }

        let name = entry
            .file_name()
            .into_string()
            .map_err(|name| WalkError::InvalidPath(format!("non-Unicode file name: {:?}", name)))?;

        let is_dir = metadata.is_dir();
        let is_file = metadata.is_file();
        if !is_dir && !is_file {
            continue;
        }

        entries.push(DirEntry {
            name,
            path: entry.path(),
            is_dir,
            is_file,
        });
    }

    entries.sort_by(|a, b| {
        let a_normalized = a.name.nfc().collect::<String>();
        let b_normalized = b.name.nfc().collect::<String>();

        match a_normalized.as_bytes().cmp(b_normalized.as_bytes()) {
            Ordering::Equal => a.name.as_bytes().cmp(b.name.as_bytes()),
            other => other,
        }
    });

    Ok(entries)
}
