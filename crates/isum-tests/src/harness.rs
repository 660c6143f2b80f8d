//! Filesystem fixtures for traversal and checksum scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory tree built declaratively by tests.
pub struct TreeFixture {
    dir: TempDir,
}

impl TreeFixture {
    /// Creates an empty fixture tree.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create fixture tempdir"),
        }
    }

    /// Returns the fixture root path.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Creates a file (and any parent directories) with the given contents.
    pub fn file(&self, rel: &str, contents: &[u8]) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture parents");
        }
        fs::write(&path, contents).expect("write fixture file");
        path
    }

    /// Creates an empty directory (and any parents).
    pub fn subdir(&self, rel: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(&path).expect("create fixture directory");
        path
    }

    /// Writes an ignore file from pattern lines.
    pub fn ignore_file(&self, rel: &str, patterns: &[&str]) -> PathBuf {
        let mut contents = patterns.join("\n");
        contents.push('\n');
        self.file(rel, contents.as_bytes())
    }
}

impl Default for TreeFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic pseudo-random bytes for content fixtures.
pub fn lcg_bytes(len: usize, mut state: u64) -> Vec<u8> {
    let mut data = vec![0u8; len];
    for byte in &mut data {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        *byte = (state >> 33) as u8;
    }
    data
}
