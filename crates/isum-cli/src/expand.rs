//! Argument expansion into processable targets.

use std::path::{Path, PathBuf};

use tracing::debug;

use isum_walk::treewalk_iscc;

/// Where a target's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Standard input
    Stdin,
    /// A regular file on disk
    File(PathBuf),
}

/// One expanded input with its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Byte source
    pub source: Source,
    /// Name used in output records and error messages
    pub display: String,
}

/// Expands arguments into targets, preserving argument order.
///
/// No arguments (or a literal `-`) means standard input, displayed as `-`.
/// A directory expands through `treewalk_iscc`, each file displayed as the
/// argument joined with its tree-relative path. Missing paths, symlinks and
/// special files are reported to stderr and skipped; the returned flag is
/// true if any argument failed to expand.
pub fn expand_paths(paths: &[PathBuf]) -> (Vec<Target>, bool) {
    if paths.is_empty() {
        return (
            vec![Target {
                source: Source::Stdin,
                display: "-".to_string(),
            }],
            false,
        );
    }

    let mut targets = Vec::new();
    let mut had_errors = false;

    for arg in paths {
        if arg.as_os_str() == "-" {
            targets.push(Target {
                source: Source::Stdin,
                display: "-".to_string(),
            });
            continue;
        }

        let metadata = match std::fs::symlink_metadata(arg) {
            Ok(m) => m,
            Err(err) => {
                eprintln!("isum: {}: {}", arg.display(), err);
                had_errors = true;
                continue;
            }
        };

        if metadata.is_file() {
            targets.push(Target {
                source: Source::File(arg.clone()),
                display: arg.display().to_string(),
            });
        } else if metadata.is_dir() {
            match treewalk_iscc(arg) {
                Ok(files) => {
                    debug!(dir = %arg.display(), files = files.len(), "expanded directory");
                    for path in files {
                        let display = display_within(arg, &path);
                        targets.push(Target {
                            source: Source::File(path),
                            display,
                        });
                    }
                }
                Err(err) => {
                    eprintln!("isum: {}: {}", arg.display(), err);
                    had_errors = true;
                }
            }
        } else {
            eprintln!(
                "isum: {}: not a regular file or directory",
                arg.display()
            );
            had_errors = true;
        }
    }

    (targets, had_errors)
}

/// Joins the argument as the user wrote it with the walk-relative path.
fn display_within(arg: &Path, path: &Path) -> String {
    match path.strip_prefix(arg) {
        Ok(rel) => arg.join(rel).display().to_string(),
        Err(_) => path.display().to_string(),
    }
}
