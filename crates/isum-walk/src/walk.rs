//! Recursive traversal with deterministic ordering and ignore filtering.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::listdir::{listdir, DirEntry};
use crate::rules::{MatchOutcome, RuleSet};
use crate::WalkError;

/// Suffix of ISCC metadata files dropped unconditionally by `treewalk_iscc`.
const ISCC_META_SUFFIX: &str = ".iscc.json";

/// Returns true for `.*ignore` names, which are yielded before other files.
fn is_ignore_file(name: &str) -> bool {
    name.starts_with('.') && name.ends_with("ignore")
}

fn require_directory(path: &Path) -> Result<(), WalkError> {
    if !path.exists() {
        return Err(WalkError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("path does not exist: {}", path.display()),
        )));
    }
    if !path.is_dir() {
        return Err(WalkError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("path is not a directory: {}", path.display()),
        )));
    }
    Ok(())
}

/// Root-relative path in `/`-separated form for rule matching.
fn relative_slash(path: &Path, root: &Path) -> Result<String, WalkError> {
    let rel = path.strip_prefix(root).map_err(|_| {
        WalkError::InvalidPath(format!(
            "cannot relate {} to walk root {}",
            path.display(),
            root.display()
        ))
    })?;
    let mut out = String::new();
    for component in rel.components() {
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    Ok(out)
}

fn partition(entries: Vec<DirEntry>) -> (Vec<DirEntry>, Vec<DirEntry>, Vec<DirEntry>) {
    let mut ignore_files = Vec::new();
    let mut regular_files = Vec::new();
    let mut directories = Vec::new();

    for entry in entries {
        if entry.is_dir {
            directories.push(entry);
        } else if is_ignore_file(&entry.name) {
            ignore_files.push(entry);
        } else {
            regular_files.push(entry);
        }
    }

    (ignore_files, regular_files, directories)
}

/// Recursively walks a directory tree in deterministic order.
///
/// Per directory: `.*ignore` files first (sorted), then regular files
/// (sorted), then recursion into each subdirectory (sorted). Symlinks are
/// never followed or yielded. The result is a pure function of directory
/// contents.
pub fn treewalk<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>, WalkError> {
    let root = path.as_ref();
    require_directory(root)?;

    let mut result = Vec::new();
    treewalk_recursive(root, &mut result)?;
    Ok(result)
}

fn treewalk_recursive(dir: &Path, result: &mut Vec<PathBuf>) -> Result<(), WalkError> {
    let (ignore_files, regular_files, directories) = partition(listdir(dir)?);

    for entry in ignore_files.iter().chain(regular_files.iter()) {
        result.push(entry.path.clone());
    }

    for entry in &directories {
        treewalk_recursive(&entry.path, result)?;
    }

    Ok(())
}

/// Walks a directory tree while honoring cascading ignore-file rules.
///
/// At each directory the file named `ignore_file_name` (if present)
/// contributes rules on top of those inherited from ancestors; the active
/// ignore file itself is never yielded. An excluded directory is still
/// traversed in suppressed mode so that whitelist rules, including rules
/// introduced by ignore files inside it, can re-include content.
pub fn treewalk_ignore<P: AsRef<Path>>(
    path: P,
    ignore_file_name: &str,
) -> Result<Vec<PathBuf>, WalkError> {
    let root = path.as_ref();
    require_directory(root)?;

    let mut result = Vec::new();
    walk_ignore_recursive(
        root,
        ignore_file_name,
        root,
        &RuleSet::new(),
        false,
        &mut result,
    )?;
    Ok(result)
}

fn walk_ignore_recursive(
    dir: &Path,
    ignore_file_name: &str,
    root: &Path,
    inherited: &RuleSet,
    suppressed: bool,
    result: &mut Vec<PathBuf>,
) -> Result<(), WalkError> {
    let active_ignore = dir.join(ignore_file_name);

    let local_rules;
    let rules = if active_ignore.is_file() {
        let contents = fs::read_to_string(&active_ignore)?;
        let base_dir = relative_slash(dir, root)?;
        local_rules = inherited.extend_from_lines(&base_dir, contents.lines());
        debug!(dir = %dir.display(), "loaded ignore rules");
        &local_rules
    } else {
        inherited
    };

    let (ignore_files, regular_files, directories) = partition(listdir(dir)?);

    for entry in ignore_files.iter().chain(regular_files.iter()) {
        if entry.path == active_ignore {
            continue;
        }
        let rel = relative_slash(&entry.path, root)?;
        let keep = match rules.evaluate(&rel, false) {
            MatchOutcome::Whitelisted => true,
            MatchOutcome::Excluded => false,
            MatchOutcome::Unmatched => !suppressed,
        };
        if keep {
            result.push(entry.path.clone());
        }
    }

    for entry in &directories {
        let rel = relative_slash(&entry.path, root)?;
        let child_suppressed = match rules.evaluate(&rel, true) {
            MatchOutcome::Whitelisted => false,
            MatchOutcome::Excluded => true,
            MatchOutcome::Unmatched => suppressed,
        };
        walk_ignore_recursive(
            &entry.path,
            ignore_file_name,
            root,
            rules,
            child_suppressed,
            result,
        )?;
    }

    Ok(())
}

/// Walks a directory tree with ISCC conventions.
///
/// Applies `.isccignore` rules and additionally drops every path whose file
/// name ends with `.iscc.json`; that exclusion is unconditional and cannot
/// be overridden by ignore patterns.
pub fn treewalk_iscc<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>, WalkError> {
    let paths = treewalk_ignore(path, ".isccignore")?;
    Ok(paths
        .into_iter()
        .filter(|p| {
            p.file_name()
                .map(|name| !name.to_string_lossy().ends_with(ISCC_META_SUFFIX))
                .unwrap_or(true)
        })
        .collect())
}
