//! Checksum-file line parsing.
//!
//! Two line forms are auto-detected per line:
//! - default: `<ISCC> *<path>`
//! - BSD:     `ISCC (<path>) = <ISCC>`
//!
//! A trailing `/` on the path marks a tree-mode entry. Lines starting with
//! `#` are comments; blank lines are skipped.

use isum_core::IsccCode;

/// One parsed checksum-file line.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckEntry {
    /// The expected code
    pub code: IsccCode,
    /// Target path as written (possibly relative, possibly `<dir>/`)
    pub path: String,
    /// True when the path denotes tree mode
    pub tree: bool,
}

/// Classification of one checksum-file line.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// A parsed entry
    Entry(CheckEntry),
    /// Blank line or `#` comment
    Skip,
    /// Unrecognized content
    Malformed,
}

/// Parses one line of a checksum file.
pub fn parse_line(line: &str) -> Line {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Line::Skip;
    }

    if let Some(entry) = parse_bsd(line).or_else(|| parse_default(line)) {
        Line::Entry(entry)
    } else {
        Line::Malformed
    }
}

/// `ISCC (<path>) = <ISCC>`
fn parse_bsd(line: &str) -> Option<CheckEntry> {
    let rest = line.strip_prefix("ISCC (")?;
    let close = rest.rfind(") = ")?;
    let path = &rest[..close];
    let code: IsccCode = rest[close + 4..].trim_end().parse().ok()?;
    if path.is_empty() {
        return None;
    }
    Some(entry(code, path))
}

/// `<ISCC> *<path>`
fn parse_default(line: &str) -> Option<CheckEntry> {
    let (code_str, rest) = line.split_once(' ')?;
    let code: IsccCode = code_str.parse().ok()?;
    let path = rest.strip_prefix('*')?;
    if path.is_empty() {
        return None;
    }
    Some(entry(code, path))
}

fn entry(code: IsccCode, path: &str) -> CheckEntry {
    CheckEntry {
        code,
        tree: path.ends_with('/'),
        path: path.to_string(),
    }
}
