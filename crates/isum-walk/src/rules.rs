//! Gitignore-style rule sets with cascading precedence.
//!
//! Rules accumulate from the walk root downward; within the accumulated
//! list the last matching rule wins, and a whitelist (`!`) match prevents
//! exclusion. Patterns are anchored to the directory of the ignore file
//! they came from.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::warn;

/// Result of evaluating a path against a rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// No rule matched
    Unmatched,
    /// Last matching rule excludes the path
    Excluded,
    /// Last matching rule whitelists the path
    Whitelisted,
}

// The compiled glob lives inside the rule so rule indices always line up
// with glob indices in the batched matcher.
#[derive(Debug, Clone)]
struct Rule {
    glob: globset::Glob,
    whitelist: bool,
    dir_only: bool,
}

/// Ordered, compiled gitignore-style rule list.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    matcher: GlobSet,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            matcher: GlobSet::empty(),
        }
    }

    /// Returns true if no rules are present.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns a new rule set extending `self` with patterns parsed from
    /// the lines of an ignore file located at `base_dir` (root-relative,
    /// `/`-separated, empty for the walk root).
    ///
    /// Blank lines and `#` comments are skipped; trailing unescaped spaces
    /// are trimmed; leading `!` marks a whitelist entry; trailing `/`
    /// restricts the rule to directories. Unparsable globs are skipped with
    /// a warning.
    pub fn extend_from_lines<'a, I>(&self, base_dir: &str, lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rules = self.rules.clone();

        for line in lines {
            if let Some(rule) = parse_pattern(base_dir, line) {
                rules.push(rule);
            }
        }

        let mut builder = GlobSetBuilder::new();
        for rule in &rules {
            builder.add(rule.glob.clone());
        }

        let matcher = match builder.build() {
            Ok(set) => set,
            Err(err) => {
                warn!(error = %err, "failed to compile ignore rule set; no rules applied");
                return Self {
                    rules: Vec::new(),
                    matcher: GlobSet::empty(),
                };
            }
        };

        Self { rules, matcher }
    }

    /// Evaluates a root-relative, `/`-separated path against the rules.
    ///
    /// Directory-only rules are skipped unless `is_dir` is set. The highest
    /// matching rule index decides the outcome.
    pub fn evaluate(&self, rel_path: &str, is_dir: bool) -> MatchOutcome {
        let mut outcome = MatchOutcome::Unmatched;
        for idx in self.matcher.matches(rel_path) {
            let rule = &self.rules[idx];
            if rule.dir_only && !is_dir {
                continue;
            }
            outcome = if rule.whitelist {
                MatchOutcome::Whitelisted
            } else {
                MatchOutcome::Excluded
            };
        }
        outcome
    }
}

/// Parses one ignore-file line into a compiled-ready rule.
fn parse_pattern(base_dir: &str, line: &str) -> Option<Rule> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let line = trim_trailing_spaces(line);
    if line.is_empty() {
        return None;
    }

    let (whitelist, body) = if let Some(rest) = line.strip_prefix('!') {
        (true, rest.to_string())
    } else if let Some(rest) = line.strip_prefix("\\!").or_else(|| line.strip_prefix("\\#")) {
        (false, format!("{}{}", &line[1..2], rest))
    } else {
        (false, line)
    };

    let (dir_only, body) = if body.ends_with('/') {
        (true, body[..body.len() - 1].to_string())
    } else {
        (false, body)
    };
    if body.is_empty() {
        return None;
    }

    // A slash anywhere anchors the pattern to its ignore file's directory;
    // otherwise the pattern floats to any depth below it.
    let anchored = body.contains('/');
    let body = body.strip_prefix('/').unwrap_or(&body).to_string();

    let pattern = match (anchored, base_dir.is_empty()) {
        (true, true) => body,
        (true, false) => format!("{}/{}", base_dir, body),
        (false, true) => format!("**/{}", body),
        (false, false) => format!("{}/**/{}", base_dir, body),
    };

    let glob = match GlobBuilder::new(&pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
    {
        Ok(glob) => glob,
        Err(err) => {
            warn!(pattern = %pattern, error = %err, "skipping invalid ignore pattern");
            return None;
        }
    };

    Some(Rule {
        glob,
        whitelist,
        dir_only,
    })
}

/// Trims trailing spaces unless the last one is backslash-escaped.
fn trim_trailing_spaces(line: &str) -> String {
    let mut chars: Vec<char> = line.chars().collect();
    while chars.last() == Some(&' ') {
        if chars.len() >= 2 && chars[chars.len() - 2] == '\\' {
            chars.remove(chars.len() - 2);
            break;
        }
        chars.pop();
    }
    chars.into_iter().collect()
}
