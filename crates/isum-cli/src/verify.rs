//! Checksum verification engine.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::checkfile::{parse_line, Line};
use crate::compute::{sum_file, sum_tree};
use crate::output::Emitter;
use crate::{resolve_target, Cli, CliError, EXIT_SUCCESS, EXIT_VERIFICATION_FAILURE};

#[derive(Debug, Default)]
struct Tally {
    mismatches: u64,
    read_failures: u64,
    malformed: u64,
    parsed: u64,
}

/// Verifies every checksum list named on the command line.
///
/// With no arguments the list is read from standard input and relative
/// target paths resolve against the current directory; otherwise they
/// resolve against each list's containing directory.
pub(crate) fn run_verification(cli: &Cli, out: &mut dyn Write) -> Result<i32, CliError> {
    let mut emitter = Emitter::new(out, cli.tag, cli.zero);
    let mut tally = Tally::default();
    let mut no_valid_lines = false;

    let lists: Vec<Option<PathBuf>> = if cli.paths.is_empty() {
        vec![None]
    } else {
        cli.paths.iter().cloned().map(Some).collect()
    };

    for list in lists {
        let (display, contents, base) = read_list(list.as_deref())?;
        let before = tally.parsed;
        verify_list(cli, &display, &contents, &base, &mut emitter, &mut tally)?;
        if tally.parsed == before {
            eprintln!(
                "isum: {}: no properly formatted ISCC checksum lines found",
                display
            );
            no_valid_lines = true;
        }
    }

    if !cli.status {
        if tally.malformed > 0 {
            eprintln!(
                "isum: WARNING: {} line{} improperly formatted",
                tally.malformed,
                plural(tally.malformed)
            );
        }
        if tally.read_failures > 0 {
            eprintln!(
                "isum: WARNING: {} listed file{} could not be read",
                tally.read_failures,
                plural(tally.read_failures)
            );
        }
        if tally.mismatches > 0 {
            eprintln!(
                "isum: WARNING: {} computed checksum{} did NOT match",
                tally.mismatches,
                plural(tally.mismatches)
            );
        }
    }

    let failed = tally.mismatches > 0 || tally.read_failures > 0 || no_valid_lines;
    Ok(if failed {
        EXIT_VERIFICATION_FAILURE
    } else {
        EXIT_SUCCESS
    })
}

fn plural(n: u64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn read_list(path: Option<&Path>) -> Result<(String, String, PathBuf), CliError> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| CliError::io(path.display().to_string(), e))?;
            let base = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok((path.display().to_string(), contents, base))
        }
        None => {
            let mut contents = String::new();
            std::io::stdin()
                .read_to_string(&mut contents)
                .map_err(|e| CliError::io("-", e))?;
            Ok(("-".to_string(), contents, PathBuf::from(".")))
        }
    }
}

fn verify_list(
    cli: &Cli,
    list_display: &str,
    contents: &str,
    base: &Path,
    emitter: &mut Emitter<'_>,
    tally: &mut Tally,
) -> Result<(), CliError> {
    for (idx, raw_line) in contents.lines().enumerate() {
        let line_no = (idx + 1) as u64;
        match parse_line(raw_line) {
            Line::Skip => {}
            Line::Malformed => {
                tally.malformed += 1;
                if cli.strict {
                    return Err(CliError::MalformedLine {
                        file: list_display.to_string(),
                        line: line_no,
                    });
                }
                if cli.warn {
                    eprintln!(
                        "isum: {}: {}: improperly formatted ISCC checksum line",
                        list_display, line_no
                    );
                }
            }
            Line::Entry(entry) => {
                tally.parsed += 1;
                let target = resolve_target(base, &entry.path);
                debug!(path = %target.display(), tree = entry.tree, "verifying");

                let processor = if entry.tree {
                    sum_tree(&target).map_err(|_| ())
                } else {
                    sum_file(&target).map_err(|_| ())
                };

                match processor {
                    Err(()) => {
                        tally.read_failures += 1;
                        if !cli.status {
                            emitter.plain(&format!("{}: FAILED open or read", entry.path))?;
                        }
                    }
                    Ok(processor) => {
                        let result = processor.result(entry.code.is_wide(), false)?;
                        if result.iscc == entry.code.to_string() {
                            if !cli.quiet && !cli.status {
                                emitter.plain(&format!("{}: OK", entry.path))?;
                            }
                        } else {
                            tally.mismatches += 1;
                            if !cli.status {
                                emitter.plain(&format!("{}: FAILED", entry.path))?;
                            }
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
