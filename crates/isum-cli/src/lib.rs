//! Checksum-tool orchestration.
//!
//! Implements the observable surface of the `isum` binary: option model,
//! path expansion, record formatting, checksum-file verification and
//! similarity clustering. The binary itself only parses arguments, installs
//! logging and maps [`run`] to a process exit code.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod checkfile;
mod compute;
mod expand;
mod opts;
mod output;
mod similar;
mod verify;

pub use checkfile::{parse_line, CheckEntry, Line};
pub use compute::{sum_file, sum_reader, sum_stdin, sum_tree, IO_READ_SIZE};
pub use expand::{expand_paths, Source, Target};
pub use opts::Cli;
pub use output::Emitter;
pub use similar::{cluster, hamming_distance, FileCode, Group};

use std::io::Write;
use std::path::Path;

use thiserror::Error;

use isum_core::CodecError;
use isum_walk::WalkError;

/// Exit code: everything succeeded.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code: one or more verification mismatches or missing targets.
pub const EXIT_VERIFICATION_FAILURE: i32 = 1;
/// Exit code: I/O or format trouble that prevents meaningful operation.
pub const EXIT_ERROR: i32 = 2;

/// Fatal errors that abort the run with exit code 2.
///
/// Per-file generation failures are not represented here; they are reported
/// to stderr as they occur and only influence the final exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Conflicting or invalid option usage
    #[error("{0}")]
    Usage(String),

    /// I/O failure tied to a named path
    #[error("{path}: {source}")]
    Io {
        /// Display path of the failing target
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// Failure writing the output stream
    #[error("write error: {0}")]
    Output(#[from] std::io::Error),

    /// Traversal failure
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// Code packing or parsing failure
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Malformed checksum line under `--strict`
    #[error("{file}: {line}: improperly formatted ISCC checksum line")]
    MalformedLine {
        /// Checksum file containing the line
        file: String,
        /// 1-based line number
        line: u64,
    },
}

impl CliError {
    fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Runs the tool against parsed options and returns the process exit code.
pub fn run(cli: &Cli) -> Result<i32, CliError> {
    validate_options(cli)?;

    let mut sink = output::open_sink(cli.output.as_deref())?;
    let code = if cli.check {
        verify::run_verification(cli, sink.as_mut())?
    } else if cli.similar {
        similar::run_similarity(cli, sink.as_mut())?
    } else if cli.tree {
        run_tree(cli, sink.as_mut())?
    } else {
        run_generation(cli, sink.as_mut())?
    };
    sink.flush()?;
    Ok(code)
}

fn validate_options(cli: &Cli) -> Result<(), CliError> {
    if cli.similar && cli.check {
        return Err(CliError::Usage(
            "--similar cannot be used with -c/--check".to_string(),
        ));
    }
    if cli.tree && cli.check {
        return Err(CliError::Usage(
            "--tree cannot be used with -c/--check".to_string(),
        ));
    }
    if cli.tree && cli.similar {
        return Err(CliError::Usage(
            "--tree cannot be used with --similar".to_string(),
        ));
    }
    if cli.tree && cli.paths.len() != 1 {
        return Err(CliError::Usage(
            "--tree requires exactly one directory argument".to_string(),
        ));
    }
    Ok(())
}

/// Default checksum generation over expanded inputs.
fn run_generation(cli: &Cli, out: &mut dyn Write) -> Result<i32, CliError> {
    let (targets, mut had_errors) = expand_paths(&cli.paths);
    let mut emitter = Emitter::new(out, cli.tag, cli.zero);

    for target in targets {
        let processor = match &target.source {
            Source::Stdin => compute::sum_stdin(),
            Source::File(path) => sum_file(path),
        };
        let processor = match processor {
            Ok(p) => p,
            Err(err) => {
                eprintln!("isum: {}: {}", target.display, err);
                had_errors = true;
                continue;
            }
        };

        let result = processor.result(!cli.narrow, cli.units)?;
        emitter.record(&result.iscc, &target.display)?;
        if let Some(units) = &result.units {
            for unit in units {
                emitter.continuation(unit)?;
            }
        }
    }

    Ok(if had_errors { EXIT_ERROR } else { EXIT_SUCCESS })
}

/// Tree mode: one code over every file of a single directory.
fn run_tree(cli: &Cli, out: &mut dyn Write) -> Result<i32, CliError> {
    let dir = &cli.paths[0];
    let metadata = std::fs::symlink_metadata(dir)
        .map_err(|e| CliError::io(dir.display().to_string(), e))?;
    if !metadata.is_dir() {
        return Err(CliError::Usage(
            "--tree requires a directory argument".to_string(),
        ));
    }

    let processor = sum_tree(dir)?;
    let result = processor.result(!cli.narrow, cli.units)?;

    let mut display = dir.display().to_string();
    if !display.ends_with('/') {
        display.push('/');
    }

    let mut emitter = Emitter::new(out, cli.tag, cli.zero);
    emitter.record(&result.iscc, &display)?;
    if let Some(units) = &result.units {
        for unit in units {
            emitter.continuation(unit)?;
        }
    }

    Ok(EXIT_SUCCESS)
}

/// Resolves a checksum-file-relative target path.
fn resolve_target(base: &Path, path: &str) -> std::path::PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        base.join(candidate)
    }
}
