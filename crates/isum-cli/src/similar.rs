//! Similarity clustering by Data-Code Hamming distance.

use std::io::Write;

use tracing::debug;

use isum_core::IsccCode;

use crate::compute::{sum_file, sum_stdin};
use crate::expand::{expand_paths, Source};
use crate::output::Emitter;
use crate::{Cli, CliError, EXIT_ERROR, EXIT_SUCCESS};

/// One input with its computed code.
#[derive(Debug, Clone)]
pub struct FileCode {
    /// Display name from expansion
    pub display: String,
    /// Computed ISCC-SUM code
    pub code: IsccCode,
}

/// A similarity group: the reference plus members within threshold.
#[derive(Debug, Clone)]
pub struct Group {
    /// First input assigned to the group
    pub reference: FileCode,
    /// Other members with their distance to the reference
    pub members: Vec<(u32, FileCode)>,
}

/// Bitwise Hamming distance between two equal-length byte strings.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> u32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x ^ y).count_ones()).sum()
}

/// Greedy single-pass grouping.
///
/// Each input joins the first existing group whose reference Data-Code is
/// within `threshold`, or founds a new group. Members sort ascending by
/// distance with input order breaking ties.
pub fn cluster(files: Vec<FileCode>, threshold: u32) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();

    'inputs: for file in files {
        let body = match file.code.data_body() {
            Ok(body) => body.to_vec(),
            Err(_) => continue,
        };
        for group in &mut groups {
            let reference = match group.reference.code.data_body() {
                Ok(body) => body,
                Err(_) => continue,
            };
            if reference.len() != body.len() {
                continue;
            }
            let distance = hamming_distance(reference, &body);
            if distance <= threshold {
                group.members.push((distance, file));
                continue 'inputs;
            }
        }
        groups.push(Group {
            reference: file,
            members: Vec::new(),
        });
    }

    for group in &mut groups {
        group.members.sort_by_key(|(distance, _)| *distance);
    }
    groups
}

/// Computes codes for every expanded input and emits similarity groups.
pub(crate) fn run_similarity(cli: &Cli, out: &mut dyn Write) -> Result<i32, CliError> {
    let (targets, mut had_errors) = expand_paths(&cli.paths);
    if targets.len() < 2 {
        return Err(CliError::Usage(
            "--similar requires at least 2 files to compare".to_string(),
        ));
    }

    let mut files = Vec::new();
    for target in targets {
        let processor = match &target.source {
            Source::Stdin => sum_stdin(),
            Source::File(path) => sum_file(path),
        };
        match processor {
            Ok(processor) => {
                let result = processor.result(!cli.narrow, false)?;
                let code: IsccCode = result.iscc.parse()?;
                files.push(FileCode {
                    display: target.display,
                    code,
                });
            }
            Err(err) => {
                eprintln!("isum: {}: {}", target.display, err);
                had_errors = true;
            }
        }
    }

    let groups = cluster(files, cli.threshold);
    debug!(groups = groups.len(), threshold = cli.threshold, "clustered inputs");

    let mut emitter = Emitter::new(out, cli.tag, cli.zero);
    let mut first = true;
    for group in groups.iter().filter(|g| !g.members.is_empty()) {
        if !first {
            emitter.blank()?;
        }
        first = false;

        emitter.record(&group.reference.code.to_string(), &group.reference.display)?;
        for (distance, member) in &group.members {
            let line = if cli.tag {
                format!("~{} ISCC ({}) = {}", distance, member.display, member.code)
            } else {
                format!("~{} {} *{}", distance, member.code, member.display)
            };
            emitter.continuation(&line)?;
        }
    }

    Ok(if had_errors { EXIT_ERROR } else { EXIT_SUCCESS })
}
