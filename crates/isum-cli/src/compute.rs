//! Stream and tree digest computation.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;

use isum_code::IsccSumProcessor;
use isum_walk::treewalk_iscc;

use crate::CliError;

/// File read buffer size (2 MiB). A throughput knob, not a correctness
/// boundary: digests are independent of read slicing.
pub const IO_READ_SIZE: usize = 2 * 1024 * 1024;

/// Feeds an entire reader into a fresh ISCC-SUM processor.
pub fn sum_reader<R: Read>(reader: &mut R) -> io::Result<IsccSumProcessor> {
    let mut processor = IsccSumProcessor::new();
    fill_processor(reader, &mut processor)?;
    Ok(processor)
}

/// Computes the processor for a regular file.
///
/// Symlinks and special files are rejected before opening.
pub fn sum_file(path: &Path) -> io::Result<IsccSumProcessor> {
    let metadata = std::fs::symlink_metadata(path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }

    let mut file = File::open(path)?;
    sum_reader(&mut file)
}

/// Computes the processor for standard input.
pub fn sum_stdin() -> io::Result<IsccSumProcessor> {
    let stdin = io::stdin();
    let mut lock = stdin.lock();
    sum_reader(&mut lock)
}

/// Computes one processor across every file of a directory tree.
///
/// Files are consumed in deterministic `treewalk_iscc` order, so the tree
/// digest equals that of the concatenated file contents in that order.
pub fn sum_tree(dir: &Path) -> Result<IsccSumProcessor, CliError> {
    let mut processor = IsccSumProcessor::new();

    let files = treewalk_iscc(dir)?;
    debug!(dir = %dir.display(), files = files.len(), "hashing tree");
    for path in files {
        let mut file =
            File::open(&path).map_err(|e| CliError::io(path.display().to_string(), e))?;
        fill_processor(&mut file, &mut processor)
            .map_err(|e| CliError::io(path.display().to_string(), e))?;
    }

    Ok(processor)
}

fn fill_processor<R: Read>(reader: &mut R, processor: &mut IsccSumProcessor) -> io::Result<()> {
    let mut buffer = vec![0u8; IO_READ_SIZE];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        processor.update(&buffer[..bytes_read]);
    }
    Ok(())
}
