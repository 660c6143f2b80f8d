//! Command-line option model.

use std::path::PathBuf;

use clap::Parser;

/// Compute and verify ISCC (ISO 24138) checksums.
///
/// Each checksum is a 2-byte self-describing header followed by a composite
/// of Data-Code and Instance-Code (BLAKE3) components. All input is
/// processed as binary. Unlike exact-only checksum tools, the Data-Code
/// component supports similarity matching by Hamming distance.
#[derive(Parser, Debug)]
#[command(name = "isum")]
#[command(version, about = "Compute and verify ISCC checksums", long_about = None)]
#[command(after_help = "Exit status: 0 if OK, 1 if checksum verification fails, 2 if trouble.")]
pub struct Cli {
    /// Read checksums from PATHs and verify them
    #[arg(short = 'c', long)]
    pub check: bool,

    /// Create BSD-style checksum lines
    #[arg(long)]
    pub tag: bool,

    /// End each output record with NUL, not newline
    #[arg(short = 'z', long)]
    pub zero: bool,

    /// Generate narrow 2x64-bit codes (default: 2x128-bit wide)
    #[arg(long)]
    pub narrow: bool,

    /// Also emit the standalone Data-Code and Instance-Code units
    #[arg(long)]
    pub units: bool,

    /// Group inputs by Data-Code similarity
    #[arg(long)]
    pub similar: bool,

    /// Maximum Hamming distance for --similar matching
    #[arg(long, value_name = "N", default_value_t = 12)]
    pub threshold: u32,

    /// Treat a single directory as one logical object
    #[arg(short = 't', long)]
    pub tree: bool,

    /// Verification: don't print OK for verified files
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verification: no output, exit status carries the result
    #[arg(long)]
    pub status: bool,

    /// Verification: warn about improperly formatted checksum lines
    #[arg(short = 'w', long)]
    pub warn: bool,

    /// Verification: improperly formatted checksum lines are fatal
    #[arg(long)]
    pub strict: bool,

    /// Write output to PATH instead of standard output
    #[arg(short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Files or directories to process; standard input when absent
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}
