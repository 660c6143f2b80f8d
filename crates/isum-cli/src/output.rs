//! Record formatting and the output sink.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::CliError;

/// Opens the record sink: a file for `-o PATH`, buffered stdout otherwise.
///
/// Files are written in binary with UTF-8 content and LF (or NUL) record
/// terminators regardless of platform.
pub fn open_sink(path: Option<&Path>) -> Result<Box<dyn Write>, CliError> {
    match path {
        Some(path) => {
            let file =
                File::create(path).map_err(|e| CliError::io(path.display().to_string(), e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

/// Writes checksum records in the selected format and termination style.
pub struct Emitter<'a> {
    out: &'a mut dyn Write,
    tag: bool,
    zero: bool,
}

impl<'a> Emitter<'a> {
    /// Creates an emitter over a sink.
    pub fn new(out: &'a mut dyn Write, tag: bool, zero: bool) -> Self {
        Self { out, tag, zero }
    }

    fn terminator(&self) -> &'static [u8] {
        if self.zero {
            b"\0"
        } else {
            b"\n"
        }
    }

    /// Writes one main checksum record for a path.
    pub fn record(&mut self, iscc: &str, display: &str) -> io::Result<()> {
        if self.tag {
            write!(self.out, "ISCC ({}) = {}", display, iscc)?;
        } else {
            write!(self.out, "{} *{}", iscc, display)?;
        }
        self.out.write_all(self.terminator())
    }

    /// Writes a two-space-indented continuation record (units, members).
    pub fn continuation(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "  {}", text)?;
        self.out.write_all(self.terminator())
    }

    /// Writes an unindented plain record (verification statuses).
    pub fn plain(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text)?;
        self.out.write_all(self.terminator())
    }

    /// Writes an empty record (group separator).
    pub fn blank(&mut self) -> io::Result<()> {
        self.out.write_all(self.terminator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<F: FnOnce(&mut Emitter<'_>)>(tag: bool, zero: bool, f: F) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut emitter = Emitter::new(&mut buf, tag, zero);
        f(&mut emitter);
        buf
    }

    #[test]
    fn test_default_record_format() {
        let buf = collect(false, false, |e| {
            e.record("ISCC:ABCD", "file.txt").unwrap();
        });
        assert_eq!(buf, b"ISCC:ABCD *file.txt\n");
    }

    #[test]
    fn test_bsd_record_format() {
        let buf = collect(true, false, |e| {
            e.record("ISCC:ABCD", "file.txt").unwrap();
        });
        assert_eq!(buf, b"ISCC (file.txt) = ISCC:ABCD\n");
    }

    #[test]
    fn test_zero_terminator_everywhere() {
        let buf = collect(false, true, |e| {
            e.record("ISCC:ABCD", "a").unwrap();
            e.continuation("ISCC:UNIT").unwrap();
            e.blank().unwrap();
        });
        assert_eq!(buf, b"ISCC:ABCD *a\0  ISCC:UNIT\0\0");
    }

    #[test]
    fn test_continuation_indent() {
        let buf = collect(false, false, |e| {
            e.continuation("~3 ISCC:X *b").unwrap();
        });
        assert_eq!(buf, b"  ~3 ISCC:X *b\n");
    }
}
