//! `.ls8` program text format parsing and file loading.
//!
//! A program file is a sequence of newline-delimited lines, each carrying
//! one memory byte written as an 8-bit binary literal:
//!
//! ```text
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! 01000111 # PRN R0
//! 00000000
//! 00000001 # HLT
//! ```
//!
//! `#` starts a comment; blank and comment-only lines are skipped; lines
//! that do not parse as an 8-bit binary value are skipped with a warning.
//! Valid bytes fill memory from address 0 in file order.

use crate::emulator::errors::CpuError;
use crate::warn;
use std::fs;
use std::path::Path;

const COMMENT_CHAR: char = '#';

/// A loaded program: the raw bytes to copy into RAM at address 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    /// Parses program source text.
    ///
    /// Never fails: malformed lines are recovered locally by skipping them,
    /// per the program format contract.
    pub fn from_source(source: &str) -> Self {
        let mut bytes = Vec::new();
        for (line_no, line) in source.lines().enumerate() {
            let code = line.split(COMMENT_CHAR).next().unwrap_or("").trim();
            if code.is_empty() {
                continue;
            }
            match u8::from_str_radix(code, 2) {
                Ok(byte) => bytes.push(byte),
                Err(_) => {
                    warn!(
                        "line {}: not an 8-bit binary literal, skipping: {:?}",
                        line_no + 1,
                        code
                    );
                }
            }
        }
        Self { bytes }
    }

    /// Reads and parses a program file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CpuError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|e| CpuError::Io(format!("{}: {e}", path.display())))?;
        Ok(Self::from_source(&source))
    }

    /// The program bytes in file order.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes in the program.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if no line parsed to a byte.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_bytes() {
        let program = Program::from_source("10000010\n00000000\n00001000\n");
        assert_eq!(program.bytes(), &[0x82, 0x00, 0x08]);
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let source = "\
# print8.ls8

10000010 # LDI R0,8
00000000
00001000

# print it
01000111 # PRN R0
00000000
00000001 # HLT
";
        let program = Program::from_source(source);
        assert_eq!(program.bytes(), &[0x82, 0x00, 0x08, 0x47, 0x00, 0x01]);
    }

    #[test]
    fn skips_malformed_lines() {
        let source = "10000010\nnot a byte\n111111111\n2\n00000001\n";
        let program = Program::from_source(source);
        // "111111111" is nine bits (overflows u8), "2" is not binary.
        assert_eq!(program.bytes(), &[0x82, 0x01]);
    }

    #[test]
    fn comment_only_file_is_empty() {
        let program = Program::from_source("# nothing here\n\n   \n");
        assert!(program.is_empty());
        assert_eq!(program.len(), 0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Program::from_file("/no/such/file.ls8").unwrap_err();
        assert!(matches!(err, CpuError::Io(msg) if msg.contains("/no/such/file.ls8")));
    }
}
