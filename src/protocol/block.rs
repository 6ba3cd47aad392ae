//! Text block reader
//!
//! A block is the run of lines following a 1yz status, ended by a line
//! holding a single period.

use std::io::BufRead;

use crate::error::Result;
use super::codec::read_line;

/// Block terminator line
pub const TERMINATOR: &str = ".";

/// Read a block up to and including its terminator.
///
/// Returns the data lines; the terminator is consumed but not returned.
/// With `unescape` set, a leading `..` is turned back into `.`.
pub fn read_block<R: BufRead>(reader: &mut R, unescape: bool) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    loop {
        let line = read_line(reader)?;
        if line == TERMINATOR {
            return Ok(lines);
        }
        if unescape && line.starts_with("..") {
            lines.push(line[1..].to_string());
        } else {
            lines.push(line);
        }
    }
}

/// Join body lines, dropping leading and trailing blank lines
pub fn join_trimmed(lines: &[String]) -> String {
    let is_blank = |line: &&String| line.trim().is_empty();
    let start = lines.iter().position(|l| !is_blank(&l)).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !is_blank(&l)).map_or(start, |i| i + 1);
    lines[start..end].join("\n")
}
