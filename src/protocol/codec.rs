//! Protocol codec
//!
//! Line-level encoding and decoding for the wire protocol.
//!
//! ## Wire Format
//!
//! Both directions carry text lines. The client terminates its lines with
//! CRLF; replies may use CRLF or a bare LF.
//!
//! ### Commands
//! ```text
//! DEFINE <database> <word>
//! MATCH <database> <strategy> <word>
//! SHOW DB | SHOW STRAT | SHOW INFO <database>
//! QUIT
//! ```
//!
//! ### Replies
//! ```text
//! <code> <text>          status line
//! <line>*                text block (after some 1yz codes)
//! .                      block terminator
//! ```

use std::io::{BufRead, Read, Write};

use crate::error::{DictError, Result};
use super::atoms::quote_atom;
use super::{Command, Status};

/// Line terminator for outgoing commands
pub const LINE_TERMINATOR: &str = "\r\n";

/// Longest reply line accepted before the stream is considered garbage
pub const MAX_LINE_LEN: usize = 64 * 1024;

// =============================================================================
// Command Encoding
// =============================================================================

/// Render a command as one wire line, without the terminator
pub fn command_line(command: &Command) -> String {
    match command {
        Command::Define { database, word } => {
            format!("DEFINE {} {}", quote_atom(database), quote_atom(word))
        }
        Command::Match {
            database,
            strategy,
            word,
        } => format!(
            "MATCH {} {} {}",
            quote_atom(database),
            quote_atom(strategy),
            quote_atom(word)
        ),
        Command::ShowDatabases => "SHOW DB".to_string(),
        Command::ShowStrategies => "SHOW STRAT".to_string(),
        Command::ShowInfo { database } => format!("SHOW INFO {}", quote_atom(database)),
        Command::Quit => "QUIT".to_string(),
    }
}

/// Encode a command to bytes, terminator included
pub fn encode_command(command: &Command) -> Vec<u8> {
    let mut line = command_line(command);
    line.push_str(LINE_TERMINATOR);
    line.into_bytes()
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write a command to a stream and flush it
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    let bytes = encode_command(command);
    tracing::trace!("C: {}", command_line(command));
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read one reply line, with the CRLF or LF stripped.
///
/// End of stream is `ConnectionLost`: the server never closes mid-reply.
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut buf = Vec::new();
    let n = reader
        .by_ref()
        .take(MAX_LINE_LEN as u64 + 1)
        .read_until(b'\n', &mut buf)?;
    if n == 0 {
        return Err(DictError::ConnectionLost);
    }
    if buf.last() != Some(&b'\n') {
        if buf.len() > MAX_LINE_LEN {
            return Err(DictError::malformed(format!(
                "reply line longer than {} bytes",
                MAX_LINE_LEN
            )));
        }
        // Stream ended in the middle of a line
        return Err(DictError::ConnectionLost);
    }

    buf.pop();
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }

    let line = String::from_utf8_lossy(&buf).into_owned();
    tracing::trace!("S: {}", line);
    Ok(line)
}

/// Read and parse one status line
pub fn read_status<R: BufRead>(reader: &mut R) -> Result<Status> {
    let line = read_line(reader)?;
    Status::parse(&line)
}
