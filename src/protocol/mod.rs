//! Protocol Module
//!
//! Defines the DICT wire protocol (RFC 2229) as seen by a client.
//!
//! ## Exchange Shape
//! ```text
//! C: DEFINE * hello
//! S: 150 2 definitions retrieved          ← preliminary status
//! S: 151 "hello" wn "WordNet (r) 3.0"     ← per-definition status
//! S: ...definition text...                ← block
//! S: .                                    ← terminator
//! S: 151 "hello" gcide "GNU Collaborative..."
//! S: ...
//! S: .
//! S: 250 ok                               ← completion status
//! ```
//!
//! ### Status Classes
//! - 1yz: positive preliminary (text follows)
//! - 2yz: positive completion
//! - 3yz: positive intermediate
//! - 4yz: transient negative
//! - 5yz: permanent negative

mod atoms;
mod block;
mod codec;
mod command;
mod greeting;
pub mod status;

pub use atoms::{has_quoted_atom, quote_atom, split_atoms};
pub use block::{join_trimmed, read_block, TERMINATOR};
pub use codec::{
    command_line, encode_command, read_line, read_status, write_command, LINE_TERMINATOR,
    MAX_LINE_LEN,
};
pub use command::{Command, CommandType};
pub use greeting::Greeting;
pub use status::{Status, StatusClass};
