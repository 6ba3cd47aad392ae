//! Network Module
//!
//! TCP connection handling.
//!
//! ## Architecture
//! - `Session`: the exchange state machine over any buffered reader/writer
//! - `DictConnection`: owns a TCP session behind a mutex
//! - One command in flight per connection

mod connection;
mod session;

pub use connection::{DictConnection, QUIT_TIMEOUT};
pub use session::Session;
