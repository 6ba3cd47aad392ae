//! # dictclient
//!
//! A blocking client for the DICT dictionary lookup protocol (RFC 2229):
//! - Definition lookup across one or all databases
//! - Word matching under server-provided strategies
//! - Database and strategy enumeration, database info pages
//! - One serialized exchange at a time per connection
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      DictConnection                          │
//! │             (Mutex-guarded session, lifecycle)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Session                               │
//! │        command → status → block(s) → completion              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼────────────┐
//!          │            │            │
//!          ▼            ▼            ▼
//!   ┌────────────┐ ┌──────────┐ ┌──────────┐
//!   │   Status   │ │  Block   │ │  Atoms   │
//!   │   Parser   │ │  Reader  │ │Tokenizer │
//!   └────────────┘ └──────────┘ └──────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use dictclient::{Database, DictConnection};
//!
//! let conn = DictConnection::open("dict.org")?;
//! for def in conn.definitions("hello", &Database::all())? {
//!     println!("{}", def);
//! }
//! conn.close();
//! # Ok::<(), dictclient::DictError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod network;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::{Config, DEFAULT_PORT};
pub use error::{DictError, Result};
pub use model::{Database, Definition, MatchingStrategy};
pub use network::DictConnection;
pub use protocol::{Greeting, Status};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of dictclient
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
