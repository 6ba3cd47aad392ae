//! Protocol Tests
//!
//! Exercise the line-level parsers through the public API.
