//! Model Module
//!
//! Immutable records returned by connection operations.

mod database;
mod definition;
mod strategy;

pub use database::Database;
pub use definition::Definition;
pub use strategy::MatchingStrategy;

use crate::error::{DictError, Result};

/// Reject names that cannot be sent as a command atom
fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DictError::InvalidArgument(format!(
            "{} name must not be empty",
            kind
        )));
    }
    if name.contains(|c: char| c == '\r' || c == '\n') {
        return Err(DictError::InvalidArgument(format!(
            "{} name must not contain line breaks",
            kind
        )));
    }
    Ok(())
}
