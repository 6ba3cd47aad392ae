//! Matching strategy descriptor

use std::fmt;

use crate::error::Result;
use super::validate_name;

/// A word-matching algorithm offered by the server (exact, prefix, soundex, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchingStrategy {
    name: String,
    description: String,
}

impl MatchingStrategy {
    /// Sentinel: let the server pick its default strategy
    pub const SERVER_DEFAULT: &'static str = ".";

    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name("strategy", &name)?;
        Ok(Self {
            name,
            description: description.into(),
        })
    }

    pub fn server_default() -> Self {
        Self {
            name: Self::SERVER_DEFAULT.to_string(),
            description: "Server default".to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for MatchingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.description)
    }
}
