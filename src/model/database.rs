//! Database descriptor

use std::fmt;

use crate::error::Result;
use super::validate_name;

/// A dictionary database offered by the server
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Database {
    name: String,
    description: String,
}

impl Database {
    /// Sentinel: search every database
    pub const ALL: &'static str = "*";

    /// Sentinel: stop at the first database with a hit
    pub const FIRST_MATCH: &'static str = "!";

    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name("database", &name)?;
        Ok(Self {
            name,
            description: description.into(),
        })
    }

    /// Every database on the server
    pub fn all() -> Self {
        Self {
            name: Self::ALL.to_string(),
            description: "All databases".to_string(),
        }
    }

    /// The first database that has a result
    pub fn first_match() -> Self {
        Self {
            name: Self::FIRST_MATCH.to_string(),
            description: "First database with a match".to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether this is one of the `*` / `!` sentinels
    pub fn is_virtual(&self) -> bool {
        self.name == Self::ALL || self.name == Self::FIRST_MATCH
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.description)
    }
}
