//! Command definitions
//!
//! Represents commands sent to the server.

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Define,
    Match,
    ShowDatabases,
    ShowStrategies,
    ShowInfo,
    Quit,
}

/// A client command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Look up definitions of a word
    Define { database: String, word: String },

    /// List words matching a pattern under a strategy
    Match {
        database: String,
        strategy: String,
        word: String,
    },

    /// List databases
    ShowDatabases,

    /// List matching strategies
    ShowStrategies,

    /// Fetch the information page of one database
    ShowInfo { database: String },

    /// End the session
    Quit,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Define { .. } => CommandType::Define,
            Command::Match { .. } => CommandType::Match,
            Command::ShowDatabases => CommandType::ShowDatabases,
            Command::ShowStrategies => CommandType::ShowStrategies,
            Command::ShowInfo { .. } => CommandType::ShowInfo,
            Command::Quit => CommandType::Quit,
        }
    }
}
