//! Definition record

use std::fmt;

/// One definition of a word, as found in one database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    word: String,
    database: String,
    body: String,
}

impl Definition {
    pub fn new(word: impl Into<String>, database: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            database: database.into(),
            body: body.into(),
        }
    }

    /// The word that was looked up
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Name of the database the definition came from
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Definition text, lines joined with `\n`
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.word, self.database)?;
        write!(f, "{}", self.body)
    }
}
