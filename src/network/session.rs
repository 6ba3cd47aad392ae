//! Session
//!
//! The command/reply state machine, independent of the socket type.
//!
//! Every exchange has the same shape:
//! 1. write one command line
//! 2. read one status line
//! 3. on a negative status, stop
//! 4. otherwise read the block(s) the command produces
//! 5. read the completion status
//!
//! An exchange that returns a fatal error (see [`DictError::is_fatal`])
//! leaves the stream at an unknown position; the session must be dropped.

use std::collections::HashMap;
use std::io::{BufRead, Write};

use indexmap::IndexSet;

use crate::error::{DictError, Result};
use crate::model::{Database, Definition, MatchingStrategy};
use crate::protocol::status::{
    DATABASES_PRESENT, DATABASE_INFO, DEFINITIONS_RETRIEVED, DEFINITION_FOLLOWS, MATCHES_FOUND,
    STRATEGIES_AVAILABLE,
};
use crate::protocol::{
    has_quoted_atom, join_trimmed, read_block, read_line, read_status, split_atoms,
    write_command, Command, Greeting, Status,
};

/// One server session over a buffered reader and a writer
pub struct Session<R, W> {
    reader: R,
    writer: W,
    greeting: Greeting,
    unescape_dot_stuffing: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Read the greeting banner and return a session ready for its first command
    pub fn handshake(mut reader: R, writer: W, unescape_dot_stuffing: bool) -> Result<Self> {
        let status = read_status(&mut reader)?;
        let greeting = Greeting::from_status(status)?;
        tracing::debug!("Server greeting: {}", greeting.text());

        Ok(Self {
            reader,
            writer,
            greeting,
            unescape_dot_stuffing,
        })
    }

    pub fn greeting(&self) -> &Greeting {
        &self.greeting
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// `DEFINE <database> <word>`; no definitions is an empty result
    pub fn definitions(&mut self, word: &str, database: &Database) -> Result<Vec<Definition>> {
        validate_word(word)?;
        let status = self.send(&Command::Define {
            database: database.name().to_string(),
            word: word.to_string(),
        })?;
        if status.is_negative() {
            tracing::debug!("DEFINE {} {}: {}", database.name(), word, status.code());
            return Ok(Vec::new());
        }
        if status.is_completion() {
            return Ok(Vec::new());
        }
        expect_preliminary(&status, DEFINITIONS_RETRIEVED)?;

        let mut definitions = Vec::new();
        loop {
            let line = read_line(&mut self.reader)?;
            let status = Status::parse(&line)?;
            if status.is_completion() {
                break;
            }
            if status.code() != DEFINITION_FOLLOWS {
                return Err(unexpected(&status, "definition"));
            }

            // 151 "word" database "database description"
            let atoms = split_atoms(&line);
            let source = atoms.get(2).filter(|db| !db.is_empty()).ok_or_else(|| {
                DictError::malformed(format!("definition header without database: {:?}", line))
            })?;

            let body = read_block(&mut self.reader, self.unescape_dot_stuffing)?;
            definitions.push(Definition::new(word, source.as_str(), join_trimmed(&body)));
        }

        tracing::debug!("DEFINE {} {}: {} definitions", database.name(), word, definitions.len());
        Ok(definitions)
    }

    /// `MATCH <database> <strategy> <word>`; no match is an empty set
    pub fn match_list(
        &mut self,
        word: &str,
        strategy: &MatchingStrategy,
        database: &Database,
    ) -> Result<IndexSet<String>> {
        validate_word(word)?;
        let mut matches = IndexSet::new();
        let lines = match self.block_reply(
            &Command::Match {
                database: database.name().to_string(),
                strategy: strategy.name().to_string(),
                word: word.to_string(),
            },
            MATCHES_FOUND,
        )? {
            Some(lines) => lines,
            None => return Ok(matches),
        };

        // db "word"
        for line in lines.iter().filter(|l| has_quoted_atom(l)) {
            if let Some(found) = split_atoms(line).into_iter().nth(1) {
                matches.insert(found);
            }
        }
        Ok(matches)
    }

    /// `SHOW DB`, keyed by database name
    pub fn database_list(&mut self) -> Result<HashMap<String, Database>> {
        let mut databases = HashMap::new();
        let Some(lines) = self.block_reply(&Command::ShowDatabases, DATABASES_PRESENT)? else {
            return Ok(databases);
        };

        for (name, description) in descriptor_pairs(&lines) {
            match Database::new(name, description) {
                Ok(db) => {
                    databases.insert(db.name().to_string(), db);
                }
                Err(e) => tracing::warn!("Skipping database entry: {}", e),
            }
        }
        Ok(databases)
    }

    /// `SHOW STRAT`, in server order
    pub fn strategy_list(&mut self) -> Result<IndexSet<MatchingStrategy>> {
        let mut strategies = IndexSet::new();
        let Some(lines) = self.block_reply(&Command::ShowStrategies, STRATEGIES_AVAILABLE)? else {
            return Ok(strategies);
        };

        for (name, description) in descriptor_pairs(&lines) {
            match MatchingStrategy::new(name, description) {
                Ok(strategy) => {
                    strategies.insert(strategy);
                }
                Err(e) => tracing::warn!("Skipping strategy entry: {}", e),
            }
        }
        Ok(strategies)
    }

    /// `SHOW INFO <database>`; an unknown database is an error
    pub fn database_info(&mut self, database: &Database) -> Result<String> {
        let command = Command::ShowInfo {
            database: database.name().to_string(),
        };
        let status = self.send(&command)?;
        if status.is_negative() {
            return Err(status.into_error());
        }
        expect_preliminary(&status, DATABASE_INFO)?;

        let lines = read_block(&mut self.reader, self.unescape_dot_stuffing)?;
        self.finish()?;
        Ok(lines.join("\n"))
    }

    /// Send `QUIT` and read its reply line
    pub fn quit(&mut self) -> Result<()> {
        write_command(&mut self.writer, &Command::Quit)?;
        let reply = read_line(&mut self.reader)?;
        tracing::debug!("QUIT: {}", reply);
        Ok(())
    }

    // =========================================================================
    // Exchange Helpers
    // =========================================================================

    /// Write a command and read its first status line
    fn send(&mut self, command: &Command) -> Result<Status> {
        tracing::debug!("Sending {:?}", command.command_type());
        write_command(&mut self.writer, command)?;
        read_status(&mut self.reader)
    }

    /// Run a command answered by at most one block.
    ///
    /// `None` for a negative reply, otherwise the block lines; the
    /// completion status has been consumed either way.
    fn block_reply(&mut self, command: &Command, expected: u16) -> Result<Option<Vec<String>>> {
        let status = self.send(command)?;
        if status.is_negative() {
            tracing::debug!("{:?}: {}", command.command_type(), status.code());
            return Ok(None);
        }
        if status.is_completion() {
            return Ok(Some(Vec::new()));
        }
        expect_preliminary(&status, expected)?;

        let lines = read_block(&mut self.reader, self.unescape_dot_stuffing)?;
        self.finish()?;
        Ok(Some(lines))
    }

    /// Read the status that closes an exchange.
    ///
    /// A negative status ends the exchange and is returned with its code.
    /// Anything else (another 1yz announcing more text) cannot be framed.
    fn finish(&mut self) -> Result<()> {
        let status = read_status(&mut self.reader)?;
        if status.is_completion() {
            Ok(())
        } else if status.is_negative() {
            Err(status.into_error())
        } else {
            Err(unexpected(&status, "completion"))
        }
    }
}

// =============================================================================
// Reply Decoding
// =============================================================================

/// `(name, description)` from every `name "description"` line
fn descriptor_pairs(lines: &[String]) -> impl Iterator<Item = (String, String)> + '_ {
    lines.iter().filter(|l| has_quoted_atom(l)).filter_map(|line| {
        let mut atoms = split_atoms(line).into_iter();
        match (atoms.next(), atoms.next()) {
            (Some(name), Some(description)) => Some((name, description)),
            _ => None,
        }
    })
}

/// A 1yz status other than the one the command produces means the
/// following lines cannot be framed.
fn expect_preliminary(status: &Status, expected: u16) -> Result<()> {
    if status.code() == expected {
        Ok(())
    } else {
        Err(unexpected(status, &expected.to_string()))
    }
}

fn unexpected(status: &Status, wanted: &str) -> DictError {
    DictError::malformed(format!(
        "unexpected reply {} {} (wanted {})",
        status.code(),
        status.detail().unwrap_or(""),
        wanted
    ))
}

fn validate_word(word: &str) -> Result<()> {
    if word.trim().is_empty() {
        return Err(DictError::InvalidArgument("word must not be empty".to_string()));
    }
    if word.contains(|c: char| c == '\r' || c == '\n') {
        return Err(DictError::InvalidArgument(
            "word must not contain line breaks".to_string(),
        ));
    }
    Ok(())
}
