//! Connection
//!
//! A DICT connection that owns one TCP session.

use std::collections::HashMap;
use std::io::{BufReader, BufWriter};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use indexmap::IndexSet;
use parking_lot::Mutex;

use crate::config::{Config, DEFAULT_PORT};
use crate::error::{DictError, Result};
use crate::model::{Database, Definition, MatchingStrategy};
use crate::protocol::Greeting;

use super::session::Session;

type TcpSession = Session<BufReader<TcpStream>, BufWriter<TcpStream>>;

/// Longest wait for the server's reply to `QUIT`
pub const QUIT_TIMEOUT: Duration = Duration::from_secs(1);

/// A connection to a DICT server
///
/// ## Concurrency Model
///
/// - The reply stream is only framed correctly if one exchange runs at a
///   time, so every operation holds `session` for its full
///   command → status → block(s) → status cycle.
/// - `session` is `None` once closed. A fatal error during an exchange
///   (transport failure, unframeable reply) also drops the session, since
///   the stream position is unknown afterwards.
pub struct DictConnection {
    /// Live session (None when closed)
    session: Mutex<Option<TcpSession>>,

    /// Banner read during the handshake
    greeting: Greeting,

    /// Peer address for logging
    peer_addr: String,
}

impl DictConnection {
    /// Connect to `host` on the default DICT port
    pub fn open(host: &str) -> Result<Self> {
        Self::open_with_port(host, DEFAULT_PORT)
    }

    /// Connect to `host:port` with default timeouts
    pub fn open_with_port(host: &str, port: u16) -> Result<Self> {
        Self::connect(Config::builder().host(host).port(port).build())
    }

    /// Connect using a full configuration and read the greeting.
    ///
    /// Fails if the host cannot be reached or the first status is not 220;
    /// in either case no connection exists.
    pub fn connect(config: Config) -> Result<Self> {
        config.validate()?;

        let stream = connect_stream(&config)?;
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| config.addr());

        // Disable Nagle's algorithm, commands are single short lines
        stream.set_nodelay(true)?;
        stream.set_read_timeout(config.read_timeout())?;
        stream.set_write_timeout(config.write_timeout())?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        let session = Session::handshake(
            BufReader::new(read_stream),
            BufWriter::new(write_stream),
            config.unescape_dot_stuffing,
        )
        .map_err(|e| {
            tracing::debug!("Handshake with {} failed: {}", peer_addr, e);
            e
        })?;

        tracing::debug!("Connected to {}", peer_addr);
        let greeting = session.greeting().clone();

        Ok(Self {
            session: Mutex::new(Some(session)),
            greeting,
            peer_addr,
        })
    }

    /// The server's greeting banner
    pub fn greeting(&self) -> &Greeting {
        &self.greeting
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// Whether commands can still be sent
    pub fn is_open(&self) -> bool {
        self.session.lock().is_some()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// All definitions of `word` in `database`, in server order.
    ///
    /// `database` may be [`Database::all`] or [`Database::first_match`].
    /// No definitions is an empty vector, not an error.
    pub fn definitions(&self, word: &str, database: &Database) -> Result<Vec<Definition>> {
        self.exchange(|session| session.definitions(word, database))
    }

    /// Words matching `word` under `strategy`, duplicates removed, first
    /// occurrence order kept. No match is an empty set.
    pub fn match_list(
        &self,
        word: &str,
        strategy: &MatchingStrategy,
        database: &Database,
    ) -> Result<IndexSet<String>> {
        self.exchange(|session| session.match_list(word, strategy, database))
    }

    /// Databases offered by the server, keyed by name
    pub fn database_list(&self) -> Result<HashMap<String, Database>> {
        self.exchange(|session| session.database_list())
    }

    /// Matching strategies offered by the server, in server order
    pub fn strategy_list(&self) -> Result<IndexSet<MatchingStrategy>> {
        self.exchange(|session| session.strategy_list())
    }

    /// Information page for `database`.
    ///
    /// Unlike the list operations, an unknown database is an error
    /// carrying the server's code.
    pub fn database_info(&self, database: &Database) -> Result<String> {
        self.exchange(|session| session.database_info(database))
    }

    /// Send `QUIT` and release the socket.
    ///
    /// Never fails; errors on the way out are logged and dropped. Calling
    /// it again is a no-op.
    pub fn close(&self) {
        let Some(mut session) = self.session.lock().take() else {
            return;
        };

        // Bound the wait even when the configured timeouts are disabled
        let socket = session.writer().get_ref();
        if let Err(e) = socket
            .set_read_timeout(Some(QUIT_TIMEOUT))
            .and_then(|_| socket.set_write_timeout(Some(QUIT_TIMEOUT)))
        {
            tracing::trace!("Setting QUIT timeout: {}", e);
        }

        if let Err(e) = session.quit() {
            tracing::debug!("Error during QUIT to {}: {}", self.peer_addr, e);
        }
        release(session);
        tracing::debug!("Connection to {} closed", self.peer_addr);
    }

    /// Run one exchange under the session lock
    fn exchange<T>(&self, op: impl FnOnce(&mut TcpSession) -> Result<T>) -> Result<T> {
        let mut guard = self.session.lock();
        let session = guard.as_mut().ok_or(DictError::Closed)?;

        let result = op(session);
        if let Err(e) = &result {
            if e.is_fatal() {
                tracing::warn!("Dropping connection to {}: {}", self.peer_addr, e);
                if let Some(session) = guard.take() {
                    release(session);
                }
            }
        }
        result
    }
}

impl Drop for DictConnection {
    fn drop(&mut self) {
        self.close();
    }
}

/// Shut the socket down in both directions, ignoring errors
fn release(session: TcpSession) {
    if let Err(e) = session.writer().get_ref().shutdown(Shutdown::Both) {
        tracing::trace!("Socket shutdown: {}", e);
    }
}

/// Resolve the configured address and connect to the first reachable candidate
fn connect_stream(config: &Config) -> Result<TcpStream> {
    let addrs: Vec<SocketAddr> = (config.host.as_str(), config.port).to_socket_addrs()?.collect();
    if addrs.is_empty() {
        return Err(DictError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no addresses for {}", config.addr()),
        )));
    }

    let mut last_error = None;
    for addr in addrs {
        let attempt = match config.connect_timeout() {
            Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
            None => TcpStream::connect(addr),
        };
        match attempt {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!("Connect to {} failed: {}", addr, e);
                last_error = Some(e);
            }
        }
    }

    // addrs was non-empty, so at least one attempt failed
    Err(last_error
        .map(DictError::Io)
        .unwrap_or(DictError::ConnectionLost))
}
