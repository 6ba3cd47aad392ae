//! Tests for DictConnection operations
//!
//! These tests verify:
//! - Definition, match, database, strategy and info replies
//! - Negative replies as empty results (or errors, for info)
//! - Framing across sequential exchanges
//! - Serialized access from several threads

use std::sync::Arc;
use std::thread;

use dictclient::{Config, Database, DictConnection, DictError, MatchingStrategy};

use crate::mock_server::{reply, MockServer, Step};

// =============================================================================
// Helper Functions
// =============================================================================

fn connect(server: &MockServer) -> DictConnection {
    DictConnection::connect(server.config()).unwrap()
}

fn wordnet() -> Database {
    Database::new("wn", "WordNet (r) 3.0 (2006)").unwrap()
}

const DATABASES_REPLY: &str = concat!(
    "110 2 databases present\r\n",
    "gcide \"The Collaborative International Dictionary of English v.0.48\"\r\n",
    "wn \"WordNet (r) 3.0 (2006)\"\r\n",
    ".\r\n",
    "250 ok\r\n",
);

// =============================================================================
// Definition Tests
// =============================================================================

#[test]
fn test_definitions_two_blocks_in_order() {
    let server = MockServer::start(vec![reply(concat!(
        "150 2 definitions retrieved\r\n",
        "151 \"hello\" gcide \"The Collaborative International Dictionary of English v.0.48\"\r\n",
        "Hello \\Hel*lo\"\\, interj. & n.\r\n",
        "   An exclamation used as a greeting.\r\n",
        ".\r\n",
        "151 \"hello\" wn \"WordNet (r) 3.0 (2006)\"\r\n",
        "\r\n",
        "hello\r\n",
        "    n 1: an expression of greeting\r\n",
        "\r\n",
        ".\r\n",
        "250 ok [d/m/c = 2/0/16; 0.000r 0.000u 0.000s]\r\n",
    ))]);
    let conn = connect(&server);

    let definitions = conn.definitions("hello", &Database::all()).unwrap();
    assert_eq!(definitions.len(), 2);

    assert_eq!(definitions[0].word(), "hello");
    assert_eq!(definitions[0].database(), "gcide");
    assert_eq!(
        definitions[0].body(),
        "Hello \\Hel*lo\"\\, interj. & n.\n   An exclamation used as a greeting."
    );

    assert_eq!(definitions[1].database(), "wn");
    assert_eq!(definitions[1].body(), "hello\n    n 1: an expression of greeting");

    conn.close();
    assert_eq!(server.finish(), vec!["DEFINE * hello", "QUIT"]);
}

#[test]
fn test_definitions_negative_is_empty() {
    let server = MockServer::start(vec![
        reply("550 invalid database, use \"SHOW DB\" for list\r\n"),
        reply("552 no match\r\n"),
    ]);
    let conn = connect(&server);

    let missing = Database::new("nope", "").unwrap();
    assert!(conn.definitions("hello", &missing).unwrap().is_empty());
    assert!(conn.definitions("qwxz", &Database::first_match()).unwrap().is_empty());
    assert!(conn.is_open());

    conn.close();
    assert_eq!(
        server.finish(),
        vec!["DEFINE nope hello", "DEFINE ! qwxz", "QUIT"]
    );
}

#[test]
fn test_multi_word_lookup_is_quoted() {
    let server = MockServer::start(vec![reply("552 no match\r\n")]);
    let conn = connect(&server);

    assert!(conn.definitions("ice cream", &wordnet()).unwrap().is_empty());

    conn.close();
    assert_eq!(server.finish(), vec!["DEFINE wn \"ice cream\"", "QUIT"]);
}

#[test]
fn test_dot_stuffing_handling() {
    let script = concat!(
        "150 1 definitions retrieved\r\n",
        "151 \"dot\" wn \"WordNet\"\r\n",
        "..net domain\r\n",
        ".\r\n",
        "250 ok\r\n",
    );

    let server = MockServer::start(vec![reply(script)]);
    let conn = connect(&server);
    let definitions = conn.definitions("dot", &wordnet()).unwrap();
    assert_eq!(definitions[0].body(), ".net domain");
    conn.close();
    server.finish();

    let server = MockServer::start(vec![reply(script)]);
    let config = Config {
        unescape_dot_stuffing: false,
        ..server.config()
    };
    let conn = DictConnection::connect(config).unwrap();
    let definitions = conn.definitions("dot", &wordnet()).unwrap();
    assert_eq!(definitions[0].body(), "..net domain");
    conn.close();
    server.finish();
}

// =============================================================================
// Match Tests
// =============================================================================

#[test]
fn test_match_list() {
    let server = MockServer::start(vec![reply(concat!(
        "152 5 matches found\r\n",
        "gcide \"Hell\"\r\n",
        "gcide \"Hello\"\r\n",
        "wn \"hell\"\r\n",
        "wn \"hello\"\r\n",
        "wn \"hell\"\r\n",
        ".\r\n",
        "250 ok\r\n",
    ))]);
    let conn = connect(&server);
    let prefix = MatchingStrategy::new("prefix", "Match prefixes").unwrap();

    let matches = conn.match_list("hell", &prefix, &Database::all()).unwrap();
    let words: Vec<&str> = matches.iter().map(String::as_str).collect();
    assert_eq!(words, vec!["Hell", "Hello", "hell", "hello"]);

    conn.close();
    assert_eq!(server.finish(), vec!["MATCH * prefix hell", "QUIT"]);
}

#[test]
fn test_match_list_negative_is_empty() {
    let server = MockServer::start(vec![reply("551 invalid strategy, use \"SHOW STRAT\" for a list\r\n")]);
    let conn = connect(&server);
    let bogus = MatchingStrategy::new("bogus", "").unwrap();

    assert!(conn.match_list("hello", &bogus, &wordnet()).unwrap().is_empty());
    assert!(conn.is_open());
    conn.close();
    server.finish();
}

// =============================================================================
// Listing Tests
// =============================================================================

#[test]
fn test_database_list() {
    let server = MockServer::start(vec![reply(DATABASES_REPLY)]);
    let conn = connect(&server);

    let databases = conn.database_list().unwrap();
    assert_eq!(databases.len(), 2);
    assert_eq!(databases["wn"], wordnet());
    assert_eq!(
        databases["gcide"].description(),
        "The Collaborative International Dictionary of English v.0.48"
    );

    conn.close();
    assert_eq!(server.finish(), vec!["SHOW DB", "QUIT"]);
}

#[test]
fn test_empty_database_list() {
    let server = MockServer::start(vec![reply("554 No databases present\r\n")]);
    let conn = connect(&server);
    assert!(conn.database_list().unwrap().is_empty());
    conn.close();
    server.finish();
}

#[test]
fn test_strategy_list() {
    let server = MockServer::start(vec![reply(concat!(
        "111 4 strategies available\r\n",
        "exact \"Match headwords exactly\"\r\n",
        "prefix \"Match prefixes\"\r\n",
        "soundex \"Match using SOUNDEX algorithm\"\r\n",
        "lev \"Match headwords within Levenshtein distance one\"\r\n",
        ".\r\n",
        "250 ok\r\n",
    ))]);
    let conn = connect(&server);

    let strategies = conn.strategy_list().unwrap();
    let names: Vec<&str> = strategies.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["exact", "prefix", "soundex", "lev"]);
    assert!(strategies.contains(&MatchingStrategy::new("prefix", "Match prefixes").unwrap()));

    conn.close();
    assert_eq!(server.finish(), vec!["SHOW STRAT", "QUIT"]);
}

// =============================================================================
// Info Tests
// =============================================================================

#[test]
fn test_database_info() {
    let server = MockServer::start(vec![reply(concat!(
        "112 database information follows\r\n",
        "============ wn ============\r\n",
        "WordNet (r) 3.0 (2006)\r\n",
        "\r\n",
        "  Princeton University\r\n",
        ".\r\n",
        "250 ok\r\n",
    ))]);
    let conn = connect(&server);

    let info = conn.database_info(&wordnet()).unwrap();
    assert_eq!(
        info,
        "============ wn ============\nWordNet (r) 3.0 (2006)\n\n  Princeton University"
    );

    conn.close();
    assert_eq!(server.finish(), vec!["SHOW INFO wn", "QUIT"]);
}

#[test]
fn test_database_info_unknown_is_error_and_keeps_connection() {
    let server = MockServer::start(vec![
        reply("550 invalid database, use \"SHOW DB\" for list\r\n"),
        reply(DATABASES_REPLY),
    ]);
    let conn = connect(&server);
    let missing = Database::new("nonexistent", "").unwrap();

    match conn.database_info(&missing) {
        Err(DictError::Protocol { code, detail }) => {
            assert_eq!(code, Some(550));
            assert_eq!(detail, "invalid database, use \"SHOW DB\" for list");
        }
        other => panic!("unexpected result {other:?}"),
    }

    // The stream is still framed correctly
    assert!(conn.is_open());
    assert_eq!(conn.database_list().unwrap().len(), 2);

    conn.close();
    assert_eq!(
        server.finish(),
        vec!["SHOW INFO nonexistent", "SHOW DB", "QUIT"]
    );
}

// =============================================================================
// Framing Tests
// =============================================================================

#[test]
fn test_long_block_does_not_leak_into_next_exchange() {
    let mut info = String::from("112 database information follows\r\n");
    for i in 0..2_000 {
        info.push_str(&format!("line {} of a long info page\r\n", i));
    }
    info.push_str(".\r\n250 ok\r\n");

    let server = MockServer::start(vec![
        Step::Reply(info),
        reply(DATABASES_REPLY),
        reply("552 no match\r\n"),
    ]);
    let conn = connect(&server);

    let text = conn.database_info(&wordnet()).unwrap();
    assert_eq!(text.lines().count(), 2_000);
    assert_eq!(text.lines().last(), Some("line 1999 of a long info page"));

    assert_eq!(conn.database_list().unwrap().len(), 2);
    assert!(conn.definitions("x", &wordnet()).unwrap().is_empty());

    conn.close();
    assert_eq!(
        server.finish(),
        vec!["SHOW INFO wn", "SHOW DB", "DEFINE wn x", "QUIT"]
    );
}

#[test]
fn test_concurrent_callers_are_serialized() {
    const THREADS: usize = 4;
    let steps = (0..THREADS).map(|_| reply(DATABASES_REPLY)).collect();
    let server = MockServer::start(steps);
    let conn = Arc::new(connect(&server));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let conn = Arc::clone(&conn);
            thread::spawn(move || conn.database_list().unwrap())
        })
        .collect();

    for handle in handles {
        let databases = handle.join().unwrap();
        assert_eq!(databases.len(), 2);
        assert!(databases.contains_key("wn"));
    }

    conn.close();
    let commands = server.finish();
    assert_eq!(commands.len(), THREADS + 1);
    assert!(commands[..THREADS].iter().all(|c| c == "SHOW DB"));
    assert_eq!(commands[THREADS], "QUIT");
}
