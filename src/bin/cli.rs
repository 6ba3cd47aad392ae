//! dictclient CLI
//!
//! Command-line interface for querying a DICT server.

use clap::{Parser, Subcommand};
use dictclient::{Config, Database, DictConnection, MatchingStrategy, DEFAULT_PORT};
use tracing_subscriber::{fmt, EnvFilter};

/// dictclient CLI
#[derive(Parser, Debug)]
#[command(name = "dict-cli")]
#[command(about = "Query a DICT (RFC 2229) dictionary server")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "dict.org")]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Socket read/write timeout in milliseconds (0 disables)
    #[arg(short, long, default_value = "30000")]
    timeout_ms: u64,

    /// Keep doubled leading periods in text blocks as sent
    #[arg(long)]
    raw_dots: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up definitions of a word
    Define {
        /// The word to define
        word: String,

        /// Database name ("*" for all, "!" for the first with a hit)
        #[arg(short, long, default_value = Database::ALL)]
        database: String,
    },

    /// List words matching a pattern
    Match {
        /// The word or pattern to match
        word: String,

        /// Matching strategy ("." for the server default)
        #[arg(short, long, default_value = MatchingStrategy::SERVER_DEFAULT)]
        strategy: String,

        /// Database name ("*" for all, "!" for the first with a hit)
        #[arg(short, long, default_value = Database::ALL)]
        database: String,
    },

    /// List databases
    Databases,

    /// List matching strategies
    Strategies,

    /// Show the information page of a database
    Info {
        /// Database name
        database: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,dictclient=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .unescape_dot_stuffing(!args.raw_dots)
        .build();

    let conn = match DictConnection::connect(config) {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to connect to {}:{}: {}", args.host, args.port, e);
            std::process::exit(1);
        }
    };

    let outcome = run(&conn, args.command);
    conn.close();

    if let Err(e) = outcome {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(conn: &DictConnection, command: Commands) -> dictclient::Result<()> {
    match command {
        Commands::Define { word, database } => {
            let database = Database::new(database, "")?;
            let definitions = conn.definitions(&word, &database)?;
            if definitions.is_empty() {
                println!("No definitions found for {:?}", word);
            }
            for definition in definitions {
                println!("From {}:", definition.database());
                println!("{}", definition.body());
                println!();
            }
        }
        Commands::Match {
            word,
            strategy,
            database,
        } => {
            let strategy = MatchingStrategy::new(strategy, "")?;
            let database = Database::new(database, "")?;
            let matches = conn.match_list(&word, &strategy, &database)?;
            if matches.is_empty() {
                println!("No matches found for {:?}", word);
            }
            for found in matches {
                println!("{}", found);
            }
        }
        Commands::Databases => {
            let mut databases: Vec<_> = conn.database_list()?.into_values().collect();
            databases.sort_by(|a, b| a.name().cmp(b.name()));
            for db in databases {
                println!("{:<16} {}", db.name(), db.description());
            }
        }
        Commands::Strategies => {
            for strategy in conn.strategy_list()? {
                println!("{:<16} {}", strategy.name(), strategy.description());
            }
        }
        Commands::Info { database } => {
            let database = Database::new(database, "")?;
            println!("{}", conn.database_info(&database)?);
        }
    }
    Ok(())
}
