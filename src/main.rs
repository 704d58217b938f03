use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trivia_quiz::protocol::DEFAULT_PORT;
use trivia_quiz::{
    Category, ClientConfig, DeckFilter, Difficulty, QuizError, ServerConfig, ShufflePolicy,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Log more detail (server only)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Host quiz sessions over WebSocket
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "TRIVIA_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// JSON file to load the questions from (defaults to the built-in deck)
        #[arg(short, long, env = "TRIVIA_QUESTIONS")]
        questions: Option<PathBuf>,

        /// Question order for each session
        #[arg(long, value_enum, default_value_t = ShufflePolicy::Fixed)]
        shuffle: ShufflePolicy,

        /// Only serve questions from these categories (repeatable)
        #[arg(long = "category", value_enum)]
        categories: Vec<Category>,

        /// Only serve questions of this difficulty
        #[arg(long, value_enum)]
        difficulty: Option<Difficulty>,

        /// Maximum number of questions per deck
        #[arg(long)]
        limit: Option<usize>,

        /// Drop sessions idle for this many seconds
        #[arg(long, env = "TRIVIA_SESSION_TTL", default_value_t = 1800)]
        session_ttl_secs: u64,
    },

    /// Play against a running server in the terminal
    Play {
        /// Server host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Server port
        #[arg(short, long, env = "TRIVIA_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Name shown in the server log
        #[arg(short, long)]
        name: Option<String>,
    },
}

fn init_tracing(verbose: bool) -> Result<(), QuizError> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("TRIVIA_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| QuizError::Config(format!("failed to initialize logging: {}", e)))
}

async fn run(args: Args) -> Result<(), QuizError> {
    match args.command {
        Command::Serve {
            port,
            questions,
            shuffle,
            categories,
            difficulty,
            limit,
            session_ttl_secs,
        } => {
            init_tracing(args.verbose)?;
            let config = ServerConfig {
                port,
                questions,
                shuffle,
                filter: DeckFilter {
                    categories,
                    difficulty,
                    limit,
                },
                session_ttl: Duration::from_secs(session_ttl_secs),
                ..Default::default()
            };
            trivia_quiz::server::run(config).await
        }
        // No subscriber here: log output would draw over the TUI.
        Command::Play { host, port, name } => {
            let config = ClientConfig {
                host,
                port,
                username: name,
            };
            trivia_quiz::client::run(config).await
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
