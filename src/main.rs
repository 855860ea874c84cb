use clap::{CommandFactory, Parser};
use tracing::error;

mod chunk;
mod config;
mod constant;
mod difficulty;
mod error;
mod hasher;
mod scheduler;
mod solve;
mod utils;
mod worker;

use constant::{DEFAULT_CHUNK_SIZE, DEFAULT_DIFFICULTY, DEFAULT_THRESHOLD};

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    Solver::init_pretty_env_logger();
    let solver = Solver::parse();

    if solver.prefix.is_empty() {
        let _ = Solver::command().print_help();
        std::process::exit(1);
    }

    if let Err(err) = solver.solve().await {
        error!("{err:#}");
        std::process::exit(1);
    }
}

/// Finds a nonce whose sha256(prefix || nonce) starts with `difficulty` zero bits.
#[derive(Parser, Debug, Clone)]
#[command(name = "pow-solver", version)]
pub struct Solver {
    #[arg(short = 'p', default_value = "", help = "Prefix hashed in front of every nonce")]
    pub prefix: String,

    #[arg(
        short = 'd',
        default_value_t = DEFAULT_DIFFICULTY,
        allow_negative_numbers = true,
        help = "Number of leading zero bits the digest must have"
    )]
    pub difficulty: i64,

    #[arg(short = 'b', help = "Print the winning digest as a bit string")]
    pub bin_string: bool,

    #[arg(
        short = 't',
        default_value_t = DEFAULT_THRESHOLD,
        help = "Number of chunks searched concurrently"
    )]
    pub threshold: usize,

    #[arg(
        long,
        default_value_t = DEFAULT_CHUNK_SIZE,
        help = "Number of nonces handed to a worker per dispatch"
    )]
    pub chunk_size: u64,
}

impl Solver {
    pub fn init_pretty_env_logger() {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .parse_default_env()
            .init();
    }
}
