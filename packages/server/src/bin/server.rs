//! Real-time chat broadcaster.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 127.0.0.1 --port 8080
//! PORT=8080 cargo run --bin hiroba-server
//! ```

use std::time::Duration;

use clap::Parser;
use hiroba_server::{
    bootstrap::build_server,
    domain::DEFAULT_HISTORY_CAPACITY,
    ui::{
        ServerConfig,
        config::{
            DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SWEEP_INTERVAL_SECS, DEFAULT_WELCOME_HISTORY_LEN,
        },
    },
};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Real-time chat broadcaster over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Seconds between liveness sweeps
    #[arg(long, default_value_t = DEFAULT_SWEEP_INTERVAL_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    sweep_interval_secs: u64,

    /// Number of chat messages kept in history
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY, value_parser = parse_positive)]
    history_capacity: usize,

    /// Number of recent messages replayed to a new participant
    #[arg(long, default_value_t = DEFAULT_WELCOME_HISTORY_LEN)]
    welcome_history: usize,
}

fn parse_positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            sweep_interval: Duration::from_secs(args.sweep_interval_secs),
            history_capacity: args.history_capacity,
            welcome_history_len: args.welcome_history,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::from(Args::parse());
    tracing::debug!("Starting with {:?}", config);

    let server = build_server(&config);
    if let Err(e) = server.run(config.bind_addr()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
