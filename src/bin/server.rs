//! Roulette Server Binary
//!
//! Starts the TCP server for Roulette.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use roulette::network::Server;
use roulette::{Config, InMemoryStore, ProtocolVersion, RouletteError, StudentsStore};
use tracing_subscriber::{fmt, EnvFilter};

/// Roulette Server
#[derive(Parser, Debug)]
#[command(name = "roulette-server")]
#[command(about = "Classroom quiz roulette server")]
#[command(version)]
struct Args {
    /// Listen address (host:port); defaults to the protocol's port on localhost
    #[arg(short, long)]
    listen: Option<String>,

    /// Protocol version to speak (1 or 2)
    #[arg(short, long, default_value = "2")]
    protocol: ProtocolVersion,

    /// Maximum concurrent connections
    #[arg(short, long, default_value = "1024")]
    max_connections: usize,

    /// File with one student name per line, loaded before serving
    #[arg(long)]
    preload: Option<PathBuf>,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,roulette=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    // Build config from args
    let mut builder = Config::builder()
        .protocol_version(args.protocol)
        .max_connections(args.max_connections);
    if let Some(listen) = args.listen {
        builder = builder.listen_addr(listen);
    }
    let config = builder.build();

    tracing::info!("Roulette Server v{}", roulette::VERSION);
    tracing::info!("Protocol version: {}", config.protocol_version);
    tracing::info!("Listen address: {}", config.listen_addr);

    let store = InMemoryStore::new();
    if let Some(path) = &args.preload {
        let loaded = File::open(path)
            .map_err(RouletteError::from)
            .and_then(|file| store.import_lines(BufReader::new(file)));
        match loaded {
            Ok(count) => tracing::info!("Preloaded {} student(s) from {}", count, path.display()),
            Err(e) => {
                tracing::error!("Failed to preload {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }
    let store: Arc<dyn StudentsStore> = Arc::new(store);

    let server = match Server::bind(config, store) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to bind: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
