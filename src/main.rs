//! Multi-room Chat Relay - Entry Point
//!
//! Loads configuration, starts the TCP listener and serves clients.
//!
//! Usage: `room_relay [CONFIG.toml] [--addr HOST:PORT]`

use std::env;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use room_relay::{serve, AppError, Config};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let mut config_path = None;
    let mut addr_override = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--addr" {
            addr_override = args.next();
        } else {
            config_path = Some(arg);
        }
    }

    let config = match config_path.as_deref() {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    // Initialize logging with environment filter
    // RUST_LOG wins over the config's log_filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let addr = addr_override.unwrap_or_else(|| config.bind_addr());

    // Start TCP listener
    let listener = TcpListener::bind(&addr).await?;
    info!("Chat relay listening on {}", addr);

    let result = serve(listener, config).await;
    if let Err(e) = &result {
        error!("Relay stopped: {}", e);
    }
    result
}
