//! Terminal client for the chat relay
//!
//! Prints everything the relay sends and forwards typed lines to it.
//! `/HELP` and `/QUIT` are handled locally.
//!
//! Usage: `room_relay_client [HOST:PORT]`

use std::env;

use futures_util::{SinkExt, StreamExt};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LinesCodec};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use room_relay::terminal::HELP_TEXT;
use room_relay::{AppError, Config, LocalCommand};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let addr = env::args()
        .nth(1)
        .unwrap_or_else(|| Config::default().bind_addr());

    let stream = TcpStream::connect(&addr).await?;
    let mut server = Framed::new(stream, LinesCodec::new());
    let mut stdin = BufReader::new(io::stdin()).lines();

    println!("Connected to chat relay at {}. Type \"/HELP\" for help.", addr);

    loop {
        tokio::select! {
            incoming = server.next() => match incoming {
                Some(Ok(line)) => println!("{}", line),
                Some(Err(e)) => {
                    debug!("Relay read error: {}", e);
                    break;
                }
                None => {
                    println!("Relay closed the connection.");
                    break;
                }
            },
            typed = stdin.next_line() => {
                let Some(typed) = typed? else {
                    break;
                };
                match LocalCommand::classify(&typed) {
                    LocalCommand::Quit => break,
                    LocalCommand::Help => println!("{}", HELP_TEXT),
                    LocalCommand::Ignore => {}
                    LocalCommand::Send(line) => {
                        if let Err(e) = server.send(line).await {
                            debug!("Relay write error: {}", e);
                            break;
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
