//! Multi-room Line Chat Relay Library
//!
//! A TCP chat relay built with tokio using the Actor pattern for state
//! management. Clients send newline-delimited text: slash commands or chat
//! lines that are relayed to everyone in the sender's room.
//!
//! # Features
//! - Nicknames unique within a room (`/NICK`)
//! - Room listing (`/WHO`) and current room (`/ROOM`)
//! - Private messages inside a room (`/MSG`)
//! - Implicit rooms (`/JOIN`), created on first use and gone when empty
//! - Immediate cleanup on disconnect
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `RelayServer` is the central actor owning the `SessionStore`
//! - Each connection has a `handler` task communicating with the relay
//! - No locks needed - all state access goes through message passing
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//! use room_relay::{serve, Config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     let listener = TcpListener::bind(config.bind_addr()).await.unwrap();
//!     serve(listener, config).await.unwrap();
//! }
//! ```

pub mod codec;
pub mod command;
pub mod config;
pub mod connection;
pub mod error;
pub mod handler;
pub mod message;
pub mod router;
pub mod server;
pub mod session;
pub mod terminal;
pub mod types;

// Re-export main types for convenience
pub use codec::{Inbound, RelayCodec};
pub use command::Command;
pub use config::Config;
pub use connection::Connection;
pub use error::{AppError, ConfigError, NicknameRule, SendError, StoreError};
pub use handler::{handle_connection, serve};
pub use message::{ErrorKind, ServerMessage};
pub use router::{route, Outgoing};
pub use server::{RelayServer, ServerCommand};
pub use session::{Session, SessionStore};
pub use terminal::LocalCommand;
pub use types::{ConnId, ConnIdGenerator, DEFAULT_ROOM};
