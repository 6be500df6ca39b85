//! RelayServer actor implementation
//!
//! The central actor that owns all shared state: the session store and the
//! outbound handle of every live connection. Connection tasks talk to it
//! through an mpsc channel, so state is only ever touched from this task.

use std::collections::HashMap;
use std::net::SocketAddr;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::connection::Connection;
use crate::error::SendError;
use crate::message::ServerMessage;
use crate::router::{self, Outgoing};
use crate::session::SessionStore;
use crate::types::ConnId;

/// Events sent from connection tasks to the RelayServer actor
#[derive(Debug)]
pub enum ServerCommand {
    /// New client connected
    Connect {
        client_id: ConnId,
        peer: SocketAddr,
        sender: mpsc::Sender<String>,
    },
    /// Client sent one line
    Line { client_id: ConnId, line: String },
    /// Client sent a line longer than the framing limit
    LineTooLong { client_id: ConnId, limit: usize },
    /// Client disconnected
    Disconnect { client_id: ConnId },
}

/// The relay actor
pub struct RelayServer {
    /// Nickname/room state: ConnId -> Session
    sessions: SessionStore,
    /// Live connections: ConnId -> Connection
    connections: HashMap<ConnId, Connection>,
    /// Greeting sent on connect
    welcome: String,
    /// Command receiver channel
    receiver: mpsc::Receiver<ServerCommand>,
}

impl RelayServer {
    /// Create a new RelayServer with the given command receiver
    pub fn new(receiver: mpsc::Receiver<ServerCommand>, welcome: String) -> Self {
        Self {
            sessions: SessionStore::new(),
            connections: HashMap::new(),
            welcome,
            receiver,
        }
    }

    /// Run the RelayServer event loop
    ///
    /// Sleeps until a connection task sends an event and stops once every
    /// sender is dropped.
    pub async fn run(mut self) {
        info!("RelayServer started");

        while let Some(cmd) = self.receiver.recv().await {
            self.handle_command(cmd);
        }

        info!("RelayServer shutting down");
    }

    /// Process a single event
    fn handle_command(&mut self, cmd: ServerCommand) {
        match cmd {
            ServerCommand::Connect {
                client_id,
                peer,
                sender,
            } => self.handle_connect(client_id, peer, sender),
            ServerCommand::Line { client_id, line } => self.handle_line(client_id, &line),
            ServerCommand::LineTooLong { client_id, limit } => {
                warn!("Client {} sent a line over {} bytes", client_id, limit);
                self.send_to(client_id, ServerMessage::LineTooLong { limit });
            }
            ServerCommand::Disconnect { client_id } => self.teardown(client_id),
        }
    }

    /// Handle new client connection
    fn handle_connect(
        &mut self,
        client_id: ConnId,
        peer: SocketAddr,
        sender: mpsc::Sender<String>,
    ) {
        info!("Client {} connected from {}", client_id, peer);
        self.connections
            .insert(client_id, Connection::new(client_id, peer, sender));
        let session = self.sessions.upsert_on_connect(client_id);
        info!("Put client {} into chat room '{}'", client_id, session.room);

        self.send_to(client_id, ServerMessage::Welcome(self.welcome.clone()));
        debug!("Total sessions: {}", self.sessions.len());
    }

    /// Handle one inbound line
    ///
    /// Blank lines are keep-alive noise and are dropped before parsing.
    fn handle_line(&mut self, client_id: ConnId, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if !self.connections.contains_key(&client_id) {
            debug!("Dropping line from departed client {}", client_id);
            return;
        }

        info!("Message received from {}: {}", client_id, line);
        let command = Command::parse(line);
        let outgoing = router::route(&mut self.sessions, client_id, command);
        self.deliver_all(outgoing);
    }

    /// Hand routed messages to their connections
    fn deliver_all(&mut self, outgoing: Vec<Outgoing>) {
        for Outgoing { to, message } in outgoing {
            self.send_to(to, message);
        }
    }

    /// Send one message, tearing the connection down if its writer is gone
    fn send_to(&mut self, client_id: ConnId, message: ServerMessage) {
        let Some(conn) = self.connections.get(&client_id) else {
            return;
        };
        match conn.deliver(message.to_string()) {
            Ok(()) => {}
            Err(SendError::Full) => {
                warn!("Client {} is not keeping up, dropped a line", client_id);
            }
            Err(SendError::ChannelClosed) => {
                debug!("Client {} writer closed", client_id);
                self.teardown(client_id);
            }
        }
    }

    /// Forget a connection and its session
    fn teardown(&mut self, client_id: ConnId) {
        let conn = self.connections.remove(&client_id);
        let session = self.sessions.remove(client_id);

        match (conn, session) {
            (Some(conn), Some(session)) => info!(
                "Client {} ({}) left; was '{}' in '{}'",
                conn.id, conn.peer, session.nickname, session.room
            ),
            (None, None) => debug!("Client {} already torn down", client_id),
            _ => warn!("Client {} had inconsistent state on teardown", client_id),
        }

        debug!("Total sessions: {}", self.sessions.len());
    }
}
