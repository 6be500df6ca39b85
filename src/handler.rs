//! TCP connection handler
//!
//! Accepts connections, frames each stream into newline-delimited lines and
//! shuttles them between the socket and the RelayServer actor.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_util::codec::Framed;
use tracing::{debug, error, info, warn};

use crate::codec::{Inbound, RelayCodec};
use crate::config::Config;
use crate::error::AppError;
use crate::server::{RelayServer, ServerCommand};
use crate::types::{ConnId, ConnIdGenerator};

/// Channel buffer size for relay events
const CHANNEL_BUFFER_SIZE: usize = 256;

/// Serve clients on `listener` until the relay actor goes away
///
/// Starts the RelayServer actor and runs the accept loop. Accept failures
/// are logged and skipped; a closed actor channel is fatal.
pub async fn serve(listener: TcpListener, config: Config) -> Result<(), AppError> {
    let (cmd_tx, cmd_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
    let server = RelayServer::new(cmd_rx, config.welcome_message.clone());
    tokio::spawn(server.run());
    info!("RelayServer actor started");

    let mut ids = ConnIdGenerator::new();

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                if cmd_tx.is_closed() {
                    error!("RelayServer actor stopped, refusing {}", peer);
                    return Err(AppError::ChannelSend);
                }

                let client_id = ids.next_id();
                debug!("New connection from {} as client {}", peer, client_id);
                let cmd_tx = cmd_tx.clone();
                let config = config.clone();

                // Spawn handler task for each connection
                tokio::spawn(async move {
                    let result = handle_connection(stream, peer, client_id, cmd_tx, &config).await;
                    if let Err(e) = result {
                        error!("Connection handler error for {}: {}", client_id, e);
                    }
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}

/// Handle a new TCP connection
///
/// Registers with the relay, then runs a read task (socket -> relay) and a
/// write task (relay -> socket) until either ends. End of stream counts as a
/// disconnect straight away.
pub async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    client_id: ConnId,
    cmd_tx: mpsc::Sender<ServerCommand>,
    config: &Config,
) -> Result<(), AppError> {
    let codec = RelayCodec::new(config.max_line_length);
    let limit = codec.max_length();
    let framed = Framed::new(stream, codec);
    let (mut line_sender, mut line_receiver) = framed.split();

    // Create channel for relay -> client lines
    let (msg_tx, mut msg_rx) = mpsc::channel::<String>(config.outbound_buffer);

    // Register with RelayServer
    if cmd_tx
        .send(ServerCommand::Connect {
            client_id,
            peer,
            sender: msg_tx,
        })
        .await
        .is_err()
    {
        error!("Failed to register client {} - relay closed", client_id);
        return Err(AppError::ChannelSend);
    }

    // Clone cmd_tx for read task
    let cmd_tx_read = cmd_tx.clone();

    // Spawn read task (socket -> ServerCommand)
    let mut read_task = tokio::spawn(async move {
        while let Some(result) = line_receiver.next().await {
            let cmd = match result {
                Ok(Inbound::Line(line)) => ServerCommand::Line { client_id, line },
                Ok(Inbound::TooLong) => ServerCommand::LineTooLong { client_id, limit },
                Err(e) => {
                    warn!("Read error for {}: {}", client_id, e);
                    break;
                }
            };
            if cmd_tx_read.send(cmd).await.is_err() {
                debug!("Relay closed, ending read task for {}", client_id);
                break;
            }
        }
        debug!("Read task ended for {}", client_id);
    });

    // Spawn write task (relay -> socket)
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = msg_rx.recv().await {
            if let Err(e) = line_sender.send(line).await {
                debug!("Socket send failed for {}: {}", client_id, e);
                break;
            }
        }
        debug!("Write task ended for {}", client_id);
    });

    // Wait for either task to complete, then stop the other so the socket
    // is released
    tokio::select! {
        _ = &mut read_task => {
            debug!("Read task completed for {}", client_id);
            write_task.abort();
        }
        _ = &mut write_task => {
            debug!("Write task completed for {}", client_id);
            read_task.abort();
        }
    }

    // Send disconnect command
    let _ = cmd_tx.send(ServerCommand::Disconnect { client_id }).await;

    info!("Client {} disconnected", client_id);

    Ok(())
}
