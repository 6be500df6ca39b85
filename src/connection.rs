//! Connection handle held by the relay actor
//!
//! Represents one live client from the actor's side: its identity, peer
//! address and the channel feeding its writer task.

use std::net::SocketAddr;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::error::SendError;
use crate::types::ConnId;

/// Actor-side view of a connected client
#[derive(Debug)]
pub struct Connection {
    /// Unique identifier for this connection
    pub id: ConnId,
    /// Remote address, for logging
    pub peer: SocketAddr,
    /// Relay → writer task line channel
    sender: mpsc::Sender<String>,
}

impl Connection {
    pub fn new(id: ConnId, peer: SocketAddr, sender: mpsc::Sender<String>) -> Self {
        Self { id, peer, sender }
    }

    /// Queue a line for this connection without waiting
    ///
    /// Returns `ChannelClosed` once the writer task is gone and `Full` when
    /// the writer has fallen behind; in the latter case the line is dropped.
    pub fn deliver(&self, line: String) -> Result<(), SendError> {
        self.sender.try_send(line).map_err(|e| match e {
            TrySendError::Full(_) => SendError::Full,
            TrySendError::Closed(_) => SendError::ChannelClosed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    #[tokio::test]
    async fn test_deliver() {
        let (tx, mut rx) = mpsc::channel(4);
        let conn = Connection::new(ConnId(1), peer(), tx);

        conn.deliver("hello".to_string()).unwrap();
        assert_eq!(rx.recv().await.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_deliver_full() {
        let (tx, _rx) = mpsc::channel(1);
        let conn = Connection::new(ConnId(1), peer(), tx);

        conn.deliver("one".to_string()).unwrap();
        assert!(matches!(conn.deliver("two".to_string()), Err(SendError::Full)));
    }

    #[tokio::test]
    async fn test_deliver_closed() {
        let (tx, rx) = mpsc::channel(4);
        let conn = Connection::new(ConnId(1), peer(), tx);
        drop(rx);

        assert!(matches!(
            conn.deliver("hello".to_string()),
            Err(SendError::ChannelClosed)
        ));
    }
}
