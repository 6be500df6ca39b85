//! Outbound message texts
//!
//! Everything the relay writes to a client is rendered from `ServerMessage`,
//! one line (or a block of lines) per message. Server notices carry the
//! `[SERVER]` tag; chat traffic carries the sender's nickname.

use std::fmt;

use crate::error::{NicknameRule, StoreError};

const TAG: &str = "[SERVER]";

/// Server → Client message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// Greeting sent right after accept
    Welcome(String),
    /// `/NICK` succeeded
    NicknameUpdated { nick: String },
    /// `/WHO` result
    UserList { nicks: Vec<String> },
    /// `/MSG` delivered
    PrivateSent,
    /// `/JOIN` succeeded
    Joined { room: String },
    /// `/ROOM` result
    CurrentRoom { room: String },
    /// Room chat line
    Chat { from: String, body: String },
    /// Private chat line; `body` keeps its leading separator
    Private { from: String, body: String },
    /// Input line exceeded the framing limit
    LineTooLong { limit: usize },
    /// Error occurred
    Error(ErrorKind),
}

/// Recoverable errors reported back to the sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nickname already held in that room
    NicknameTaken { nick: String, room: String },
    /// Nickname broke a rule
    NicknameInvalid(NicknameRule),
    /// `/MSG` without a recipient
    MissingRecipient,
    /// `/MSG` target not in the sender's room
    NoSuchUser { nick: String, room: String },
    /// Sender has no session
    NoSession,
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerMessage::Welcome(text) => write!(f, "{}", text),
            ServerMessage::NicknameUpdated { nick } => {
                write!(f, "{} Nickname updated to {}.", TAG, nick)
            }
            ServerMessage::UserList { nicks } => {
                write!(f, "{} Clients in this chat room:", TAG)?;
                for nick in nicks {
                    write!(f, "\n{}", nick)?;
                }
                Ok(())
            }
            ServerMessage::PrivateSent => write!(f, "{} Private message sent.", TAG),
            ServerMessage::Joined { room } => {
                write!(f, "{} You have joined chat room {}.", TAG, room)
            }
            ServerMessage::CurrentRoom { room } => {
                write!(f, "{} You are in chat room: {}", TAG, room)
            }
            ServerMessage::Chat { from, body } => write!(f, "{}: {}", from, body),
            ServerMessage::Private { from, body } => {
                write!(f, "[PRIVATE from {}]:{}", from, body)
            }
            ServerMessage::LineTooLong { limit } => write!(
                f,
                "{} Message too long (limit {} bytes), it was not delivered.",
                TAG, limit
            ),
            ServerMessage::Error(kind) => write!(f, "{} {}", TAG, kind),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NicknameTaken { nick, room } => write!(
                f,
                "Nickname {} in chat room {} is already used, try another one.",
                nick, room
            ),
            ErrorKind::NicknameInvalid(NicknameRule::Empty) => {
                write!(f, "Nickname cannot be empty, try again.")
            }
            ErrorKind::NicknameInvalid(NicknameRule::Whitespace) => {
                write!(f, "Nickname cannot contain whitespace, try another one.")
            }
            ErrorKind::MissingRecipient => write!(
                f,
                "Please specify who you want to message. Usage: /MSG <nickname> <message>"
            ),
            ErrorKind::NoSuchUser { nick, room } => {
                write!(f, "Nickname {} in chat room {} does not exist.", nick, room)
            }
            ErrorKind::NoSession => write!(f, "Your session could not be found."),
        }
    }
}

/// Convert StoreError to ServerMessage for client notification
impl From<StoreError> for ServerMessage {
    fn from(err: StoreError) -> Self {
        let kind = match err {
            StoreError::NotFound(_) => ErrorKind::NoSession,
            StoreError::NicknameTaken { nick, room } => ErrorKind::NicknameTaken { nick, room },
            StoreError::NicknameInvalid(rule) => ErrorKind::NicknameInvalid(rule),
        };
        ServerMessage::Error(kind)
    }
}
