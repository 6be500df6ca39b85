//! Error types for the relay
//!
//! Defines application-level errors, session store errors, message send
//! errors and configuration errors. Uses thiserror for ergonomic error
//! definitions.

use thiserror::Error;

use crate::types::ConnId;

/// Application-level errors
///
/// All of these are fatal to the connection (or, during startup, to the
/// process). Recoverable user mistakes never become an `AppError`; they are
/// answered with a plain-text server reply instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// IO error (fatal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Channel send error (fatal - relay actor is gone)
    #[error("Relay channel closed")]
    ChannelSend,
}

/// Nickname rule violated by a `/NICK` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NicknameRule {
    /// Nickname is the empty string
    Empty,
    /// Nickname contains a whitespace character
    Whitespace,
}

/// Session store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No session registered for the connection
    #[error("No session for connection {0}")]
    NotFound(ConnId),

    /// Another connection already uses the nickname in that room
    #[error("Nickname {nick} in chat room {room} is already used")]
    NicknameTaken { nick: String, room: String },

    /// Nickname breaks a validation rule
    #[error("Invalid nickname: {0:?}")]
    NicknameInvalid(NicknameRule),
}

/// Message send errors
///
/// Occurs when attempting to hand a line to a connection's writer task.
#[derive(Debug, Error)]
pub enum SendError {
    /// The receiving end of the channel has been closed
    #[error("Channel closed")]
    ChannelClosed,

    /// The writer is not keeping up; the line was dropped
    #[error("Channel full")]
    Full,
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
