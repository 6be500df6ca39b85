//! Session store
//!
//! Maps each live connection to its nickname and room. Rooms are not stored
//! anywhere: a room is the set of sessions whose `room` field matches, so it
//! appears with its first member and disappears with its last.

use std::collections::BTreeMap;

use crate::error::{NicknameRule, StoreError};
use crate::types::{ConnId, DEFAULT_ROOM};

/// Mutable chat state of one connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Connection identity (immutable)
    pub id: ConnId,
    /// Nickname, unique within `room`
    pub nickname: String,
    /// Current room name
    pub room: String,
}

impl Session {
    /// Create the session a fresh connection starts with
    ///
    /// The nickname defaults to the stringified connection identity and the
    /// room to `DEFAULT_ROOM`.
    pub fn new(id: ConnId) -> Self {
        Self {
            id,
            nickname: id.to_string(),
            room: DEFAULT_ROOM.to_string(),
        }
    }
}

/// Check a requested nickname against the naming rules
pub fn validate_nickname(nick: &str) -> Result<(), NicknameRule> {
    if nick.is_empty() {
        return Err(NicknameRule::Empty);
    }
    if nick.chars().any(char::is_whitespace) {
        return Err(NicknameRule::Whitespace);
    }
    Ok(())
}

/// In-memory session registry
///
/// Single-writer: it is owned by the relay actor and never shared, so every
/// check-then-write below runs without interleaving.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: BTreeMap<ConnId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly accepted connection
    ///
    /// An existing entry for the same identity is reset to the defaults. If
    /// someone in the default room already goes by the stringified id, a
    /// `_<n>` suffix is appended until the nickname is free.
    pub fn upsert_on_connect(&mut self, id: ConnId) -> &Session {
        self.sessions.remove(&id);

        let mut session = Session::new(id);
        let base = session.nickname.clone();
        let mut suffix = 2;
        while self
            .find_by_nick_and_room(&session.nickname, &session.room)
            .is_some()
        {
            session.nickname = format!("{}_{}", base, suffix);
            suffix += 1;
        }

        self.sessions.insert(id, session);
        &self.sessions[&id]
    }

    pub fn lookup(&self, id: ConnId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn find_by_nick_and_room(&self, nick: &str, room: &str) -> Option<&Session> {
        self.sessions
            .values()
            .find(|s| s.nickname == nick && s.room == room)
    }

    /// Nicknames of every session currently in `room`, in connection order
    pub fn list_nicks_in_room(&self, room: &str) -> Vec<String> {
        self.sessions
            .values()
            .filter(|s| s.room == room)
            .map(|s| s.nickname.clone())
            .collect()
    }

    /// Connection identities of every session currently in `room`
    pub fn members_of(&self, room: &str) -> Vec<ConnId> {
        self.sessions
            .values()
            .filter(|s| s.room == room)
            .map(|s| s.id)
            .collect()
    }

    /// Rename a session within its current room
    ///
    /// Fails if the name breaks a rule or another connection in the same room
    /// already holds it. On failure nothing changes.
    pub fn set_nickname(&mut self, id: ConnId, nick: &str) -> Result<(), StoreError> {
        validate_nickname(nick).map_err(StoreError::NicknameInvalid)?;

        let room = self
            .sessions
            .get(&id)
            .map(|s| s.room.clone())
            .ok_or(StoreError::NotFound(id))?;

        self.ensure_free(id, nick, &room)?;

        if let Some(session) = self.sessions.get_mut(&id) {
            session.nickname = nick.to_string();
        }
        Ok(())
    }

    /// Move a session into `room`
    ///
    /// Any room name is accepted, including the empty string. The move is
    /// refused if the target room already has a different connection with
    /// this session's nickname.
    pub fn set_room(&mut self, id: ConnId, room: &str) -> Result<(), StoreError> {
        let nick = self
            .sessions
            .get(&id)
            .map(|s| s.nickname.clone())
            .ok_or(StoreError::NotFound(id))?;

        self.ensure_free(id, &nick, room)?;

        if let Some(session) = self.sessions.get_mut(&id) {
            session.room = room.to_string();
        }
        Ok(())
    }

    pub fn remove(&mut self, id: ConnId) -> Option<Session> {
        self.sessions.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn ensure_free(&self, id: ConnId, nick: &str, room: &str) -> Result<(), StoreError> {
        match self.find_by_nick_and_room(nick, room) {
            Some(holder) if holder.id != id => Err(StoreError::NicknameTaken {
                nick: nick.to_string(),
                room: room.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
