//! Basic type definitions for the relay
//!
//! Provides newtype wrappers for type safety:
//! - `ConnId`: process-unique connection identity
//! - `ConnIdGenerator`: issues `ConnId`s for the accept loop

/// Room every new session starts in
pub const DEFAULT_ROOM: &str = "global";

/// Unique connection identifier (newtype pattern)
///
/// Stable for the lifetime of one connection and never reused while the
/// generator that issued it is alive. Implements Hash and Ord for use as
/// map keys with a deterministic iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnId(pub u64);

impl std::fmt::Display for ConnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequential `ConnId` source
///
/// Owned by the accept loop, so identities restart from 1 whenever a new
/// listener is served.
#[derive(Debug)]
pub struct ConnIdGenerator {
    next: u64,
}

impl ConnIdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Issue the next connection identity
    pub fn next_id(&mut self) -> ConnId {
        let id = ConnId(self.next);
        self.next += 1;
        id
    }
}

impl Default for ConnIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conn_ids_unique() {
        let mut ids = ConnIdGenerator::new();
        let id1 = ids.next_id();
        let id2 = ids.next_id();
        assert_ne!(id1, id2);
        assert!(id1 < id2);
    }

    #[test]
    fn test_conn_id_display() {
        assert_eq!(ConnId(42).to_string(), "42");
    }

    #[test]
    fn test_generator_restarts() {
        let mut first = ConnIdGenerator::new();
        first.next_id();
        first.next_id();

        let mut second = ConnIdGenerator::default();
        assert_eq!(second.next_id(), ConnId(1));
    }
}
