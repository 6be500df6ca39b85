//! Command router
//!
//! Decides the effect of one command: which sessions change and which
//! connections receive which text. No I/O happens here; the relay actor
//! performs the sends.

use tracing::{debug, info, warn};

use crate::command::Command;
use crate::message::{ErrorKind, ServerMessage};
use crate::session::SessionStore;
use crate::types::ConnId;

/// One line to hand to one connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub to: ConnId,
    pub message: ServerMessage,
}

impl Outgoing {
    fn new(to: ConnId, message: ServerMessage) -> Self {
        Self { to, message }
    }
}

/// Apply `command` issued by connection `from`
///
/// Replies only ever go to `from`. Broadcasts go to every member of the
/// sender's room, the sender included; private messages go to exactly one
/// other connection.
pub fn route(store: &mut SessionStore, from: ConnId, command: Command) -> Vec<Outgoing> {
    let Some(session) = store.lookup(from) else {
        warn!("Command from {} without a session", from);
        return vec![Outgoing::new(from, ServerMessage::Error(ErrorKind::NoSession))];
    };
    let nick = session.nickname.clone();
    let room = session.room.clone();

    match command {
        Command::SetNickname(new_nick) => match store.set_nickname(from, &new_nick) {
            Ok(()) => {
                info!("Client {} renamed '{}' -> '{}'", from, nick, new_nick);
                vec![Outgoing::new(
                    from,
                    ServerMessage::NicknameUpdated { nick: new_nick },
                )]
            }
            Err(e) => {
                debug!("Client {} rename rejected: {}", from, e);
                vec![Outgoing::new(from, e.into())]
            }
        },

        Command::ListUsers => {
            debug!("Client {} listing room '{}'", from, room);
            let nicks = store.list_nicks_in_room(&room);
            vec![Outgoing::new(from, ServerMessage::UserList { nicks })]
        }

        Command::MissingRecipient => {
            debug!("Client {} sent /MSG without a recipient", from);
            vec![Outgoing::new(
                from,
                ServerMessage::Error(ErrorKind::MissingRecipient),
            )]
        }

        Command::PrivateMessage { target, body } => {
            let Some(recipient) = store.find_by_nick_and_room(&target, &room) else {
                debug!("Client {} messaged unknown '{}' in '{}'", from, target, room);
                return vec![Outgoing::new(
                    from,
                    ServerMessage::Error(ErrorKind::NoSuchUser { nick: target, room }),
                )];
            };
            info!("Private message from '{}' to '{}'", nick, target);
            vec![
                Outgoing::new(recipient.id, ServerMessage::Private { from: nick, body }),
                Outgoing::new(from, ServerMessage::PrivateSent),
            ]
        }

        Command::JoinRoom(new_room) => match store.set_room(from, &new_room) {
            Ok(()) => {
                info!("Client {} moved '{}' -> '{}'", from, room, new_room);
                vec![Outgoing::new(from, ServerMessage::Joined { room: new_room })]
            }
            Err(e) => {
                debug!("Client {} join rejected: {}", from, e);
                vec![Outgoing::new(from, e.into())]
            }
        },

        Command::WhichRoom => vec![Outgoing::new(from, ServerMessage::CurrentRoom { room })],

        Command::Broadcast(body) => {
            let members = store.members_of(&room);
            debug!(
                "Broadcast from '{}' to {} member(s) of '{}'",
                nick,
                members.len(),
                room
            );
            let message = ServerMessage::Chat { from: nick, body };
            members
                .into_iter()
                .map(|to| Outgoing::new(to, message.clone()))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NicknameRule;

    fn store_with(ids: &[u64]) -> SessionStore {
        let mut store = SessionStore::new();
        for id in ids {
            store.upsert_on_connect(ConnId(*id));
        }
        store
    }

    fn texts_for(out: &[Outgoing], to: ConnId) -> Vec<String> {
        out.iter()
            .filter(|o| o.to == to)
            .map(|o| o.message.to_string())
            .collect()
    }

    #[test]
    fn test_nick_then_duplicate() {
        let mut store = store_with(&[1, 2]);

        let out = route(&mut store, ConnId(1), Command::parse("/NICK alice"));
        assert_eq!(
            out,
            vec![Outgoing::new(
                ConnId(1),
                ServerMessage::NicknameUpdated { nick: "alice".to_string() }
            )]
        );

        let out = route(&mut store, ConnId(2), Command::parse("/NICK alice"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].to, ConnId(2));
        assert!(matches!(
            out[0].message,
            ServerMessage::Error(ErrorKind::NicknameTaken { .. })
        ));
        assert_eq!(store.lookup(ConnId(2)).unwrap().nickname, "2");
    }

    #[test]
    fn test_nick_with_whitespace() {
        let mut store = store_with(&[1]);
        let out = route(&mut store, ConnId(1), Command::parse("/NICK  alice"));
        assert_eq!(
            out[0].message,
            ServerMessage::Error(ErrorKind::NicknameInvalid(NicknameRule::Whitespace))
        );
    }

    #[test]
    fn test_broadcast_reaches_room_including_sender() {
        let mut store = store_with(&[1, 2, 3]);
        store.set_nickname(ConnId(1), "alice").unwrap();
        store.set_room(ConnId(3), "elsewhere").unwrap();

        let out = route(&mut store, ConnId(1), Command::parse("hello room"));
        let recipients: Vec<ConnId> = out.iter().map(|o| o.to).collect();
        assert_eq!(recipients, vec![ConnId(1), ConnId(2)]);
        assert_eq!(texts_for(&out, ConnId(2)), vec!["alice: hello room"]);
        assert_eq!(texts_for(&out, ConnId(1)), vec!["alice: hello room"]);
    }

    #[test]
    fn test_private_message_only_to_target() {
        let mut store = store_with(&[1, 2, 3]);
        store.set_nickname(ConnId(1), "alice").unwrap();
        store.set_nickname(ConnId(2), "bob").unwrap();

        let out = route(&mut store, ConnId(1), Command::parse("/MSG bob secret"));
        assert_eq!(texts_for(&out, ConnId(2)), vec!["[PRIVATE from alice]: secret"]);
        assert_eq!(
            texts_for(&out, ConnId(1)),
            vec!["[SERVER] Private message sent."]
        );
        assert!(texts_for(&out, ConnId(3)).is_empty());
    }

    #[test]
    fn test_private_message_unknown_target() {
        let mut store = store_with(&[1, 2]);
        let out = route(&mut store, ConnId(1), Command::parse("/MSG nonexistent hello"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].to, ConnId(1));
        assert_eq!(
            out[0].message.to_string(),
            "[SERVER] Nickname nonexistent in chat room global does not exist."
        );
    }

    #[test]
    fn test_private_message_not_across_rooms() {
        let mut store = store_with(&[1, 2]);
        store.set_nickname(ConnId(2), "bob").unwrap();
        store.set_room(ConnId(2), "other").unwrap();

        let out = route(&mut store, ConnId(1), Command::parse("/MSG bob hi"));
        assert!(matches!(
            out[0].message,
            ServerMessage::Error(ErrorKind::NoSuchUser { .. })
        ));
        assert!(texts_for(&out, ConnId(2)).is_empty());
    }

    #[test]
    fn test_missing_recipient() {
        let mut store = store_with(&[1]);
        let out = route(&mut store, ConnId(1), Command::parse("/MSG bob"));
        assert_eq!(
            out,
            vec![Outgoing::new(
                ConnId(1),
                ServerMessage::Error(ErrorKind::MissingRecipient)
            )]
        );
    }

    #[test]
    fn test_join_then_who() {
        let mut store = store_with(&[1, 2]);
        store.set_nickname(ConnId(1), "alice").unwrap();

        let out = route(&mut store, ConnId(1), Command::parse("/JOIN private1"));
        assert_eq!(
            texts_for(&out, ConnId(1)),
            vec!["[SERVER] You have joined chat room private1."]
        );

        let out = route(&mut store, ConnId(1), Command::parse("/WHO"));
        assert_eq!(
            out[0].message,
            ServerMessage::UserList { nicks: vec!["alice".to_string()] }
        );

        let out = route(&mut store, ConnId(2), Command::parse("/WHO"));
        assert_eq!(
            out[0].message,
            ServerMessage::UserList { nicks: vec!["2".to_string()] }
        );
    }

    #[test]
    fn test_which_room() {
        let mut store = store_with(&[1]);
        let out = route(&mut store, ConnId(1), Command::parse("/ROOM"));
        assert_eq!(
            texts_for(&out, ConnId(1)),
            vec!["[SERVER] You are in chat room: global"]
        );
    }

    #[test]
    fn test_unknown_sender() {
        let mut store = SessionStore::new();
        let out = route(&mut store, ConnId(5), Command::parse("hello"));
        assert_eq!(
            out,
            vec![Outgoing::new(ConnId(5), ServerMessage::Error(ErrorKind::NoSession))]
        );
    }
}
