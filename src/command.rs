//! Command parser
//!
//! Turns one trimmed, non-empty input line into a `Command`. Slash prefixes
//! are case-sensitive and disjoint; anything unrecognised is chat text.

/// Parsed client input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/NICK <name>`
    SetNickname(String),
    /// `/WHO`
    ListUsers,
    /// `/MSG <target> <body>`; `body` keeps its leading space
    PrivateMessage { target: String, body: String },
    /// `/MSG` without a recipient separator
    MissingRecipient,
    /// `/JOIN <room>`
    JoinRoom(String),
    /// `/ROOM`
    WhichRoom,
    /// Any other line, sent to the whole room
    Broadcast(String),
}

impl Command {
    /// Classify a line
    ///
    /// Arguments are taken verbatim after a single separator is stripped;
    /// validation is left to the session store.
    pub fn parse(line: &str) -> Self {
        if let Some(rest) = line.strip_prefix("/NICK") {
            return Command::SetNickname(argument(rest).to_string());
        }
        if line == "/WHO" {
            return Command::ListUsers;
        }
        if let Some(rest) = line.strip_prefix("/MSG") {
            let rest = argument(rest);
            return match rest.find(' ') {
                Some(idx) => {
                    let (target, body) = rest.split_at(idx);
                    Command::PrivateMessage {
                        target: target.to_string(),
                        body: body.to_string(),
                    }
                }
                None => Command::MissingRecipient,
            };
        }
        if let Some(rest) = line.strip_prefix("/JOIN") {
            return Command::JoinRoom(argument(rest).to_string());
        }
        if line == "/ROOM" {
            return Command::WhichRoom;
        }
        Command::Broadcast(line.to_string())
    }
}

/// Strip exactly one leading separator, if any
fn argument(rest: &str) -> &str {
    rest.strip_prefix(' ').unwrap_or(rest)
}
