//! Terminal front-end helpers for the client binary
//!
//! `/QUIT` and `/HELP` are handled locally and never reach the relay.

/// Help menu printed for `/HELP`
pub const HELP_TEXT: &str = "\
/NICK <name>
\tChoose a nickname, unique within your chat room. No whitespace.
/WHO
\tList the users in your current chat room.
/MSG <name> <message>
\tPrivately message a user in your chat room. Nobody else sees it.
/JOIN <room>
\tMove to the named chat room.
/ROOM
\tShow which chat room you are in.
/HELP
\tShow this help.
/QUIT
\tDisconnect and exit.";

/// What to do with one line typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalCommand {
    /// Disconnect and exit
    Quit,
    /// Print `HELP_TEXT`
    Help,
    /// Nothing worth sending
    Ignore,
    /// Forward verbatim to the relay
    Send(String),
}

impl LocalCommand {
    /// Classify a raw stdin line (line ending included or not)
    pub fn classify(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        match line.trim() {
            "/QUIT" => LocalCommand::Quit,
            "/HELP" => LocalCommand::Help,
            "" => LocalCommand::Ignore,
            _ => LocalCommand::Send(line.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_local_commands() {
        assert_eq!(LocalCommand::classify("/QUIT\n"), LocalCommand::Quit);
        assert_eq!(LocalCommand::classify("/HELP\r\n"), LocalCommand::Help);
        assert_eq!(LocalCommand::classify("  \n"), LocalCommand::Ignore);
    }

    #[test]
    fn test_classify_forwards_everything_else() {
        assert_eq!(
            LocalCommand::classify("/NICK alice\n"),
            LocalCommand::Send("/NICK alice".to_string())
        );
        assert_eq!(
            LocalCommand::classify("/QUITTING now"),
            LocalCommand::Send("/QUITTING now".to_string())
        );
    }

    #[test]
    fn test_help_mentions_every_command() {
        for cmd in ["/NICK", "/WHO", "/MSG", "/JOIN", "/ROOM", "/HELP", "/QUIT"] {
            assert!(HELP_TEXT.contains(cmd), "missing {}", cmd);
        }
    }
}
