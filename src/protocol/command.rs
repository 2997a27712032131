//! Command definitions
//!
//! The closed set of command tokens and their normalization.

use super::ProtocolVersion;

/// A top-level command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// List the supported tokens (V2)
    Help,

    /// Pick a random student
    Random,

    /// Report protocol version and store size
    Info,

    /// List all students (V2)
    List,

    /// Empty the store (V2)
    Clear,

    /// Start the LOAD sub-protocol
    Load,

    /// End the session
    Bye,
}

impl Command {
    const ALL: [Command; 7] = [
        Command::Help,
        Command::Random,
        Command::Info,
        Command::List,
        Command::Clear,
        Command::Load,
        Command::Bye,
    ];

    /// Canonical wire token
    pub fn token(self) -> &'static str {
        match self {
            Command::Help => "HELP",
            Command::Random => "RANDOM",
            Command::Info => "INFO",
            Command::List => "LIST",
            Command::Clear => "CLEAR",
            Command::Load => "LOAD",
            Command::Bye => "BYE",
        }
    }

    /// Map an incoming line to a command under `version`
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Returns `None` for unknown tokens and for tokens the version does
    /// not support.
    pub fn parse(line: &str, version: ProtocolVersion) -> Option<Command> {
        let normalized = line.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.token() == normalized)
            .filter(|c| version.supports(*c))
    }
}
