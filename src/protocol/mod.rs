//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Framing
//! Newline-terminated UTF-8 lines in both directions. A trailing `\r` is
//! tolerated on read and invalid UTF-8 is decoded lossily. There is no
//! length prefix anywhere.
//!
//! ## Commands
//! ```text
//! ┌──────────┬──────┬──────┬──────────────────────────────────────────┐
//! │ Command  │ V1   │ V2   │ Reply                                    │
//! ├──────────┼──────┼──────┼──────────────────────────────────────────┤
//! │ HELP     │      │  x   │ Commands: [HELP, RANDOM, ...]            │
//! │ RANDOM   │  x   │  x   │ {"fullname":..} | {"error":..}           │
//! │ INFO     │  x   │  x   │ {"protocolVersion":..,"numberOfStudents"}│
//! │ LOAD     │  x   │  x   │ marker → names + ENDOFDATA → {"status"..}│
//! │ LIST     │      │  x   │ {"students":[{"fullname":..}]}           │
//! │ CLEAR    │      │  x   │ DATASTORE HAS BEEN CLEARED               │
//! │ BYE      │  x   │  x   │ {"status":"success","numberOfCommands"}  │
//! └──────────┴──────┴──────┴──────────────────────────────────────────┘
//! ```
//!
//! Anything else gets the guidance line and the session carries on.

mod command;
mod response;
mod codec;
pub mod load;

use std::fmt;
use std::str::FromStr;

use crate::error::RouletteError;

pub use command::Command;
pub use response::{
    ByeResponse, InfoResponse, ListResponse, LoadResponse, RandomResponse, Status,
};
pub use codec::{decode, encode, read_line, write_json, write_line};

// =============================================================================
// Wire Constants
// =============================================================================

/// First line sent on every accepted connection
pub const GREETING: &str = "Hello. Online HELP is available. Will you find it?";

/// Reply to LOAD before any name is read
pub const RESPONSE_LOAD_START: &str = "Send your data [end with ENDOFDATA]";

/// Line that ends a LOAD data stream
pub const LOAD_END_OF_DATA: &str = "ENDOFDATA";

/// Reply to CLEAR
pub const RESPONSE_CLEAR_DONE: &str = "DATASTORE HAS BEEN CLEARED";

/// Reply to anything outside the supported command set
pub const RESPONSE_UNKNOWN: &str =
    "Huh? please use HELP if you don't know what commands are available.";

/// `error` field of a RANDOM reply on an empty store
pub const RANDOM_EMPTY_STORE_ERROR: &str =
    "There is no student yet, you cannot pick a random one";

// =============================================================================
// Protocol Version
// =============================================================================

/// Protocol version spoken by a server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolVersion {
    /// Base protocol: RANDOM, LOAD, INFO, BYE
    V1,
    /// Extended protocol: adds HELP, CLEAR, LIST
    V2,
}

impl ProtocolVersion {
    /// Version string reported by INFO
    pub fn as_str(self) -> &'static str {
        match self {
            ProtocolVersion::V1 => "1.0",
            ProtocolVersion::V2 => "2.0",
        }
    }

    /// Port the server listens on unless told otherwise
    pub fn default_port(self) -> u16 {
        match self {
            ProtocolVersion::V1 => 1234,
            ProtocolVersion::V2 => 2613,
        }
    }

    /// Commands accepted under this version, in HELP order
    pub fn supported_commands(self) -> &'static [Command] {
        match self {
            ProtocolVersion::V1 => &[Command::Random, Command::Load, Command::Info, Command::Bye],
            ProtocolVersion::V2 => &[
                Command::Help,
                Command::Random,
                Command::Load,
                Command::Info,
                Command::Bye,
                Command::Clear,
                Command::List,
            ],
        }
    }

    /// Whether `command` is part of this version
    pub fn supports(self, command: Command) -> bool {
        self.supported_commands().contains(&command)
    }

    /// The single line answered to HELP
    pub fn help_line(self) -> String {
        let tokens: Vec<&str> = self
            .supported_commands()
            .iter()
            .map(|c| c.token())
            .collect();
        format!("Commands: [{}]", tokens.join(", "))
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolVersion {
    type Err = RouletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "1.0" | "v1" | "V1" => Ok(ProtocolVersion::V1),
            "2" | "2.0" | "v2" | "V2" => Ok(ProtocolVersion::V2),
            other => Err(RouletteError::Config(format!(
                "unknown protocol version '{}' (expected 1 or 2)",
                other
            ))),
        }
    }
}
