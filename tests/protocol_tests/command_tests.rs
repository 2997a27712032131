//! Command Tests
//!
//! Tests for command normalization and version gating.

use roulette::protocol::Command;
use roulette::ProtocolVersion;

// =============================================================================
// Normalization
// =============================================================================

#[test]
fn test_parse_is_case_insensitive() {
    assert_eq!(Command::parse("random", ProtocolVersion::V2), Some(Command::Random));
    assert_eq!(Command::parse("Random", ProtocolVersion::V2), Some(Command::Random));
    assert_eq!(Command::parse("RANDOM", ProtocolVersion::V2), Some(Command::Random));
    assert_eq!(Command::parse("bYe", ProtocolVersion::V1), Some(Command::Bye));
}

#[test]
fn test_parse_trims_whitespace() {
    assert_eq!(Command::parse("  info  ", ProtocolVersion::V2), Some(Command::Info));
    assert_eq!(Command::parse("\tLOAD ", ProtocolVersion::V1), Some(Command::Load));
}

#[test]
fn test_parse_unknown_tokens() {
    assert_eq!(Command::parse("FOO", ProtocolVersion::V2), None);
    assert_eq!(Command::parse("", ProtocolVersion::V2), None);
    assert_eq!(Command::parse("RANDOM please", ProtocolVersion::V2), None);
    assert_eq!(Command::parse("ENDOFDATA", ProtocolVersion::V2), None);
}

// =============================================================================
// Version Gating
// =============================================================================

#[test]
fn test_base_protocol_rejects_extended_commands() {
    assert_eq!(Command::parse("HELP", ProtocolVersion::V1), None);
    assert_eq!(Command::parse("LIST", ProtocolVersion::V1), None);
    assert_eq!(Command::parse("CLEAR", ProtocolVersion::V1), None);
}

#[test]
fn test_extended_protocol_accepts_all_commands() {
    for token in ["HELP", "RANDOM", "INFO", "LIST", "CLEAR", "LOAD", "BYE"] {
        assert!(
            Command::parse(token, ProtocolVersion::V2).is_some(),
            "{} should be supported by V2",
            token
        );
    }
}

#[test]
fn test_help_line_lists_supported_tokens() {
    assert_eq!(
        ProtocolVersion::V2.help_line(),
        "Commands: [HELP, RANDOM, LOAD, INFO, BYE, CLEAR, LIST]"
    );
    assert_eq!(
        ProtocolVersion::V1.help_line(),
        "Commands: [RANDOM, LOAD, INFO, BYE]"
    );
}

#[test]
fn test_protocol_version_strings_and_ports() {
    assert_eq!(ProtocolVersion::V1.as_str(), "1.0");
    assert_eq!(ProtocolVersion::V2.as_str(), "2.0");
    assert_eq!(ProtocolVersion::V1.default_port(), 1234);
    assert_eq!(ProtocolVersion::V2.default_port(), 2613);
}

#[test]
fn test_protocol_version_from_str() {
    assert_eq!("1".parse::<ProtocolVersion>().unwrap(), ProtocolVersion::V1);
    assert_eq!("2.0".parse::<ProtocolVersion>().unwrap(), ProtocolVersion::V2);
    assert!("3".parse::<ProtocolVersion>().is_err());
}
