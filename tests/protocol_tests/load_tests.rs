//! LOAD Sub-protocol Tests

use std::io::{Cursor, Read};

use roulette::protocol::load::{check_names, receive_students, send_students};
use roulette::protocol::RESPONSE_LOAD_START;
use roulette::{RouletteError, Student};

#[test]
fn test_receive_until_sentinel() {
    let mut reader = Cursor::new(b"Alice Dupont\nBob Martin\nENDOFDATA\nINFO\n".to_vec());
    let students = receive_students(&mut reader).unwrap();
    assert_eq!(
        students,
        vec![Student::new("Alice Dupont"), Student::new("Bob Martin")]
    );

    // The sentinel is consumed, the next command is not
    let mut rest = String::new();
    reader.read_to_string(&mut rest).unwrap();
    assert_eq!(rest, "INFO\n");
}

#[test]
fn test_receive_empty_block() {
    let mut reader = Cursor::new(b"ENDOFDATA\n".to_vec());
    assert!(receive_students(&mut reader).unwrap().is_empty());
}

#[test]
fn test_receive_keeps_duplicates_and_commands_as_names() {
    let mut reader = Cursor::new(b"Bob\nBob\nBYE\nENDOFDATA\n".to_vec());
    let students = receive_students(&mut reader).unwrap();
    assert_eq!(students.len(), 3);
    assert_eq!(students[2].fullname(), "BYE");
}

#[test]
fn test_sentinel_match_is_exact() {
    let mut reader = Cursor::new(b"endofdata\n ENDOFDATA\nENDOFDATA\n".to_vec());
    let students = receive_students(&mut reader).unwrap();
    assert_eq!(students.len(), 2);
}

#[test]
fn test_receive_without_sentinel_fails() {
    let mut reader = Cursor::new(b"Alice Dupont\n".to_vec());
    let err = receive_students(&mut reader).unwrap_err();
    assert!(matches!(err, RouletteError::ConnectionClosed(_)));
}

#[test]
fn test_send_names_then_sentinel() {
    let mut out = Vec::new();
    let students = vec![Student::new("Alice Dupont"), Student::new("Bob Martin")];
    send_students(&mut out, RESPONSE_LOAD_START, &students).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Alice Dupont\nBob Martin\nENDOFDATA\n"
    );
}

#[test]
fn test_send_with_empty_marker_sends_only_sentinel() {
    let mut out = Vec::new();
    send_students(&mut out, "", &[Student::new("Alice Dupont")]).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "ENDOFDATA\n");
}

#[test]
fn test_check_names_rejects_framing_breakers() {
    assert!(check_names(&[Student::new("Alice Dupont")]).is_ok());
    assert!(check_names(&[Student::new("Alice\nDupont")]).is_err());
    assert!(check_names(&[Student::new("Alice\r")]).is_err());
    assert!(check_names(&[Student::new("ENDOFDATA")]).is_err());
}
