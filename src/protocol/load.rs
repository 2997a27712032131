//! LOAD sub-protocol
//!
//! Bulk import nested inside one top-level command. Line framing alone
//! cannot tell "command finished" from "more data follows", so the data
//! is delimited by a sentinel line:
//!
//! ```text
//! client                         server
//!   │ LOAD                          │
//!   │──────────────────────────────▶│
//!   │   Send your data [end with..] │
//!   │◀──────────────────────────────│
//!   │ Alice Dupont                  │
//!   │ Bob Martin                    │
//!   │ ENDOFDATA                     │
//!   │──────────────────────────────▶│
//!   │   {"status":"success",...}    │
//!   │◀──────────────────────────────│
//! ```

use std::io::{BufRead, Write};

use crate::error::{Result, RouletteError};
use crate::store::Student;
use super::{read_line, LOAD_END_OF_DATA};

/// Server side: read name lines up to and including the sentinel
///
/// Every line before the sentinel is one student, kept verbatim. The
/// sentinel is consumed. End-of-stream before the sentinel is an error.
pub fn receive_students<R: BufRead>(reader: &mut R) -> Result<Vec<Student>> {
    let mut students = Vec::new();
    loop {
        match read_line(reader)? {
            Some(line) if line == LOAD_END_OF_DATA => return Ok(students),
            Some(line) => students.push(Student::new(line)),
            None => {
                return Err(RouletteError::ConnectionClosed(format!(
                    "LOAD data ended after {} name(s) without {}",
                    students.len(),
                    LOAD_END_OF_DATA
                )))
            }
        }
    }
}

/// Client side: send the data block once the start marker has been read
///
/// An empty marker line means the names are skipped; the sentinel is
/// still sent so the server leaves the sub-protocol. Names must have
/// passed `check_names` before LOAD was issued.
pub fn send_students<W: Write>(writer: &mut W, marker: &str, students: &[Student]) -> Result<()> {
    if !marker.is_empty() {
        for student in students {
            writer.write_all(student.fullname().as_bytes())?;
            writer.write_all(b"\n")?;
        }
    }
    writer.write_all(LOAD_END_OF_DATA.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Reject names that would break line framing or end the block early
pub fn check_names(students: &[Student]) -> Result<()> {
    for student in students {
        let name = student.fullname();
        if name.contains(['\n', '\r']) || name == LOAD_END_OF_DATA {
            return Err(RouletteError::Protocol(format!(
                "student name {:?} cannot be sent inside a LOAD block",
                name
            )));
        }
    }
    Ok(())
}
