//! Protocol codec
//!
//! Line framing and structured reply encoding for the wire protocol.
//!
//! ## Wire Format
//!
//! ```text
//! ┌─────────────────────────────────────────────┬──────┐
//! │          UTF-8 text (no newline)            │ \n   │
//! └─────────────────────────────────────────────┴──────┘
//! ```
//!
//! Structured replies are the same frame carrying one JSON object.

use std::io::{BufRead, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

// =============================================================================
// Structured Encoding/Decoding
// =============================================================================

/// Encode a structured reply as a single line of JSON (without newline)
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Decode a structured reply from one line
pub fn decode<T: DeserializeOwned>(line: &str) -> Result<T> {
    Ok(serde_json::from_str(line)?)
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one line from a stream
///
/// Blocks until a full line or end-of-stream. Returns `None` on a clean
/// end-of-stream; the line ending (`\n` or `\r\n`) is stripped. Bytes that
/// are not valid UTF-8 are replaced with U+FFFD so a garbled line is still
/// one line.
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Write one line to a stream and flush it
pub fn write_line<W: Write>(writer: &mut W, line: &str) -> Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write a structured reply as one line and flush it
pub fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<()> {
    let line = encode(value)?;
    write_line(writer, &line)
}
