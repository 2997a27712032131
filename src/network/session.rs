//! Session state machine
//!
//! Per-connection command loop, independent of the transport:
//!
//! ```text
//! GREETING ──▶ AWAITING_COMMAND ──(BYE | end-of-stream)──▶ TERMINATED
//!                 ▲         │
//!                 └─────────┘ one line read, one reply written
//! ```

use std::io::{BufRead, Write};
use std::sync::Arc;

use tracing::Span;

use crate::error::Result;
use crate::protocol::{
    load, read_line, write_json, write_line, ByeResponse, Command, InfoResponse, ListResponse,
    LoadResponse, ProtocolVersion, RandomResponse, GREETING, RANDOM_EMPTY_STORE_ERROR,
    RESPONSE_CLEAR_DONE, RESPONSE_LOAD_START, RESPONSE_UNKNOWN,
};
use crate::store::StudentsStore;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The client sent BYE
    Bye,
    /// The input stream ended without BYE
    EndOfStream,
}

/// Mutable per-session record threaded through each dispatch step
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Every line consumed as a command, including the final BYE
    pub number_of_commands: u64,

    /// Students added by the most recent LOAD
    pub number_of_new_students: usize,

    /// Set once; nothing is read afterwards
    pub terminated: bool,
}

/// One client session over a line-oriented reader/writer pair
pub struct Session<R, W> {
    reader: R,
    writer: W,
    store: Arc<dyn StudentsStore>,
    version: ProtocolVersion,
    state: SessionState,
    span: Span,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session; `span` scopes every log line it emits
    pub fn new(
        reader: R,
        writer: W,
        store: Arc<dyn StudentsStore>,
        version: ProtocolVersion,
        span: Span,
    ) -> Self {
        Self {
            reader,
            writer,
            store,
            version,
            state: SessionState::default(),
            span,
        }
    }

    /// Run the session to completion (blocking)
    ///
    /// Sends the greeting, then handles one command per line until BYE or
    /// end-of-stream. Bad commands never end the session; I/O errors do.
    pub fn run(&mut self) -> Result<SessionEnd> {
        let span = self.span.clone();
        let _guard = span.enter();

        write_line(&mut self.writer, GREETING)?;

        while !self.state.terminated {
            let Some(line) = read_line(&mut self.reader)? else {
                tracing::debug!(
                    commands = self.state.number_of_commands,
                    "end of stream without BYE"
                );
                self.state.terminated = true;
                return Ok(SessionEnd::EndOfStream);
            };

            self.state.number_of_commands += 1;
            tracing::info!(command = %line, "COMMAND");
            self.dispatch(&line)?;
        }

        Ok(SessionEnd::Bye)
    }

    /// Current session record
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Handle one command line, writing its reply(ies)
    fn dispatch(&mut self, line: &str) -> Result<()> {
        let Some(command) = Command::parse(line, self.version) else {
            tracing::debug!(line, "unknown command");
            return write_line(&mut self.writer, RESPONSE_UNKNOWN);
        };

        match command {
            Command::Help => write_line(&mut self.writer, &self.version.help_line()),
            Command::Random => {
                let response = match self.store.pick_random() {
                    Ok(student) => RandomResponse::picked(&student),
                    Err(_) => RandomResponse::error(RANDOM_EMPTY_STORE_ERROR),
                };
                write_json(&mut self.writer, &response)
            }
            Command::Info => {
                let response = InfoResponse {
                    protocol_version: self.version.as_str().to_string(),
                    number_of_students: self.store.len(),
                };
                write_json(&mut self.writer, &response)
            }
            Command::List => {
                let response = ListResponse {
                    students: self.store.list(),
                };
                write_json(&mut self.writer, &response)
            }
            Command::Clear => {
                self.store.clear();
                write_line(&mut self.writer, RESPONSE_CLEAR_DONE)
            }
            Command::Load => self.handle_load(),
            Command::Bye => {
                let response = ByeResponse::success(self.state.number_of_commands);
                self.state.terminated = true;
                write_json(&mut self.writer, &response)
            }
        }
    }

    /// LOAD: marker, data block up to the sentinel, then one reply
    ///
    /// If the data block cannot be read in full nothing is imported, a
    /// single failure reply is attempted, and the error ends the session.
    fn handle_load(&mut self) -> Result<()> {
        write_line(&mut self.writer, RESPONSE_LOAD_START)?;

        let students = match load::receive_students(&mut self.reader) {
            Ok(students) => students,
            Err(e) => {
                tracing::warn!(error = %e, "LOAD aborted");
                let _ = write_json(&mut self.writer, &LoadResponse::failure());
                self.state.terminated = true;
                return Err(e);
            }
        };

        let added = self.store.import(students);
        self.state.number_of_new_students = added;
        tracing::debug!(added, total = self.store.len(), "LOAD complete");

        write_json(&mut self.writer, &LoadResponse::success(added))
    }
}
