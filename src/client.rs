//! Roulette Client
//!
//! Blocking client that mirrors the server's framing. Each operation is one
//! logical round trip; nothing is retried. A sequencing mismatch with the
//! server would leave both ends blocked on reads, so every reply line the
//! server sends is consumed here.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use serde::de::DeserializeOwned;

use crate::error::{Result, RouletteError};
use crate::protocol::{
    decode, load, read_line, write_line, ByeResponse, Command, InfoResponse, ListResponse,
    LoadResponse, RandomResponse, Status, RESPONSE_CLEAR_DONE,
};
use crate::store::Student;

/// Client connected to a Roulette server
pub struct RouletteClient {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    greeting: String,
}

impl RouletteClient {
    /// Connect and consume the server greeting
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;

        let mut client = Self {
            reader: BufReader::new(stream.try_clone()?),
            writer: BufWriter::new(stream),
            greeting: String::new(),
        };
        client.greeting = client.receive()?;
        tracing::debug!(greeting = %client.greeting, "connected");
        Ok(client)
    }

    /// The line the server sent on connect
    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Send BYE, read its reply, and close the connection
    pub fn disconnect(mut self) -> Result<ByeResponse> {
        let bye: ByeResponse = self.round_trip(Command::Bye)?;
        tracing::debug!(commands = bye.number_of_commands, "disconnected");
        Ok(bye)
    }

    // =========================================================================
    // Base protocol
    // =========================================================================

    /// Load one student through the full LOAD exchange
    pub fn load_student(&mut self, fullname: &str) -> Result<LoadResponse> {
        self.load_students(&[Student::new(fullname)])
    }

    /// Load several students through one LOAD exchange
    pub fn load_students(&mut self, students: &[Student]) -> Result<LoadResponse> {
        // Checked before LOAD so a bad name never leaves the server mid-block
        load::check_names(students)?;

        self.send(Command::Load.token())?;
        let marker = self.receive()?;
        load::send_students(&mut self.writer, &marker, students)?;

        let response: LoadResponse = decode(&self.receive()?)?;
        match response.status {
            Status::Success => Ok(response),
            Status::Failure => Err(RouletteError::LoadFailed),
        }
    }

    /// Ask the server for a random student
    ///
    /// An `error` reply becomes `RouletteError::EmptyStore`.
    pub fn pick_random_student(&mut self) -> Result<Student> {
        let response: RandomResponse = self.round_trip(Command::Random)?;
        if response.error_message().is_some() {
            return Err(RouletteError::EmptyStore);
        }
        response
            .fullname()
            .map(Student::new)
            .ok_or_else(|| RouletteError::Protocol("RANDOM reply has no fullname".to_string()))
    }

    /// Protocol version and store size in one round trip
    pub fn info(&mut self) -> Result<InfoResponse> {
        self.round_trip(Command::Info)
    }

    /// Store size, from a fresh INFO
    pub fn number_of_students(&mut self) -> Result<usize> {
        Ok(self.info()?.number_of_students)
    }

    /// Server protocol version, from a fresh INFO
    pub fn protocol_version(&mut self) -> Result<String> {
        Ok(self.info()?.protocol_version)
    }

    // =========================================================================
    // Extended protocol
    // =========================================================================

    /// All students, in store order
    pub fn list_students(&mut self) -> Result<Vec<Student>> {
        let response: ListResponse = self.round_trip(Command::List)?;
        Ok(response.students)
    }

    /// Empty the store
    pub fn clear_data_store(&mut self) -> Result<()> {
        self.send(Command::Clear.token())?;
        let reply = self.receive()?;
        if reply != RESPONSE_CLEAR_DONE {
            return Err(RouletteError::Protocol(format!(
                "unexpected CLEAR reply: {}",
                reply
            )));
        }
        Ok(())
    }

    /// The server's HELP line
    pub fn help(&mut self) -> Result<String> {
        self.send(Command::Help.token())?;
        self.receive()
    }

    // =========================================================================
    // Line I/O
    // =========================================================================

    fn round_trip<T: DeserializeOwned>(&mut self, command: Command) -> Result<T> {
        self.send(command.token())?;
        let line = self.receive()?;
        decode(&line)
    }

    fn send(&mut self, line: &str) -> Result<()> {
        tracing::trace!(line, "send");
        write_line(&mut self.writer, line)
    }

    fn receive(&mut self) -> Result<String> {
        let line = read_line(&mut self.reader)?.ok_or_else(|| {
            RouletteError::ConnectionClosed("server closed the connection".to_string())
        })?;
        tracing::trace!(line = %line, "receive");
        Ok(line)
    }
}
