//! Connection Handler
//!
//! Binds a TCP stream to a session.

use std::io::{BufReader, BufWriter, ErrorKind};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Result, RouletteError};
use crate::protocol::ProtocolVersion;
use crate::store::StudentsStore;

use super::session::{Session, SessionEnd};

/// Handles a single client connection
pub struct Connection {
    /// Session over the buffered halves of the TCP stream
    session: Session<BufReader<TcpStream>, BufWriter<TcpStream>>,

    /// Handle on the underlying socket for socket options
    stream: TcpStream,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O and a tracing span named after the peer
    pub fn new(
        stream: TcpStream,
        store: Arc<dyn StudentsStore>,
        version: ProtocolVersion,
    ) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Replies are small and interactive
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream.try_clone()?;

        let span = tracing::info_span!("session", peer = %peer_addr, protocol = %version);

        Ok(Self {
            session: Session::new(
                BufReader::new(read_stream),
                BufWriter::new(write_stream),
                store,
                version,
                span,
            ),
            stream,
            peer_addr,
        })
    }

    /// Configure connection timeouts (0 leaves the socket blocking forever)
    pub fn set_timeouts(&self, read_ms: u64, write_ms: u64) -> Result<()> {
        if read_ms > 0 {
            self.stream.set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            self.stream.set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }
        Ok(())
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Returns when the client says BYE, disconnects, or an error occurs.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        match self.session.run() {
            Ok(SessionEnd::Bye) => {
                tracing::debug!(
                    "Client {} said BYE after {} command(s)",
                    self.peer_addr,
                    self.session.state().number_of_commands
                );
                Ok(())
            }
            Ok(SessionEnd::EndOfStream) => {
                tracing::debug!("Client {} disconnected", self.peer_addr);
                Ok(())
            }
            Err(RouletteError::Io(ref e))
                if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) =>
            {
                // Read timeout (Windows uses TimedOut instead of WouldBlock)
                tracing::debug!("Read timeout for client {}", self.peer_addr);
                Ok(())
            }
            Err(e) if e.is_disconnect() => {
                tracing::debug!("Client {} went away: {}", self.peer_addr, e);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Error on connection {}: {}", self.peer_addr, e);
                Err(e)
            }
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
