//! TCP Server
//!
//! Accepts connections and runs one session thread per client.

use std::io::{self, ErrorKind};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::store::StudentsStore;

use super::Connection;

/// Cloneable handle that asks a running server to stop accepting
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Request shutdown; the accept loop exits at its next poll
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_shutdown(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// TCP server for Roulette
///
/// The store is the only state shared between sessions.
pub struct Server {
    config: Config,
    store: Arc<dyn StudentsStore>,
    listener: TcpListener,
    shutdown: ShutdownHandle,
    active_connections: Arc<AtomicUsize>,
}

impl Server {
    /// Bind the configured listen address
    pub fn bind(config: Config, store: Arc<dyn StudentsStore>) -> Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr)?;

        // Non-blocking accept so the loop can observe shutdown requests
        listener.set_nonblocking(true)?;

        Ok(Self {
            config,
            store,
            listener,
            shutdown: ShutdownHandle::default(),
            active_connections: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Handle for stopping `run` from another thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Number of sessions currently running
    pub fn active_connections(&self) -> usize {
        self.active_connections.load(Ordering::Relaxed)
    }

    /// Start the server (blocking until shutdown)
    ///
    /// Sessions already running are left to finish on their own threads.
    pub fn run(&self) -> Result<()> {
        tracing::info!(
            "Listening on {} (protocol {})",
            self.local_addr()?,
            self.config.protocol_version
        );

        let poll = Duration::from_millis(self.config.accept_poll_ms.max(1));

        while !self.shutdown.is_shutdown() {
            match self.listener.accept() {
                Ok((stream, addr)) => {
                    if let Err(e) = self.dispatch(stream, addr) {
                        tracing::warn!("Failed to start session for {}: {}", addr, e);
                    }
                }
                Err(e) => match classify_accept_error(&e) {
                    AcceptError::Idle => thread::sleep(poll),
                    AcceptError::Retry => {
                        tracing::debug!("Accept interrupted: {}", e);
                    }
                    AcceptError::Backoff => {
                        // e.g. EMFILE: wait for sessions to release descriptors
                        tracing::warn!("Accept failed, backing off: {}", e);
                        thread::sleep(poll);
                    }
                },
            }
        }

        tracing::info!("Server shutting down");
        Ok(())
    }

    /// Hand an accepted stream to its own session thread
    fn dispatch(&self, stream: TcpStream, addr: SocketAddr) -> Result<()> {
        let active = self.active_connections.fetch_add(1, Ordering::SeqCst);
        if active >= self.config.max_connections {
            self.active_connections.fetch_sub(1, Ordering::SeqCst);
            tracing::warn!(
                "Refusing {}: {} connections already active",
                addr,
                active
            );
            return Ok(());
        }

        // Dropped with the connection if the session never starts
        let guard = ActiveGuard(Arc::clone(&self.active_connections));
        self.spawn_session(stream, guard)
    }

    fn spawn_session(&self, stream: TcpStream, guard: ActiveGuard) -> Result<()> {
        // Accepted sockets inherit non-blocking mode on some platforms
        stream.set_nonblocking(false)?;

        let mut connection =
            Connection::new(stream, Arc::clone(&self.store), self.config.protocol_version)?;
        connection.set_timeouts(self.config.read_timeout_ms, self.config.write_timeout_ms)?;

        thread::Builder::new()
            .name(format!("session-{}", connection.peer_addr()))
            .spawn(move || {
                let _guard = guard;
                if let Err(e) = connection.handle() {
                    // Already logged by the connection
                    tracing::trace!(
                        "Session for {} ended with error: {}",
                        connection.peer_addr(),
                        e
                    );
                }
            })?;
        Ok(())
    }
}

/// What the accept loop does after a failed `accept`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AcceptError {
    /// No pending connection
    Idle,
    /// The failure concerned one connection only; accept again at once
    Retry,
    /// Resource pressure or an unexpected error; pause before retrying
    Backoff,
}

/// No accept failure stops the server; only shutdown does
fn classify_accept_error(e: &io::Error) -> AcceptError {
    match e.kind() {
        ErrorKind::WouldBlock => AcceptError::Idle,
        ErrorKind::Interrupted
        | ErrorKind::ConnectionAborted
        | ErrorKind::ConnectionReset => AcceptError::Retry,
        _ => AcceptError::Backoff,
    }
}

/// Decrements the active connection count when a session ends
struct ActiveGuard(Arc<AtomicUsize>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
