//! Network Module
//!
//! TCP server and per-connection sessions.
//!
//! ## Architecture
//! - Single acceptor thread (non-blocking accept, polled for shutdown)
//! - One thread per connection, strictly sequential reads and writes
//! - Sessions share only the store

mod server;
mod connection;
mod session;

pub use server::{Server, ShutdownHandle};
pub use connection::Connection;
pub use session::{Session, SessionEnd, SessionState};
