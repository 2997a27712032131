//! # Roulette
//!
//! A classroom quiz server holding a pool of student names:
//! - Line-based text protocol over TCP, two protocol versions
//! - Structured replies encoded as single-line JSON objects
//! - Nested LOAD sub-protocol (sentinel-terminated bulk import)
//! - Blocking client that mirrors the server's framing exactly
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   RouletteClient                             │
//! │        (connect / load / random / info / list / bye)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  newline-framed UTF-8 text
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      TCP Server                              │
//! │                (one thread per connection)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Session                                │
//! │     GREETING → AWAITING_COMMAND (loop) → TERMINATED          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │ StudentsStore │
//!               │   (RwLock)    │
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, RouletteError};
pub use config::Config;
pub use store::{InMemoryStore, Student, StudentsStore};
pub use protocol::ProtocolVersion;
pub use client::RouletteClient;

// =============================================================================
// Version Info
// =============================================================================

/// Current crate version (distinct from the wire protocol version)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
