//! Configuration for Roulette
//!
//! Centralized configuration with sensible defaults.

use crate::protocol::ProtocolVersion;

/// Main configuration for a Roulette server instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Protocol version spoken by every session of this server
    pub protocol_version: ProtocolVersion,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// Max concurrent client connections
    pub max_connections: usize,

    /// Connection read timeout (milliseconds, 0 = block forever)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = block forever)
    pub write_timeout_ms: u64,

    /// How often the accept loop checks for shutdown (milliseconds)
    pub accept_poll_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let protocol_version = ProtocolVersion::V2;
        Self {
            protocol_version,
            listen_addr: format!("127.0.0.1:{}", protocol_version.default_port()),
            max_connections: 1024,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            accept_poll_ms: 50,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,

    /// Set once `listen_addr` is called explicitly
    listen_addr_set: bool,
}

impl ConfigBuilder {
    /// Set the protocol version
    ///
    /// Unless a listen address was given, the address follows the
    /// version's default port on localhost.
    pub fn protocol_version(mut self, version: ProtocolVersion) -> Self {
        self.config.protocol_version = version;
        if !self.listen_addr_set {
            self.config.listen_addr = format!("127.0.0.1:{}", version.default_port());
        }
        self
    }

    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self.listen_addr_set = true;
        self
    }

    /// Set the maximum number of concurrent connections
    pub fn max_connections(mut self, count: usize) -> Self {
        self.config.max_connections = count;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the accept loop shutdown poll interval (in milliseconds)
    pub fn accept_poll_ms(mut self, ms: u64) -> Self {
        self.config.accept_poll_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
