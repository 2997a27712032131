//! Protocol Tests
//!
//! Command grammar, reply encoding, and the LOAD sub-protocol.

mod command_tests;
mod load_tests;
