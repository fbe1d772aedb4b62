//! CCP protocol handling.
//!
//! Implements the command parser for the CCP (Conquest Command Protocol)
//! line interface spoken by the main loop: one command per line on stdin,
//! responses and event notifications on stdout.

pub mod parser;

pub use parser::{parse_command, Command, PlayerSpec};
