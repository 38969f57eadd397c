//! Command-line argument parsing for the worldswitch client
//!
//! Uses clap for argument parsing with derive macros.

use clap::Parser;

/// worldswitch - interactive client for the relay server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Server host name or address
    pub host: String,

    /// Server TCP port
    pub port: u16,

    /// Initial command sent after connecting (e.g. "login,PhilipM")
    pub command: String,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
