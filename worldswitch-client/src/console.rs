//! Console I/O boundary
//!
//! Prompt rendering and line reads go through this trait; the only
//! blocking I/O in the process is the console, kept off the reactor
//! threads. Tests script the console instead of driving a terminal.

use std::io::{BufRead, Write};

/// Blocking console used by the prompt engine
pub trait Console: Send {
    fn print(&mut self, text: &str);
    fn read_line(&mut self) -> String;
}

/// Console over process stdin/stdout
pub struct StdConsole;

impl Console for StdConsole {
    fn print(&mut self, text: &str) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }

    fn read_line(&mut self) -> String {
        let mut line = String::new();
        let stdin = std::io::stdin();
        let _ = stdin.lock().read_line(&mut line);
        line.trim_end_matches(['\r', '\n']).to_string()
    }
}
