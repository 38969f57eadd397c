//! worldswitch client - interactive console for the relay
//!
//! Connects to a server, sends one initial command, then loops: each
//! server reply renders a prompt on the console thread, and the selected
//! action goes back over the wire. The loop is strictly request/response:
//! at most one outstanding command at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use worldswitch_utils::{init_logging, Result, WorldSwitchError};

mod cli;
mod connection;
mod console;
mod prompt;

use cli::Args;
use connection::Connection;
use console::{Console, StdConsole};
use prompt::PromptEngine;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_args();
    init_logging()?;
    info!("worldswitch client starting");

    if let Err(e) = run(args).await {
        // Runtime failures are reported but do not change the exit code
        error!("client error: {e}");
        eprintln!("Error: {e}");
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let Connection {
        outbound,
        mut inbound,
    } = Connection::open(&args.host, args.port).await?;

    let has_quit = Arc::new(AtomicBool::new(false));
    let quit_flag = Arc::clone(&has_quit);
    let initial = args.command;

    let console_loop = tokio::task::spawn_blocking(move || {
        let mut console = StdConsole;
        let mut engine = PromptEngine::new(StdConsole);

        console.print("press enter to continue\n");
        console.read_line();
        if outbound.blocking_send(initial).is_err() {
            return;
        }

        while let Some(raw) = inbound.blocking_recv() {
            match engine.handle_message(&raw) {
                Ok(Some(message)) => {
                    if outbound.blocking_send(message.serialize()).is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    quit_flag.store(true, Ordering::SeqCst);
                    break;
                }
                Err(e) => {
                    error!("protocol error: {e}");
                    break;
                }
            }
        }
    });

    console_loop
        .await
        .map_err(|e| WorldSwitchError::internal(format!("console loop panicked: {e}")))?;

    if has_quit.load(Ordering::SeqCst) {
        println!("quitting...");
    } else {
        info!("connection closed");
    }
    Ok(())
}
