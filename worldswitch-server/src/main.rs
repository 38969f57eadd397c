//! worldswitch server - relay daemon
//!
//! Accepts TCP connections on one or more ports, records and fans every
//! inbound command through the shared room, and answers through the command
//! dispatcher backed by the external world-switch tool.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use worldswitch_utils::{init_logging, Result, WorldSwitchError};

mod config;
mod dispatch;
mod room;
mod session;
mod tcp;
mod world;

use config::AppConfig;
use dispatch::CommandDispatcher;
use room::Room;
use world::ProcessWorldControl;

struct Args {
    config: Option<PathBuf>,
    ports: Vec<u16>,
}

fn usage() -> ! {
    eprintln!("Usage: worldswitch-server [--config <file>] [<port> ...]");
    std::process::exit(1);
}

fn parse_args() -> Args {
    let mut config = None;
    let mut ports = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => match args.next() {
                Some(path) => config = Some(PathBuf::from(path)),
                None => usage(),
            },
            "--help" | "-h" => usage(),
            other => match other.parse::<u16>() {
                Ok(port) => ports.push(port),
                Err(_) => usage(),
            },
        }
    }

    Args { config, ports }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args();
    init_logging()?;
    info!("worldswitch server starting");

    if let Err(e) = run(args).await {
        // Runtime failures are reported but do not change the exit code
        error!("server error: {e}");
        eprintln!("Error: {e}");
    }

    info!("worldswitch server stopped");
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let config = AppConfig::load(args.config.as_deref())?;
    let ports = if args.ports.is_empty() {
        config.listen_ports.clone()
    } else {
        args.ports
    };
    if ports.is_empty() {
        return Err(WorldSwitchError::config("no listen ports configured"));
    }

    let world = Arc::new(ProcessWorldControl::new(&config));
    let dispatcher = CommandDispatcher::new(world);
    let room = Room::spawn(Box::new(dispatcher));

    let mut listeners = Vec::new();
    for port in ports {
        info!("listening on port {port}");
        let addr = format!("0.0.0.0:{port}");
        listeners.push(tokio::spawn(tcp::run_accept_loop(addr, room.clone())));
    }

    for listener in listeners {
        let _ = listener.await;
    }
    Ok(())
}
