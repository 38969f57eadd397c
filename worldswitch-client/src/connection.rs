//! Server connection plumbing
//!
//! Owns the framed TCP stream, split across two reactor tasks: one sinks
//! outbound bodies from a bounded queue, the other forwards each decoded
//! inbound body to the console thread. Read error or EOF closes the
//! inbound channel, which ends the console loop; there is no reconnect.

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::Framed;
use tracing::{debug, warn};

use worldswitch_protocol::FrameCodec;
use worldswitch_utils::{Result, WorldSwitchError};

/// Outbound and inbound queue bound
const CHANNEL_CAPACITY: usize = 32;

/// A live connection to the relay server
pub struct Connection {
    /// Serialized bodies to send
    pub outbound: mpsc::Sender<String>,
    /// Decoded bodies received
    pub inbound: mpsc::Receiver<String>,
}

impl Connection {
    /// Connect and spawn the read/write tasks
    pub async fn open(host: &str, port: u16) -> Result<Connection> {
        let addr = format!("{host}:{port}");
        let stream = TcpStream::connect(&addr).await.map_err(|e| {
            WorldSwitchError::connection(format!("failed to connect to {addr}: {e}"))
        })?;
        debug!("connected to {addr}");

        let framed = Framed::new(stream, FrameCodec::new());
        let (mut sink, mut frames) = framed.split();

        let (outbound_tx, mut outbound_rx) = mpsc::channel::<String>(CHANNEL_CAPACITY);
        let (inbound_tx, inbound_rx) = mpsc::channel::<String>(CHANNEL_CAPACITY);

        tokio::spawn(async move {
            while let Some(body) = outbound_rx.recv().await {
                if let Err(e) = sink.send(body).await {
                    warn!("write failed: {e}");
                    break;
                }
            }
            debug!("write task finished");
        });

        tokio::spawn(async move {
            loop {
                match frames.next().await {
                    Some(Ok(body)) => {
                        // The console loop going away ends this task too
                        if inbound_tx.send(body).await.is_err() {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        warn!("framing error: {e}");
                        break;
                    }
                    None => {
                        debug!("server closed the connection");
                        break;
                    }
                }
            }
        });

        Ok(Connection {
            outbound: outbound_tx,
            inbound: inbound_rx,
        })
    }
}
