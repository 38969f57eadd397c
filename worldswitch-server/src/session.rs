//! Per-connection session task
//!
//! A session owns exactly one accepted socket. The read half decodes
//! frames and hands each body to the room in arrival order; the write half
//! drains the outbound queue the room broadcasts into, in enqueue order.
//! Whichever side fails first ends the task, and the session leaves the
//! room exactly once on the way out.

use std::sync::atomic::{AtomicU64, Ordering};

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::Framed;
use tracing::{debug, warn};

use worldswitch_protocol::FrameCodec;

use crate::room::{RoomHandle, SessionId, OUTBOUND_QUEUE};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Mint a process-unique session id
pub fn next_session_id() -> SessionId {
    NEXT_SESSION_ID.fetch_add(1, Ordering::SeqCst)
}

/// Drive one connection until either side closes
pub async fn run_session(stream: TcpStream, room: RoomHandle) {
    let id = next_session_id();
    debug!("session {id} started");

    let framed = Framed::new(stream, FrameCodec::new());
    let (mut sink, mut frames) = framed.split();

    let (tx, mut rx) = mpsc::channel::<String>(OUTBOUND_QUEUE);
    room.join(id, tx).await;

    loop {
        tokio::select! {
            inbound = frames.next() => match inbound {
                Some(Ok(body)) => room.deliver(id, body).await,
                Some(Err(e)) => {
                    // Framing errors are fatal; no resynchronization
                    warn!("session {id} framing error: {e}");
                    break;
                }
                None => {
                    debug!("session {id} peer closed");
                    break;
                }
            },
            outbound = rx.recv() => match outbound {
                Some(body) => {
                    if let Err(e) = sink.send(body).await {
                        warn!("session {id} write error: {e}");
                        break;
                    }
                }
                // The room dropped us; nothing is left to flush
                None => break,
            },
        }
    }

    room.leave(id).await;
    debug!("session {id} closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_unique() {
        let a = next_session_id();
        let b = next_session_id();
        assert_ne!(a, b);
    }
}
