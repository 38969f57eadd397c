//! TCP accept loops
//!
//! One accept loop per configured port; every loop feeds sessions into the
//! same shared room. An accept error on one listener is logged and that
//! loop keeps going; it never disturbs the other listeners.

use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::room::RoomHandle;
use crate::session;

/// Bind `addr` and accept connections until the process exits
///
/// Returns early only if the bind itself fails.
pub async fn run_accept_loop(addr: String, room: RoomHandle) {
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind listener to {addr}: {e}");
            return;
        }
    };
    info!("listener bound to {addr}");
    accept_on(listener, room).await;
}

/// Accept loop over an already-bound listener
pub async fn accept_on(listener: TcpListener, room: RoomHandle) {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                debug!("new connection from {peer_addr}");
                let room = room.clone();
                tokio::spawn(async move {
                    session::run_session(stream, room).await;
                });
            }
            Err(e) => {
                error!("accept error: {e}");
            }
        }
    }
}
