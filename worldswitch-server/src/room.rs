//! Broadcast room shared by all connected sessions
//!
//! The room owns session membership, a bounded history of delivered
//! bodies, and the single message hook. All mutation happens on one task
//! consuming [`RoomCommand`]s, so no locking is needed; sessions talk to
//! the room through a cloned [`RoomHandle`].

use std::collections::{HashMap, VecDeque};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use worldswitch_protocol::commands;

/// Process-local session identifier
pub type SessionId = u64;

/// Delivered bodies retained in the history
pub const MAX_RECENT_MSGS: usize = 100;

/// Queue bound for a session's outbound frames; frames past it are dropped
pub const OUTBOUND_QUEUE: usize = 32;

/// Hook consulted for every delivered body
///
/// Returns the raw response body, or an empty string to suppress the
/// broadcast. Exactly one hook is attached per room, at construction.
pub trait MessageHandler: Send + 'static {
    fn handle(&self, raw: &str) -> String;
}

impl<F> MessageHandler for F
where
    F: Fn(&str) -> String + Send + 'static,
{
    fn handle(&self, raw: &str) -> String {
        self(raw)
    }
}

enum RoomCommand {
    Join {
        id: SessionId,
        sender: mpsc::Sender<String>,
    },
    Leave {
        id: SessionId,
    },
    Deliver {
        from: SessionId,
        body: String,
    },
}

/// Clonable message-passing facade for the room task
#[derive(Clone)]
pub struct RoomHandle {
    tx: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Add a session; `sender` feeds its outbound frame queue
    pub async fn join(&self, id: SessionId, sender: mpsc::Sender<String>) {
        let _ = self.tx.send(RoomCommand::Join { id, sender }).await;
    }

    /// Remove a session; a no-op when it is not a member
    pub async fn leave(&self, id: SessionId) {
        let _ = self.tx.send(RoomCommand::Leave { id }).await;
    }

    /// Deliver a decoded frame body from session `from`
    pub async fn deliver(&self, from: SessionId, body: String) {
        let _ = self.tx.send(RoomCommand::Deliver { from, body }).await;
    }
}

/// Session membership, delivery history, and the message hook
pub struct Room {
    members: HashMap<SessionId, mpsc::Sender<String>>,
    recent: VecDeque<String>,
    handler: Box<dyn MessageHandler>,
}

impl Room {
    pub fn new(handler: Box<dyn MessageHandler>) -> Self {
        Self {
            members: HashMap::new(),
            recent: VecDeque::new(),
            handler,
        }
    }

    /// Spawn the room task and return its handle
    ///
    /// The hook is fixed for the room's lifetime.
    pub fn spawn(handler: Box<dyn MessageHandler>) -> RoomHandle {
        let (tx, rx) = mpsc::channel(64);
        let room = Room::new(handler);
        tokio::spawn(room.run(rx));
        RoomHandle { tx }
    }

    async fn run(mut self, mut rx: mpsc::Receiver<RoomCommand>) {
        while let Some(command) = rx.recv().await {
            match command {
                RoomCommand::Join { id, sender } => self.join(id, sender),
                RoomCommand::Leave { id } => self.leave(id),
                RoomCommand::Deliver { from, body } => self.deliver(from, &body),
            }
        }
    }

    fn join(&mut self, id: SessionId, sender: mpsc::Sender<String>) {
        debug!("session {id} joined the room");
        self.members.insert(id, sender);
    }

    fn leave(&mut self, id: SessionId) {
        if self.members.remove(&id).is_some() {
            debug!("session {id} left the room");
        }
    }

    fn deliver(&mut self, from: SessionId, body: &str) {
        info!("session {from}: {body}");

        self.recent.push_back(body.to_string());
        while self.recent.len() > MAX_RECENT_MSGS {
            self.recent.pop_front();
        }

        let response = self.handler.handle(body);
        if response.is_empty() {
            return;
        }

        if commands::is_quit(&response) {
            // quit terminates the originating session, not the room
            self.send_to(from, &response);
            self.leave(from);
            return;
        }

        let ids: Vec<SessionId> = self.members.keys().copied().collect();
        for id in ids {
            self.send_to(id, &response);
        }
    }

    fn send_to(&mut self, id: SessionId, body: &str) {
        let Some(sender) = self.members.get(&id) else {
            return;
        };
        match sender.try_send(body.to_string()) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!("session {id} channel closed, removing from room");
                self.members.remove(&id);
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("session {id} queue full, frame dropped");
            }
        }
    }
}
