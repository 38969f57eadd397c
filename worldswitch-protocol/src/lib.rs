//! worldswitch-protocol: Wire protocol shared by server and client
//!
//! The transport exchanges length-prefixed text frames ([`codec`]); each
//! frame body is a delimiter-joined command string ([`message`]). Command
//! names and the reserved delimiters live in [`commands`]; packed parameter
//! payloads (coordinate triples, teleport destinations, world-switch pairs)
//! in [`types`].

pub mod codec;
pub mod commands;
pub mod message;
pub mod types;

pub use codec::{FrameCodec, FrameError, HEADER_LEN, MAX_BODY_LEN};
pub use message::{ProtocolError, ProtocolMessage};
pub use types::{Coordinates, TeleportDestination, WorldSwitchOption};
