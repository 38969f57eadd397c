//! Server-side command dispatch
//!
//! Pure mapping from an inbound message to an outbound one (or nothing),
//! with every game-state effect delegated to the injected
//! [`WorldControl`]. A message that does not parse, carries an unknown
//! command, or has the wrong parameter count degrades to logging with no
//! response; the connection stays open.

use std::sync::Arc;

use tracing::{info, warn};

use worldswitch_protocol::types::pack_list;
use worldswitch_protocol::{commands, Coordinates, ProtocolError, ProtocolMessage};
use worldswitch_utils::{Result, WorldSwitchError};

use crate::room::MessageHandler;
use crate::world::WorldControl;

/// Fixed reply text for `say`
const SERVER_SAY_TEXT: &str = "this is a server message";

pub struct CommandDispatcher {
    world: Arc<dyn WorldControl>,
}

impl CommandDispatcher {
    pub fn new(world: Arc<dyn WorldControl>) -> Self {
        Self { world }
    }

    /// Map one inbound body to its response body; empty means no broadcast
    pub fn dispatch(&self, raw: &str) -> String {
        let message = match ProtocolMessage::parse(raw) {
            Ok(message) => message,
            Err(e) => {
                warn!("unparseable message {raw:?}: {e}");
                return String::new();
            }
        };

        match self.respond(&message) {
            Ok(Some(response)) => response.serialize(),
            Ok(None) => String::new(),
            Err(e) => {
                warn!("{} failed for {}: {e}", message.command(), message.user());
                String::new()
            }
        }
    }

    fn respond(&self, message: &ProtocolMessage) -> Result<Option<ProtocolMessage>> {
        let user = message.user();
        let arity = message.params().len();

        let response = match (message.command(), arity) {
            (commands::LOGIN, 0) | (commands::MENU, 0) => {
                ProtocolMessage::new(commands::MENU_RESPONSE, user, vec![])
            }
            (commands::SAY, 0) => {
                ProtocolMessage::new(commands::SAY, user, vec![SERVER_SAY_TEXT.to_string()])
            }
            (commands::GET_TELEPORTS, 0) => {
                let destinations = self.world.teleport_destinations(user)?;
                ProtocolMessage::new(
                    commands::GET_TELEPORTS_RESPONSE,
                    user,
                    vec![pack_list(&destinations)],
                )
            }
            (commands::GET_WORLDSWITCHES, 0) => {
                let options = self.world.world_switches(user)?;
                ProtocolMessage::new(
                    commands::GET_WORLDSWITCHES_RESPONSE,
                    user,
                    vec![pack_list(&options)],
                )
            }
            (commands::TELEPORT, 1) => {
                let coords: Coordinates =
                    message.param(0).and_then(str::parse).map_err(protocol_err)?;
                let report = self.world.teleport(user, &coords)?;
                ProtocolMessage::new(commands::TELEPORT_RESPONSE, user, vec![report])
            }
            (commands::WORLDSWITCH, 2) => {
                let from = message.param(0).map_err(protocol_err)?;
                let to = message.param(1).map_err(protocol_err)?;
                let report = self.world.switch_worlds(user, from, to)?;
                ProtocolMessage::new(commands::WORLDSWITCH_RESPONSE, user, vec![report])
            }
            (commands::GET_COORDS, 0) => {
                let coords = self.world.coordinates(user)?;
                ProtocolMessage::new(
                    commands::GET_COORDS_RESPONSE,
                    user,
                    vec![coords.to_string()],
                )
            }
            (commands::QUIT, _) => {
                info!("{user} quit");
                return Ok(None);
            }
            _ => {
                info!("unrecognized message: {message}");
                return Ok(None);
            }
        };

        Ok(Some(response))
    }
}

fn protocol_err(e: ProtocolError) -> WorldSwitchError {
    WorldSwitchError::protocol(e.to_string())
}

impl MessageHandler for CommandDispatcher {
    fn handle(&self, raw: &str) -> String {
        self.dispatch(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use worldswitch_protocol::TeleportDestination;
    use worldswitch_protocol::WorldSwitchOption;

    /// Records every effectful call; optionally fails them all
    struct FakeWorld {
        calls: Mutex<Vec<String>>,
        failing: bool,
    }

    impl FakeWorld {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failing: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failing: true,
            }
        }

        fn record(&self, call: String) -> Result<()> {
            self.calls.lock().unwrap().push(call);
            if self.failing {
                return Err(WorldSwitchError::world_control("tool unavailable"));
            }
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl WorldControl for FakeWorld {
        fn switch_worlds(&self, player: &str, from: &str, to: &str) -> Result<String> {
            self.record(format!("switch {player} {from} {to}"))?;
            Ok(format!("switched {player} between {from} and {to}"))
        }

        fn teleport(&self, player: &str, coords: &Coordinates) -> Result<String> {
            self.record(format!("teleport {player} {coords}"))?;
            Ok(format!("teleported {player} to {coords}"))
        }

        fn coordinates(&self, player: &str) -> Result<Coordinates> {
            self.record(format!("coords {player}"))?;
            Ok(Coordinates { x: 1, y: 2, z: 3 })
        }

        fn teleport_destinations(&self, _player: &str) -> Result<Vec<TeleportDestination>> {
            Ok(vec![
                TeleportDestination {
                    name: "Spawn".into(),
                    coords: Coordinates { x: 0, y: 64, z: 0 },
                },
                TeleportDestination {
                    name: "Home".into(),
                    coords: Coordinates { x: 10, y: 70, z: -5 },
                },
            ])
        }

        fn world_switches(&self, _player: &str) -> Result<Vec<WorldSwitchOption>> {
            Ok(vec![WorldSwitchOption {
                from: "world1".into(),
                to: "world2".into(),
            }])
        }
    }

    fn dispatcher(world: FakeWorld) -> (CommandDispatcher, Arc<FakeWorld>) {
        let world = Arc::new(world);
        (CommandDispatcher::new(world.clone()), world)
    }

    #[test]
    fn test_login_yields_menu_response() {
        let (dispatcher, _) = dispatcher(FakeWorld::new());
        assert_eq!(dispatcher.dispatch("login,alice"), "menu_response,alice");
    }

    #[test]
    fn test_menu_yields_menu_response() {
        let (dispatcher, _) = dispatcher(FakeWorld::new());
        assert_eq!(dispatcher.dispatch("menu,alice"), "menu_response,alice");
    }

    #[test]
    fn test_say_echoes_server_text() {
        let (dispatcher, _) = dispatcher(FakeWorld::new());
        assert_eq!(
            dispatcher.dispatch("say,alice"),
            "say,alice,this is a server message"
        );
    }

    #[test]
    fn test_get_teleports_packs_destinations() {
        let (dispatcher, _) = dispatcher(FakeWorld::new());
        assert_eq!(
            dispatcher.dispatch("get_teleports,alice"),
            "get_teleports_response,alice,Spawn:0:64:0|Home:10:70:-5"
        );
    }

    #[test]
    fn test_get_worldswitches_packs_options() {
        let (dispatcher, _) = dispatcher(FakeWorld::new());
        assert_eq!(
            dispatcher.dispatch("get_worldswitches,alice"),
            "get_worldswitches_response,alice,world1:world2"
        );
    }

    #[test]
    fn test_teleport_invokes_world_control() {
        let (dispatcher, world) = dispatcher(FakeWorld::new());
        assert_eq!(
            dispatcher.dispatch("teleport,alice,10:70:-5"),
            "teleport_response,alice,teleported alice to 10:70:-5"
        );
        assert_eq!(world.calls(), ["teleport alice 10:70:-5"]);
    }

    #[test]
    fn test_worldswitch_invokes_world_control() {
        let (dispatcher, world) = dispatcher(FakeWorld::new());
        assert_eq!(
            dispatcher.dispatch("worldswitch,alice,world1,world2"),
            "worldswitch_response,alice,switched alice between world1 and world2"
        );
        assert_eq!(world.calls(), ["switch alice world1 world2"]);
    }

    #[test]
    fn test_get_coords_reports_position() {
        let (dispatcher, _) = dispatcher(FakeWorld::new());
        assert_eq!(
            dispatcher.dispatch("get_coords,alice"),
            "get_coords_response,alice,1:2:3"
        );
    }

    #[test]
    fn test_worldswitch_arity_mismatch_is_not_dispatched() {
        let (dispatcher, world) = dispatcher(FakeWorld::new());
        assert_eq!(dispatcher.dispatch("worldswitch,alice,world1"), "");
        assert!(world.calls().is_empty());
    }

    #[test]
    fn test_teleport_arity_mismatch_is_not_dispatched() {
        let (dispatcher, world) = dispatcher(FakeWorld::new());
        assert_eq!(dispatcher.dispatch("teleport,alice,10,70,-5"), "");
        assert!(world.calls().is_empty());
    }

    #[test]
    fn test_teleport_with_bad_coordinates_yields_no_response() {
        let (dispatcher, world) = dispatcher(FakeWorld::new());
        assert_eq!(dispatcher.dispatch("teleport,alice,nowhere"), "");
        assert!(world.calls().is_empty());
    }

    #[test]
    fn test_world_control_failure_yields_no_response() {
        let (dispatcher, world) = dispatcher(FakeWorld::failing());
        assert_eq!(dispatcher.dispatch("worldswitch,alice,world1,world2"), "");
        assert_eq!(world.calls(), ["switch alice world1 world2"]);
    }

    #[test]
    fn test_quit_yields_no_response() {
        let (dispatcher, _) = dispatcher(FakeWorld::new());
        assert_eq!(dispatcher.dispatch("quit,alice"), "");
    }

    #[test]
    fn test_unrecognized_command_yields_no_response() {
        let (dispatcher, _) = dispatcher(FakeWorld::new());
        assert_eq!(dispatcher.dispatch("dance,alice"), "");
    }

    #[test]
    fn test_unparseable_message_yields_no_response() {
        let (dispatcher, _) = dispatcher(FakeWorld::new());
        assert_eq!(dispatcher.dispatch("login"), "");
        assert_eq!(dispatcher.dispatch(""), "");
    }
}
