//! Command vocabulary and reserved delimiters
//!
//! Command matching is case-sensitive and exact. Field values must not
//! contain [`DELIMITER`]; the wire format has no escaping.

/// Field delimiter inside a frame body
pub const DELIMITER: char = ',';

/// Delimiter inside packed coordinate triples and packed record fields
pub const COORD_DELIMITER: char = ':';

/// Delimiter between packed sub-records carried in a single parameter
pub const LIST_DELIMITER: char = '|';

pub const QUIT: &str = "quit";
pub const LOGIN: &str = "login";
pub const ACKNOWLEDGE: &str = "acknowledge";
pub const MENU: &str = "menu";
pub const MENU_RESPONSE: &str = "menu_response";
pub const SAY: &str = "say";
pub const TELEPORT: &str = "teleport";
pub const TELEPORT_RESPONSE: &str = "teleport_response";
pub const GET_TELEPORTS: &str = "get_teleports";
pub const GET_TELEPORTS_RESPONSE: &str = "get_teleports_response";
pub const GET_WORLDSWITCHES: &str = "get_worldswitches";
pub const GET_WORLDSWITCHES_RESPONSE: &str = "get_worldswitches_response";
pub const WORLDSWITCH: &str = "worldswitch";
pub const WORLDSWITCH_RESPONSE: &str = "worldswitch_response";
pub const GET_COORDS: &str = "get_coords";
pub const GET_COORDS_RESPONSE: &str = "get_coords_response";

/// True when a response body signals session termination
///
/// Any body whose leading bytes are `quit` terminates the receiving
/// session; the match is a prefix match, not an exact one.
pub fn is_quit(body: &str) -> bool {
    body.starts_with(QUIT)
}
