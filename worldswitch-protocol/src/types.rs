//! Packed parameter payloads
//!
//! Some parameters carry structured values packed with the auxiliary
//! delimiters: coordinate triples as `x:y:z`, and `|`-separated lists of
//! packed records (teleport destinations, world-switch pairs).

use std::fmt;
use std::str::FromStr;

use crate::commands::{COORD_DELIMITER, LIST_DELIMITER};
use crate::message::ProtocolError;

/// A block position in a world, packed as `x:y:z`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.x,
            self.y,
            self.z,
            sep = COORD_DELIMITER
        )
    }
}

impl FromStr for Coordinates {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ProtocolError::MalformedPacked {
            value: s.to_string(),
            expected: "x:y:z",
        };

        let mut parts = s.split(COORD_DELIMITER);
        let mut next = || -> Result<i32, ProtocolError> {
            parts
                .next()
                .and_then(|part| part.parse().ok())
                .ok_or_else(malformed)
        };

        let x = next()?;
        let y = next()?;
        let z = next()?;
        if parts.next().is_some() {
            return Err(malformed());
        }

        Ok(Self { x, y, z })
    }
}

/// A named teleport target, packed as `name:x:y:z`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeleportDestination {
    pub name: String,
    pub coords: Coordinates,
}

impl fmt::Display for TeleportDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, COORD_DELIMITER, self.coords)
    }
}

impl FromStr for TeleportDestination {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ProtocolError::MalformedPacked {
            value: s.to_string(),
            expected: "name:x:y:z",
        };

        let (name, rest) = s.split_once(COORD_DELIMITER).ok_or_else(malformed)?;
        if name.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            name: name.to_string(),
            coords: rest.parse().map_err(|_| malformed())?,
        })
    }
}

/// A pair of worlds an inventory can move between, packed as `from:to`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSwitchOption {
    pub from: String,
    pub to: String,
}

impl fmt::Display for WorldSwitchOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.from, COORD_DELIMITER, self.to)
    }
}

impl FromStr for WorldSwitchOption {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ProtocolError::MalformedPacked {
            value: s.to_string(),
            expected: "from:to",
        };

        let (from, to) = s.split_once(COORD_DELIMITER).ok_or_else(malformed)?;
        if from.is_empty() || to.is_empty() || to.contains(COORD_DELIMITER) {
            return Err(malformed());
        }

        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

/// Join packed records into one `|`-separated parameter value
pub fn pack_list<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(&LIST_DELIMITER.to_string())
}

/// Split a `|`-packed parameter value back into records
///
/// An empty value is an empty list, not an error.
pub fn unpack_list<T>(raw: &str) -> Result<Vec<T>, ProtocolError>
where
    T: FromStr<Err = ProtocolError>,
{
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(LIST_DELIMITER).map(T::from_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_display() {
        let coords = Coordinates { x: 200, y: 64, z: -300 };
        assert_eq!(coords.to_string(), "200:64:-300");
    }

    #[test]
    fn test_coordinates_parse() {
        let coords: Coordinates = "200:64:-300".parse().unwrap();
        assert_eq!(coords, Coordinates { x: 200, y: 64, z: -300 });
    }

    #[test]
    fn test_coordinates_parse_rejects_wrong_arity() {
        assert!("200:64".parse::<Coordinates>().is_err());
        assert!("200:64:1:7".parse::<Coordinates>().is_err());
        assert!("a:b:c".parse::<Coordinates>().is_err());
    }

    #[test]
    fn test_teleport_destination_roundtrip() {
        let dest = TeleportDestination {
            name: "Spawn".into(),
            coords: Coordinates { x: 0, y: 64, z: 0 },
        };
        assert_eq!(dest.to_string(), "Spawn:0:64:0");
        assert_eq!(dest.to_string().parse::<TeleportDestination>().unwrap(), dest);
    }

    #[test]
    fn test_world_switch_option_roundtrip() {
        let option = WorldSwitchOption {
            from: "world1".into(),
            to: "world2".into(),
        };
        assert_eq!(option.to_string(), "world1:world2");
        assert_eq!(option.to_string().parse::<WorldSwitchOption>().unwrap(), option);
    }

    #[test]
    fn test_pack_list_joins_records() {
        let options = vec![
            WorldSwitchOption { from: "world1".into(), to: "world2".into() },
            WorldSwitchOption { from: "world2".into(), to: "world3".into() },
        ];
        assert_eq!(pack_list(&options), "world1:world2|world2:world3");
    }

    #[test]
    fn test_unpack_list() {
        let unpacked: Vec<WorldSwitchOption> =
            unpack_list("world1:world2|world2:world3").unwrap();
        assert_eq!(unpacked.len(), 2);
        assert_eq!(unpacked[1].to, "world3");
    }

    #[test]
    fn test_unpack_empty_list() {
        let unpacked: Vec<TeleportDestination> = unpack_list("").unwrap();
        assert!(unpacked.is_empty());
    }

    #[test]
    fn test_unpack_list_propagates_bad_record() {
        let result: Result<Vec<Coordinates>, _> = unpack_list("1:2:3|nope");
        assert!(result.is_err());
    }
}
