//! Logical command messages carried inside frame bodies
//!
//! The wire form is `command,user,param1,param2,...`. Command and user are
//! required and non-empty; parameter order is significant and preserved on
//! round-trip. Field values must not contain the delimiter; there is no
//! escaping.

use std::fmt;
use std::str::FromStr;

use crate::commands::DELIMITER;

/// Message-level protocol error
///
/// Fatal to the single message only, never to the connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed message {raw:?}: command and user are required")]
    Malformed { raw: String },

    #[error("parameter index {index} out of range (message has {len} parameters)")]
    ParamOutOfRange { index: usize, len: usize },

    #[error("malformed packed value {value:?}: expected {expected}")]
    MalformedPacked { value: String, expected: &'static str },
}

/// A parsed command message: command name, user id, ordered parameters
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolMessage {
    command: String,
    user: String,
    params: Vec<String>,
}

impl ProtocolMessage {
    pub fn new(
        command: impl Into<String>,
        user: impl Into<String>,
        params: Vec<String>,
    ) -> Self {
        Self {
            command: command.into(),
            user: user.into(),
            params,
        }
    }

    /// Parse a wire body
    ///
    /// The first token is the command, the second the user, the rest the
    /// parameters in order. Fewer than two tokens, or an empty command or
    /// user, is a [`ProtocolError::Malformed`].
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let mut tokens = tokenize(raw, DELIMITER);
        if tokens.len() < 2 {
            return Err(ProtocolError::Malformed {
                raw: raw.to_string(),
            });
        }

        let command = tokens.remove(0);
        let user = tokens.remove(0);
        if command.is_empty() || user.is_empty() {
            return Err(ProtocolError::Malformed {
                raw: raw.to_string(),
            });
        }

        Ok(Self {
            command,
            user,
            params: tokens,
        })
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The nth parameter, indexed from 0
    ///
    /// For `teleport,PhilipM,200,300`, `param(0)` is `200` and `param(1)`
    /// is `300`. An index past the end is an explicit error, never an
    /// empty string.
    pub fn param(&self, index: usize) -> Result<&str, ProtocolError> {
        self.params
            .get(index)
            .map(String::as_str)
            .ok_or(ProtocolError::ParamOutOfRange {
                index,
                len: self.params.len(),
            })
    }

    /// The wire form: fields joined with the delimiter, params in order
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ProtocolMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.command, DELIMITER, self.user)?;
        for param in &self.params {
            write!(f, "{}{}", DELIMITER, param)?;
        }
        Ok(())
    }
}

impl FromStr for ProtocolMessage {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split on `delimiter`, dropping a trailing empty segment:
///
/// - `"a,b,c"`   → `["a", "b", "c"]`
/// - `"a,b,c,"`  → `["a", "b", "c"]`
/// - `"a,,b,c,"` → `["a", "", "b", "c"]`
/// - `","`, `""` → `[]`
pub fn tokenize(text: &str, delimiter: char) -> Vec<String> {
    let mut split: Vec<String> = text.split(delimiter).map(str::to_string).collect();
    if split.last().is_some_and(|last| last.is_empty()) {
        split.pop();
    }
    if split.len() == 1 && split[0].is_empty() {
        return Vec::new();
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_edge_cases() {
        assert_eq!(tokenize("a,b,c", ','), vec!["a", "b", "c"]);
        assert_eq!(tokenize("a,b,c,", ','), vec!["a", "b", "c"]);
        assert_eq!(tokenize("a,,b,c,", ','), vec!["a", "", "b", "c"]);
        assert_eq!(tokenize(",", ','), Vec::<String>::new());
        assert_eq!(tokenize("", ','), Vec::<String>::new());
    }

    #[test]
    fn test_parse_splits_fields_in_order() {
        let msg = ProtocolMessage::parse("teleport,PhilipM,200,300").unwrap();
        assert_eq!(msg.command(), "teleport");
        assert_eq!(msg.user(), "PhilipM");
        assert_eq!(msg.params(), ["200", "300"]);
    }

    #[test]
    fn test_parse_without_params() {
        let msg = ProtocolMessage::parse("login,alice").unwrap();
        assert_eq!(msg.command(), "login");
        assert_eq!(msg.user(), "alice");
        assert!(msg.params().is_empty());
    }

    #[test]
    fn test_parse_fewer_than_two_tokens_fails() {
        assert!(matches!(
            ProtocolMessage::parse("login"),
            Err(ProtocolError::Malformed { .. })
        ));
        assert!(matches!(
            ProtocolMessage::parse(""),
            Err(ProtocolError::Malformed { .. })
        ));
    }

    #[test]
    fn test_parse_empty_user_fails() {
        assert!(matches!(
            ProtocolMessage::parse("login,,extra"),
            Err(ProtocolError::Malformed { .. })
        ));
    }

    #[test]
    fn test_roundtrip_preserves_all_fields() {
        let msg = ProtocolMessage::new(
            "worldswitch",
            "alice",
            vec!["world1".into(), "world2".into()],
        );
        let parsed = ProtocolMessage::parse(&msg.serialize()).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_roundtrip_preserves_param_order() {
        let msg = ProtocolMessage::new("teleport", "bob", vec!["3".into(), "1".into(), "2".into()]);
        assert_eq!(msg.serialize(), "teleport,bob,3,1,2");
        let parsed = ProtocolMessage::parse("teleport,bob,3,1,2").unwrap();
        assert_eq!(parsed.params(), ["3", "1", "2"]);
    }

    #[test]
    fn test_param_indexing_is_zero_based() {
        let msg = ProtocolMessage::parse("teleport,PhilipM,200,300").unwrap();
        assert_eq!(msg.param(0).unwrap(), "200");
        assert_eq!(msg.param(1).unwrap(), "300");
    }

    #[test]
    fn test_param_out_of_range_is_an_error() {
        let msg = ProtocolMessage::parse("login,alice").unwrap();
        assert_eq!(
            msg.param(0),
            Err(ProtocolError::ParamOutOfRange { index: 0, len: 0 })
        );
    }
}
