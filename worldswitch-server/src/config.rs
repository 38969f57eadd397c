//! Server configuration
//!
//! Loaded from a TOML file; ports given on the command line override the
//! file. A missing default file falls back to built-in defaults, an
//! explicitly named file must exist and parse.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use worldswitch_protocol::{Coordinates, TeleportDestination, WorldSwitchOption};
use worldswitch_utils::{Result, WorldSwitchError};

/// File consulted when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "worldswitch.toml";

const DEFAULT_PORT: u16 = 25500;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Ports the relay accepts connections on
    pub listen_ports: Vec<u16>,
    /// Path to the external world-switch executable
    pub worldswitch_bin: PathBuf,
    /// Config file handed through to the tool
    pub tool_config: PathBuf,
    /// Teleport targets offered to clients
    pub teleports: Vec<TeleportEntry>,
    /// World pairs offered for inventory switches
    pub switches: Vec<SwitchEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeleportEntry {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwitchEntry {
    pub from: String,
    pub to: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_ports: vec![DEFAULT_PORT],
            worldswitch_bin: PathBuf::from("worldswitch-tool"),
            tool_config: PathBuf::from("worldswitch.ini"),
            teleports: Vec::new(),
            switches: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] when none is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) if !required => {
                info!("no config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(WorldSwitchError::ConfigInvalid {
                    path,
                    message: e.to_string(),
                })
            }
        };

        toml::from_str(&raw).map_err(|e| WorldSwitchError::ConfigInvalid {
            path,
            message: e.to_string(),
        })
    }

    pub fn teleport_destinations(&self) -> Vec<TeleportDestination> {
        self.teleports
            .iter()
            .map(|entry| TeleportDestination {
                name: entry.name.clone(),
                coords: Coordinates {
                    x: entry.x,
                    y: entry.y,
                    z: entry.z,
                },
            })
            .collect()
    }

    pub fn world_switch_options(&self) -> Vec<WorldSwitchOption> {
        self.switches
            .iter()
            .map(|entry| WorldSwitchOption {
                from: entry.from.clone(),
                to: entry.to.clone(),
            })
            .collect()
    }
}
