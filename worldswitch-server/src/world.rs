//! External world-control collaborator
//!
//! The dispatcher performs game-state effects through [`WorldControl`].
//! The production implementation shells out to the world-switch tool; the
//! tests inject a fake.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use worldswitch_protocol::{Coordinates, TeleportDestination, WorldSwitchOption};
use worldswitch_utils::{Result, WorldSwitchError};

use crate::config::AppConfig;

/// Game-state operations the dispatcher can trigger
pub trait WorldControl: Send + Sync {
    /// Swap `player`'s inventory between two worlds; returns a report line
    fn switch_worlds(&self, player: &str, from: &str, to: &str) -> Result<String>;

    /// Move `player` to `coords`; returns a report line
    fn teleport(&self, player: &str, coords: &Coordinates) -> Result<String>;

    /// Current position of `player`
    fn coordinates(&self, player: &str) -> Result<Coordinates>;

    /// Teleport targets offered to `player`
    fn teleport_destinations(&self, player: &str) -> Result<Vec<TeleportDestination>>;

    /// World pairs `player` may switch between
    fn world_switches(&self, player: &str) -> Result<Vec<WorldSwitchOption>>;
}

/// [`WorldControl`] backed by the external world-switch executable
///
/// Invocations are synchronous: the tool runs to completion before the
/// response is produced, stalling delivery for its duration.
pub struct ProcessWorldControl {
    binary: PathBuf,
    tool_config: PathBuf,
    teleports: Vec<TeleportDestination>,
    switches: Vec<WorldSwitchOption>,
}

impl ProcessWorldControl {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            binary: config.worldswitch_bin.clone(),
            tool_config: config.tool_config.clone(),
            teleports: config.teleport_destinations(),
            switches: config.world_switch_options(),
        }
    }

    fn run_tool(&self, args: &[&str]) -> Result<String> {
        debug!("invoking {} {:?}", self.binary.display(), args);

        let output = Command::new(&self.binary).args(args).output().map_err(|e| {
            WorldSwitchError::world_control(format!(
                "failed to run {}: {e}",
                self.binary.display()
            ))
        })?;

        if !output.status.success() {
            return Err(WorldSwitchError::world_control(format!(
                "{} exited with {}",
                self.binary.display(),
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl WorldControl for ProcessWorldControl {
    fn switch_worlds(&self, player: &str, from: &str, to: &str) -> Result<String> {
        let tool_config = self.tool_config.to_string_lossy();
        self.run_tool(&["switch", &tool_config, from, to, player])?;
        Ok(format!("switched {player} between {from} and {to}"))
    }

    fn teleport(&self, player: &str, coords: &Coordinates) -> Result<String> {
        let tool_config = self.tool_config.to_string_lossy();
        let packed = coords.to_string();
        self.run_tool(&["teleport", &tool_config, player, &packed])?;
        Ok(format!("teleported {player} to {packed}"))
    }

    fn coordinates(&self, player: &str) -> Result<Coordinates> {
        let tool_config = self.tool_config.to_string_lossy();
        let stdout = self.run_tool(&["coords", &tool_config, player])?;
        stdout.parse().map_err(|_| {
            WorldSwitchError::world_control(format!(
                "unparseable coordinates from tool: {stdout:?}"
            ))
        })
    }

    fn teleport_destinations(&self, _player: &str) -> Result<Vec<TeleportDestination>> {
        Ok(self.teleports.clone())
    }

    fn world_switches(&self, _player: &str) -> Result<Vec<WorldSwitchOption>> {
        Ok(self.switches.clone())
    }
}
