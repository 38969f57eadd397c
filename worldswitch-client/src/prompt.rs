//! Interactive prompt states
//!
//! Each inbound server message selects a prompt variant. The variant
//! renders any message text, builds a numbered action list with the
//! reserved back/quit entries appended last, blocks for one line of
//! input, and yields the selected action's outbound command. Input that
//! matches no shortcut selects the final reserved quit entry.

use worldswitch_protocol::types::unpack_list;
use worldswitch_protocol::{
    commands, ProtocolError, ProtocolMessage, TeleportDestination, WorldSwitchOption,
};

use crate::console::Console;

/// One selectable menu entry
struct UserAction {
    shortcut: String,
    label: String,
    command: ProtocolMessage,
}

impl UserAction {
    fn option_text(&self) -> String {
        format!("{}. {}\n", self.shortcut, self.label)
    }

    fn matches(&self, input: &str) -> bool {
        self.shortcut == input
    }
}

/// Ordered action list under construction for one prompt
///
/// Shortcuts are assigned sequentially from 1 in insertion order.
struct ActionList {
    user: String,
    actions: Vec<UserAction>,
}

impl ActionList {
    fn new(user: &str) -> Self {
        Self {
            user: user.to_string(),
            actions: Vec::new(),
        }
    }

    fn add(&mut self, label: &str, command: &str, params: Vec<String>) {
        let shortcut = (self.actions.len() + 1).to_string();
        self.actions.push(UserAction {
            shortcut,
            label: label.to_string(),
            command: ProtocolMessage::new(command, self.user.clone(), params),
        });
    }

    /// Append the reserved quit entry, print every option, read one line,
    /// and return the matching action's command
    ///
    /// Unmatched input selects the final entry; never an error.
    fn prompt(mut self, console: &mut dyn Console) -> ProtocolMessage {
        self.add("Quit", commands::QUIT, vec![]);

        for action in &self.actions {
            console.print(&action.option_text());
        }

        let input = console.read_line();
        let input = input.trim();
        match self.actions.iter().find(|action| action.matches(input)) {
            Some(action) => action.command.clone(),
            None => self.actions[self.actions.len() - 1].command.clone(),
        }
    }
}

/// Prompt variants, selected by the inbound command name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Top-level menu
    Menu,
    /// Server text display with a teleport follow-up
    Say,
    /// Teleport destination choice
    Teleports,
    /// World-switch pair choice
    WorldSwitches,
    /// Effect report display
    Report,
}

impl Prompt {
    /// Select the prompt for an inbound command; `None` means quit
    pub fn for_command(command: &str) -> Option<Prompt> {
        match command {
            commands::MENU_RESPONSE | commands::ACKNOWLEDGE => Some(Prompt::Menu),
            commands::SAY => Some(Prompt::Say),
            commands::GET_TELEPORTS_RESPONSE => Some(Prompt::Teleports),
            commands::GET_WORLDSWITCHES_RESPONSE => Some(Prompt::WorldSwitches),
            commands::TELEPORT_RESPONSE
            | commands::WORLDSWITCH_RESPONSE
            | commands::GET_COORDS_RESPONSE => Some(Prompt::Report),
            _ => None,
        }
    }

    /// Render the prompt for `message`, collect one selection, and return
    /// the chosen outbound command
    pub fn run(
        self,
        message: &ProtocolMessage,
        console: &mut dyn Console,
    ) -> Result<ProtocolMessage, ProtocolError> {
        let mut actions = ActionList::new(message.user());

        match self {
            Prompt::Menu => {
                console.print(&format!("{}, please enter a command.\n", message.user()));
                actions.add("Teleport", commands::GET_TELEPORTS, vec![]);
                actions.add("World switch", commands::GET_WORLDSWITCHES, vec![]);
            }
            Prompt::Say => {
                console.print(&format!("server says {}\n", message.param(0)?));
                actions.add("Teleport", commands::GET_TELEPORTS, vec![]);
            }
            Prompt::Teleports => {
                let destinations: Vec<TeleportDestination> = unpack_list(message.param(0)?)?;
                for destination in &destinations {
                    actions.add(
                        &format!("Teleport to {}", destination.name),
                        commands::TELEPORT,
                        vec![destination.coords.to_string()],
                    );
                }
            }
            Prompt::WorldSwitches => {
                let options: Vec<WorldSwitchOption> = unpack_list(message.param(0)?)?;
                for option in &options {
                    actions.add(
                        &format!("Switch from {} to {}", option.from, option.to),
                        commands::WORLDSWITCH,
                        vec![option.from.clone(), option.to.clone()],
                    );
                }
            }
            Prompt::Report => {
                console.print(&format!("{}\n", message.param(0)?));
            }
        }

        // Every prompt below the top-level menu can navigate back to it
        if self != Prompt::Menu {
            actions.add("Back to menu", commands::MENU, vec![]);
        }

        Ok(actions.prompt(console))
    }
}

/// Drives the request/response loop on the console thread
pub struct PromptEngine<C: Console> {
    console: C,
}

impl<C: Console> PromptEngine<C> {
    pub fn new(console: C) -> Self {
        Self { console }
    }

    /// Handle one inbound body
    ///
    /// `Ok(None)` means the session is done: either quit was selected, or
    /// the inbound command maps to no prompt. No further command is sent.
    pub fn handle_message(
        &mut self,
        raw: &str,
    ) -> Result<Option<ProtocolMessage>, ProtocolError> {
        let message = ProtocolMessage::parse(raw)?;

        let Some(prompt) = Prompt::for_command(message.command()) else {
            return Ok(None);
        };

        let outbound = prompt.run(&message, &mut self.console)?;
        if commands::is_quit(outbound.command()) {
            return Ok(None);
        }
        Ok(Some(outbound))
    }
}
