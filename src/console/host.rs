//! In-memory host used by the `qadmind` simulation.
//!
//! Output is buffered as printable lines. Console lines the engine would
//! interpret (`map`, `set`) update the simulated cvars; kicks are queued as
//! disconnects for the driver to deliver back to the core.

use crate::host::{Host, Target};
use crate::state::SessionId;
use qadmin_proto::{eq_ignore_case, split_args};
use std::collections::HashMap;

/// Simulated engine.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    output: Vec<String>,
    maps: Vec<String>,
    cvars: HashMap<String, String>,
    kicked: Vec<SessionId>,
    map_change: Option<String>,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list of installed maps. An empty list accepts any map.
    pub fn set_maps(&mut self, maps: Vec<String>) {
        self.maps = maps;
    }

    pub fn set_cvar(&mut self, name: &str, value: impl Into<String>) {
        self.cvars.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Take the lines produced since the last call.
    pub fn drain_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Take the sessions kicked since the last call.
    pub fn take_kicked(&mut self) -> Vec<SessionId> {
        std::mem::take(&mut self.kicked)
    }

    /// Take the map requested by a `map` console line, if any.
    pub fn take_map_change(&mut self) -> Option<String> {
        self.map_change.take()
    }

    /// Change the current map as the engine would.
    pub fn change_map(&mut self, map: &str) {
        self.set_cvar("mapname", map);
        self.output.push(format!("map: {map}"));
    }

    fn interpret(&mut self, line: &str) {
        let args = split_args(line);
        match args.as_slice() {
            [cmd, map, ..] if eq_ignore_case(cmd, "map") => {
                if self.map_exists(map) {
                    self.map_change = Some(map.clone());
                }
            }
            [cmd, name, value, ..] if eq_ignore_case(cmd, "set") => self.set_cvar(name, value.as_str()),
            [cmd, name] if eq_ignore_case(cmd, "set") => self.set_cvar(name, ""),
            _ => {}
        }
    }
}

impl Host for ConsoleHost {
    fn send_text(&mut self, to: Target, text: &str, chat: bool) {
        let channel = if chat { "chat" } else { "print" };
        let line = match to {
            Target::Broadcast => format!("{channel} *: {text}"),
            Target::Session(session) => format!("{channel} {session}: {text}"),
        };
        self.output.push(line);
    }

    fn execute_console_line(&mut self, line: &str) {
        self.output.push(format!("console: {line}"));
        self.interpret(line);
    }

    fn kick_session(&mut self, session: SessionId, reason: &str) {
        self.output.push(format!("kick {session}: {reason}"));
        if !self.kicked.contains(&session) {
            self.kicked.push(session);
        }
    }

    fn map_exists(&self, map: &str) -> bool {
        self.maps.is_empty() || self.maps.iter().any(|m| eq_ignore_case(m, map))
    }

    fn cvar(&self, name: &str) -> Option<String> {
        self.cvars.get(&name.to_ascii_lowercase()).cloned()
    }

    fn maps(&self) -> Option<Vec<String>> {
        (!self.maps.is_empty()).then(|| self.maps.clone())
    }
}
