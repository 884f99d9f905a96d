//! Recording host.
//!
//! Captures every effect the core applies, in order.

use qadmin::{Host, SessionId, Target};
use std::collections::HashMap;

/// One captured host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Text { to: Target, text: String, chat: bool },
    Console(String),
    Kick { session: SessionId, reason: String },
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<Call>,
    pub maps: Option<Vec<String>>,
    pub cvars: HashMap<String, String>,
}

#[allow(dead_code)]
impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Text sent to `to` on either channel.
    pub fn texts_to(&self, to: Target) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text { to: t, text, .. } if *t == to => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn console_lines(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Console(line) => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn kicked(&self) -> Vec<SessionId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Kick { session, .. } => Some(*session),
                _ => None,
            })
            .collect()
    }

    pub fn kick_reasons(&self) -> Vec<(SessionId, &str)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Kick { session, reason } => Some((*session, reason.as_str())),
                _ => None,
            })
            .collect()
    }
}

impl Host for RecordingHost {
    fn send_text(&mut self, to: Target, text: &str, chat: bool) {
        self.calls.push(Call::Text {
            to,
            text: text.to_string(),
            chat,
        });
    }

    fn execute_console_line(&mut self, line: &str) {
        self.calls.push(Call::Console(line.to_string()));
    }

    fn kick_session(&mut self, session: SessionId, reason: &str) {
        self.calls.push(Call::Kick {
            session,
            reason: reason.to_string(),
        });
    }

    fn map_exists(&self, map: &str) -> bool {
        match &self.maps {
            Some(maps) => maps.iter().any(|m| m.eq_ignore_ascii_case(map)),
            None => true,
        }
    }

    fn cvar(&self, name: &str) -> Option<String> {
        self.cvars.get(name).cloned()
    }

    fn maps(&self) -> Option<Vec<String>> {
        self.maps.clone()
    }
}
