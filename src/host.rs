//! The engine collaborator interface.
//!
//! The core never talks to an engine directly. Handlers queue [`Effect`]s in
//! an [`Outbox`]; once the handler has returned, the caller applies them to
//! a [`Host`]. Queries that do not mutate the engine (map existence, cvar
//! values) go straight to the host.

use crate::error::NOTICE_PREFIX;
use crate::state::SessionId;

/// Recipient of a text message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Session(SessionId),
    Broadcast,
}

impl From<SessionId> for Target {
    fn from(session: SessionId) -> Self {
        Target::Session(session)
    }
}

/// One engine embedding of the administration core.
pub trait Host {
    /// Deliver text on the print channel, or the chat channel when `chat`.
    fn send_text(&mut self, to: Target, text: &str, chat: bool);

    /// Run a line on the server console. Every interpolated value is sanitized.
    fn execute_console_line(&mut self, line: &str);

    fn kick_session(&mut self, session: SessionId, reason: &str);

    /// Whether the engine can load `map`.
    fn map_exists(&self, _map: &str) -> bool {
        true
    }

    /// Current value of a cvar, if the host exposes it.
    fn cvar(&self, _name: &str) -> Option<String> {
        None
    }

    /// Maps available on the server, if the host can list them.
    fn maps(&self) -> Option<Vec<String>> {
        None
    }
}

/// An action requested by a handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Text { to: Target, text: String, chat: bool },
    Console(String),
    Kick { session: SessionId, reason: String },
    /// Re-read configuration; performed by the admin facade, not the host.
    Reload,
}

/// Ordered queue of effects produced while handling one event.
#[derive(Debug, Default)]
pub struct Outbox {
    effects: Vec<Effect>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a `[QADMIN]`-prefixed notice on the print channel.
    pub fn notice(&mut self, to: impl Into<Target>, text: impl AsRef<str>) {
        self.print(to, format!("{NOTICE_PREFIX}{}", text.as_ref()));
    }

    /// Queue raw text on the print channel.
    pub fn print(&mut self, to: impl Into<Target>, text: impl Into<String>) {
        self.effects.push(Effect::Text {
            to: to.into(),
            text: text.into(),
            chat: false,
        });
    }

    /// Queue raw text on the chat channel.
    pub fn chat(&mut self, to: impl Into<Target>, text: impl Into<String>) {
        self.effects.push(Effect::Text {
            to: to.into(),
            text: text.into(),
            chat: true,
        });
    }

    pub fn console(&mut self, line: impl Into<String>) {
        self.effects.push(Effect::Console(line.into()));
    }

    pub fn kick(&mut self, session: SessionId, reason: impl Into<String>) {
        self.effects.push(Effect::Kick {
            session,
            reason: reason.into(),
        });
    }

    pub fn reload(&mut self) {
        self.effects.push(Effect::Reload);
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn into_effects(self) -> Vec<Effect> {
        self.effects
    }
}
