//! Test server fixture.
//!
//! Wraps an [`Admin`] bound to a [`RecordingHost`] with helpers for the
//! usual setup: connecting players and granting access.

use super::host::RecordingHost;
use qadmin::{Access, Admin, Config, PlayerInfo, SessionId, Target, Verdict};
use std::time::Duration;

/// Split a typed line into arguments, quotes respected.
pub fn args(line: &str) -> Vec<String> {
    qadmin_proto::split_args(line)
}

pub struct TestServer {
    pub admin: Admin<RecordingHost>,
}

#[allow(dead_code)]
impl TestServer {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            admin: Admin::new(config, RecordingHost::new()),
        }
    }

    pub fn from_toml(toml: &str) -> Self {
        Self::with_config(Config::from_toml(toml).expect("valid test config"))
    }

    /// Connect `name` from `ip` in `slot`.
    pub fn connect(&mut self, slot: i32, ip: &str, name: &str) -> SessionId {
        let session = SessionId(slot);
        self.admin
            .on_connect(session, &PlayerInfo::new(ip, format!("GUID{slot}"), name));
        session
    }

    /// Set the stored access of a connected session.
    pub fn grant(&mut self, session: SessionId, access: Access) {
        self.admin
            .state_mut()
            .players
            .get_mut(session)
            .expect("connected session")
            .access = access;
    }

    pub fn cmd(&mut self, session: SessionId, line: &str) -> Verdict {
        self.admin.on_command(session, &args(line))
    }

    pub fn console(&mut self, line: &str) -> Verdict {
        self.admin.on_command(SessionId::CONSOLE, &args(line))
    }

    pub fn tick(&mut self, secs: u64) {
        self.admin.on_tick(Duration::from_secs(secs));
    }

    pub fn host(&mut self) -> &mut RecordingHost {
        self.admin.host_mut()
    }

    /// Text delivered to `session`.
    pub fn texts(&self, session: SessionId) -> Vec<String> {
        self.admin
            .host()
            .texts_to(Target::Session(session))
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn broadcasts(&self) -> Vec<String> {
        self.admin
            .host()
            .texts_to(Target::Broadcast)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn last_text(&self, session: SessionId) -> Option<String> {
        self.texts(session).pop()
    }

    pub fn last_text_broadcast(&self) -> Option<String> {
        self.broadcasts().pop()
    }

    pub fn console_lines(&self) -> Vec<String> {
        self.admin
            .host()
            .console_lines()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn kicked(&self) -> Vec<SessionId> {
        self.admin.host().kicked()
    }
}
