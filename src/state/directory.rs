//! Live directory of connected sessions.
//!
//! A key is present if and only if the session is connected; removing the
//! key is the disconnect. Resolution always materializes the full candidate
//! set before any caller acts on it.

use super::player::{PlayerInfo, PlayerRecord, SessionId};
use super::Access;
use crate::error::{HandlerError, InfoError};
use qadmin_proto::{contains_ignore_case, eq_ignore_case, strip_codes, strip_port};
use std::collections::BTreeMap;

/// Owner of every [`PlayerRecord`].
#[derive(Debug, Clone)]
pub struct PlayerDirectory {
    players: BTreeMap<SessionId, PlayerRecord>,
    default_access: Access,
    color_escape: Option<char>,
}

impl PlayerDirectory {
    pub fn new(default_access: Access, color_escape: Option<char>) -> Self {
        Self {
            players: BTreeMap::new(),
            default_access,
            color_escape,
        }
    }

    pub fn default_access(&self) -> Access {
        self.default_access
    }

    pub fn set_default_access(&mut self, access: Access) {
        self.default_access = access;
    }

    /// Change the color escape; stored stripped names are recomputed.
    pub fn set_color_escape(&mut self, escape: Option<char>) {
        self.color_escape = escape;
        for record in self.players.values_mut() {
            record.stripped = strip_codes(&record.name, escape).into_owned();
        }
    }

    /// Create or reset the record for `session`.
    ///
    /// Access returns to the default and the authed and gagged flags clear.
    pub fn connect(&mut self, session: SessionId, info: &PlayerInfo) -> Result<(), InfoError> {
        check_info(info)?;
        let record = self.new_record(info);
        self.players.insert(session, record);
        Ok(())
    }

    /// Refresh identity fields, keeping access, authed and gagged state.
    ///
    /// An unknown session is created as if it had just connected.
    pub fn update(&mut self, session: SessionId, info: &PlayerInfo) -> Result<(), InfoError> {
        check_info(info)?;
        let escape = self.color_escape;
        match self.players.get_mut(&session) {
            Some(record) => {
                record.name = info.name.clone();
                record.stripped = strip_codes(&info.name, escape).into_owned();
                record.ip = strip_port(&info.ip).to_string();
                record.guid = info.guid.clone();
            }
            None => {
                let record = self.new_record(info);
                self.players.insert(session, record);
            }
        }
        Ok(())
    }

    pub fn disconnect(&mut self, session: SessionId) -> Option<PlayerRecord> {
        self.players.remove(&session)
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    fn new_record(&self, info: &PlayerInfo) -> PlayerRecord {
        PlayerRecord {
            name: info.name.clone(),
            stripped: strip_codes(&info.name, self.color_escape).into_owned(),
            ip: strip_port(&info.ip).to_string(),
            guid: info.guid.clone(),
            access: self.default_access,
            authed: false,
            gagged: false,
        }
    }

    pub fn get(&self, session: SessionId) -> Option<&PlayerRecord> {
        self.players.get(&session)
    }

    pub fn get_mut(&mut self, session: SessionId) -> Option<&mut PlayerRecord> {
        self.players.get_mut(&session)
    }

    pub fn is_connected(&self, session: SessionId) -> bool {
        self.players.contains_key(&session)
    }

    /// Connected sessions in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SessionId, &PlayerRecord)> {
        self.players.iter().map(|(id, record)| (*id, record))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Display name of `session`, `"Console"` for the console.
    pub fn display_name(&self, session: SessionId) -> String {
        if session.is_console() {
            return "Console".to_string();
        }
        self.players
            .get(&session)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Access control
    // ------------------------------------------------------------------------

    /// Check whether `session` holds every bit of `required`.
    ///
    /// The console always passes, unknown sessions never do, and the default
    /// access is OR'd into every stored value.
    pub fn has_access(&self, session: SessionId, required: Access) -> bool {
        if session.is_console() {
            return true;
        }
        match self.players.get(&session) {
            Some(record) => (record.access | self.default_access).contains(required),
            None => false,
        }
    }

    pub fn is_immune(&self, session: SessionId) -> bool {
        self.has_access(session, Access::IMMUNITY)
    }

    // ------------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------------

    /// Resolve a typed name to candidate sessions.
    ///
    /// A case-insensitive exact match on the display or stripped name wins
    /// outright. Otherwise every session whose display or stripped name
    /// contains `query` is returned.
    pub fn resolve_by_name(&self, query: &str) -> Vec<SessionId> {
        let mut partial = Vec::new();
        for (id, record) in &self.players {
            if eq_ignore_case(&record.name, query) || eq_ignore_case(&record.stripped, query) {
                return vec![*id];
            }
            if contains_ignore_case(&record.name, query)
                || contains_ignore_case(&record.stripped, query)
            {
                partial.push(*id);
            }
        }
        partial
    }

    /// Sessions whose name contains `query`, without exact-match precedence.
    pub fn search(&self, query: &str) -> Vec<SessionId> {
        self.players
            .iter()
            .filter(|(_, r)| {
                contains_ignore_case(&r.name, query) || contains_ignore_case(&r.stripped, query)
            })
            .map(|(id, _)| *id)
            .collect()
    }

    /// Sessions whose address equals `ip` exactly.
    pub fn resolve_by_ip(&self, ip: &str) -> Vec<SessionId> {
        self.players
            .iter()
            .filter(|(_, r)| r.ip == ip)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Resolve a typed name to exactly one session.
    pub fn resolve_one(&self, query: &str) -> Result<SessionId, HandlerError> {
        match self.resolve_by_name(query).as_slice() {
            [] => Err(HandlerError::NoMatch(query.to_string())),
            [only] => Ok(*only),
            _ => Err(HandlerError::Ambiguous(query.to_string())),
        }
    }

    /// Resolve a typed slot number to a connected session.
    pub fn resolve_slot(&self, text: &str) -> Result<SessionId, HandlerError> {
        SessionId::parse_slot(text)
            .filter(|id| self.is_connected(*id))
            .ok_or_else(|| HandlerError::InvalidSlot(text.to_string()))
    }
}

impl Default for PlayerDirectory {
    fn default() -> Self {
        Self::new(Access::LEVEL_1, Some(qadmin_proto::COLOR_ESCAPE))
    }
}

fn check_info(info: &PlayerInfo) -> Result<(), InfoError> {
    for (field, value) in [("ip", &info.ip), ("cl_guid", &info.guid), ("name", &info.name)] {
        if !qadmin_proto::validate_info(value) {
            return Err(InfoError::UnsafeField(field));
        }
    }
    Ok(())
}
