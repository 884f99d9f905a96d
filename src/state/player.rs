//! Session identifiers and per-session player records.

use super::Access;
use std::fmt;

/// Opaque identifier for one connection, as assigned by the engine.
///
/// Engines number client slots from zero. The operator console is the
/// pseudo-session [`SessionId::CONSOLE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub i32);

impl SessionId {
    /// The server-console pseudo-session.
    pub const CONSOLE: SessionId = SessionId(-2);

    #[inline]
    pub const fn is_console(self) -> bool {
        self.0 == Self::CONSOLE.0
    }

    /// Parse a slot number typed by an operator.
    ///
    /// Only non-negative integers name a slot.
    pub fn parse_slot(text: &str) -> Option<SessionId> {
        match text.trim().parse::<i32>() {
            Ok(slot) if slot >= 0 => Some(SessionId(slot)),
            _ => None,
        }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_console() {
            f.write_str("console")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Identity attributes reported by the engine on connect and info change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerInfo {
    /// Address, with or without a `:port` suffix.
    pub ip: String,
    /// Client identity token (`cl_guid`).
    pub guid: String,
    /// Raw display name, color codes included.
    pub name: String,
}

impl PlayerInfo {
    pub fn new(ip: impl Into<String>, guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            guid: guid.into(),
            name: name.into(),
        }
    }
}

/// One connected session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerRecord {
    pub name: String,
    /// `name` with color codes removed.
    pub stripped: String,
    /// Host portion of the address; the port is never stored.
    pub ip: String,
    pub guid: String,
    pub access: Access,
    pub authed: bool,
    pub gagged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slot() {
        assert_eq!(SessionId::parse_slot("3"), Some(SessionId(3)));
        assert_eq!(SessionId::parse_slot(" 12 "), Some(SessionId(12)));
        assert_eq!(SessionId::parse_slot("-2"), None);
        assert_eq!(SessionId::parse_slot("bob"), None);
        assert_eq!(SessionId::parse_slot(""), None);
    }

    #[test]
    fn test_console_display() {
        assert_eq!(SessionId::CONSOLE.to_string(), "console");
        assert_eq!(SessionId(7).to_string(), "7");
        assert!(SessionId::CONSOLE.is_console());
        assert!(!SessionId(0).is_console());
    }
}
