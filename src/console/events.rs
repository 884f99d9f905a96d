//! Line-oriented event script for the simulation host.
//!
//! ```text
//! connect <id> <ip[:port]> <guid> <name...>
//! userinfo <id> <\key\value...>
//! disconnect <id>
//! cmd <id> <args...>
//! console <args...>
//! map <name>
//! maps <name...>
//! set <cvar> <value>
//! ```

use crate::state::{PlayerInfo, SessionId};
use qadmin_proto::{eq_ignore_case, split_args};
use thiserror::Error;

/// One scripted host notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Connect { session: SessionId, info: PlayerInfo },
    Userinfo { session: SessionId, info: String },
    Disconnect(SessionId),
    Command { session: SessionId, args: Vec<String> },
    Console(Vec<String>),
    Map(String),
    Maps(Vec<String>),
    Set { cvar: String, value: String },
}

/// A line that could not be turned into an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("unknown event '{0}'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("invalid session id '{0}'")]
    InvalidSession(String),
}

fn session(text: &str) -> Result<SessionId, EventError> {
    SessionId::parse_slot(text).ok_or_else(|| EventError::InvalidSession(text.to_string()))
}

impl Event {
    /// Parse one script line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Event>, EventError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        // Info strings are taken verbatim; everything else is tokenized.
        let mut raw = line.splitn(3, char::is_whitespace);
        let verb = raw.next().unwrap_or_default();
        if eq_ignore_case(verb, "userinfo") {
            let (Some(id), Some(info)) = (raw.next(), raw.next()) else {
                return Err(EventError::Usage("userinfo <id> <infostring>"));
            };
            return Ok(Some(Event::Userinfo {
                session: session(id)?,
                info: info.trim().to_string(),
            }));
        }

        let args = split_args(line);
        let event = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("connect", [_, id, ip, guid, name @ ..]) if !name.is_empty() => Event::Connect {
                session: session(id)?,
                info: PlayerInfo::new(ip.as_str(), guid.as_str(), name.join(" ")),
            },
            ("connect", _) => return Err(EventError::Usage("connect <id> <ip[:port]> <guid> <name>")),
            ("disconnect", [_, id]) => Event::Disconnect(session(id)?),
            ("disconnect", _) => return Err(EventError::Usage("disconnect <id>")),
            ("cmd", [_, id, rest @ ..]) if !rest.is_empty() => Event::Command {
                session: session(id)?,
                args: rest.to_vec(),
            },
            ("cmd", _) => return Err(EventError::Usage("cmd <id> <args...>")),
            ("console", [_, rest @ ..]) if !rest.is_empty() => Event::Console(rest.to_vec()),
            ("console", _) => return Err(EventError::Usage("console <args...>")),
            ("map", [_, name]) => Event::Map(name.clone()),
            ("map", _) => return Err(EventError::Usage("map <name>")),
            ("maps", [_, names @ ..]) => Event::Maps(names.to_vec()),
            ("set", [_, cvar, value @ ..]) => Event::Set {
                cvar: cvar.clone(),
                value: value.join(" "),
            },
            ("set", _) => return Err(EventError::Usage("set <cvar> <value>")),
            _ => return Err(EventError::Unknown(verb.to_string())),
        };
        Ok(Some(event))
    }
}
