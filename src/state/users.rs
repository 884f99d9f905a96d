//! Registered login credentials.

use super::player::PlayerRecord;
use super::Access;
use crate::error::CredentialError;
use qadmin_proto::eq_ignore_case;
use serde::Deserialize;
use std::fmt;

/// Which session attribute a credential is matched against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Ip,
    Name,
    Id,
}

impl MatchKind {
    /// Parse the suffix of an `admin_adduser_<kind>` console command.
    pub fn from_suffix(suffix: &str) -> Option<MatchKind> {
        match suffix.to_ascii_lowercase().as_str() {
            "ip" => Some(MatchKind::Ip),
            "name" => Some(MatchKind::Name),
            "id" => Some(MatchKind::Id),
            _ => None,
        }
    }

    /// The attribute of `record` this kind compares against.
    fn select<'a>(&self, record: &'a PlayerRecord) -> &'a str {
        match self {
            MatchKind::Ip => &record.ip,
            MatchKind::Name => &record.name,
            MatchKind::Id => &record.guid,
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchKind::Ip => "IP",
            MatchKind::Name => "name",
            MatchKind::Id => "ID",
        })
    }
}

/// One login entry. Also the shape of a `[[user]]` config block.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credential {
    pub kind: MatchKind,
    pub user: String,
    pub password: String,
    pub access: Access,
}

impl Credential {
    pub fn new(kind: MatchKind, user: impl Into<String>, password: impl Into<String>, access: Access) -> Self {
        Self {
            kind,
            user: user.into(),
            password: password.into(),
            access,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("kind", &self.kind)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("access", &self.access)
            .finish()
    }
}

/// Ordered credential collection. Insertion order decides login precedence.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    entries: Vec<Credential>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a credential unless one with the same kind and user exists.
    pub fn add(&mut self, credential: Credential) -> Result<(), CredentialError> {
        let duplicate = self
            .entries
            .iter()
            .any(|c| c.kind == credential.kind && eq_ignore_case(&c.user, &credential.user));
        if duplicate {
            return Err(CredentialError::Duplicate {
                kind: credential.kind,
                user: credential.user,
            });
        }
        self.entries.push(credential);
        Ok(())
    }

    /// Return the access of the first credential matching `record` and `password`.
    pub fn authenticate(&self, record: &PlayerRecord, password: &str) -> Option<Access> {
        self.entries
            .iter()
            .find(|c| {
                eq_ignore_case(&c.user, c.kind.select(record)) && eq_ignore_case(&c.password, password)
            })
            .map(|c| c.access)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PlayerRecord {
        PlayerRecord {
            name: "^1Admin".into(),
            stripped: "Admin".into(),
            ip: "10.0.0.5".into(),
            guid: "ABCDEF".into(),
            access: Access::LEVEL_1,
            authed: false,
            gagged: false,
        }
    }

    #[test]
    fn test_duplicate_is_rejected_case_insensitively() {
        let mut store = UserStore::new();
        store.add(Credential::new(MatchKind::Name, "Admin", "a", Access(1))).unwrap();
        let err = store
            .add(Credential::new(MatchKind::Name, "ADMIN", "other", Access(9)))
            .unwrap_err();
        assert_eq!(err, CredentialError::Duplicate { kind: MatchKind::Name, user: "ADMIN".into() });
        assert_eq!(store.len(), 1);

        // Same user under another kind is a distinct entry.
        store.add(Credential::new(MatchKind::Ip, "Admin", "a", Access(1))).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_authenticate_first_match_wins() {
        let mut store = UserStore::new();
        store.add(Credential::new(MatchKind::Id, "abcdef", "pw", Access(7))).unwrap();
        store.add(Credential::new(MatchKind::Ip, "10.0.0.5", "pw", Access(99))).unwrap();
        assert_eq!(store.authenticate(&record(), "PW"), Some(Access(7)));
    }

    #[test]
    fn test_authenticate_name_uses_raw_display_name() {
        let mut store = UserStore::new();
        store.add(Credential::new(MatchKind::Name, "Admin", "pw", Access(3))).unwrap();
        assert_eq!(store.authenticate(&record(), "pw"), None);

        store.add(Credential::new(MatchKind::Name, "^1admin", "pw", Access(5))).unwrap();
        assert_eq!(store.authenticate(&record(), "pw"), Some(Access(5)));
    }

    #[test]
    fn test_wrong_password_fails() {
        let mut store = UserStore::new();
        store.add(Credential::new(MatchKind::Ip, "10.0.0.5", "secret", Access(3))).unwrap();
        assert_eq!(store.authenticate(&record(), "guess"), None);
    }

    #[test]
    fn test_debug_redacts_password() {
        let cred = Credential::new(MatchKind::Ip, "1.2.3.4", "hunter2", Access(1));
        assert!(!format!("{cred:?}").contains("hunter2"));
    }

    #[test]
    fn test_from_suffix() {
        assert_eq!(MatchKind::from_suffix("IP"), Some(MatchKind::Ip));
        assert_eq!(MatchKind::from_suffix("id"), Some(MatchKind::Id));
        assert_eq!(MatchKind::from_suffix("guid"), None);
    }
}
