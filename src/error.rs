//! Unified error handling for qadmin.
//!
//! Every failure the core can produce is a caller-correctable condition:
//! it becomes a one-line notice to the invoking session and never aborts
//! event processing.

use crate::state::MatchKind;
use thiserror::Error;

/// Prefix carried by every notice the core composes.
pub const NOTICE_PREFIX: &str = "[QADMIN] ";

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("Missing parameters, usage: {usage}")]
    NeedMoreParams { usage: String },

    #[error("You do not have access to that command: '{0}'")]
    NoAccess(String),

    #[error("No player matches '{0}'")]
    NoMatch(String),

    #[error("More than one player matches '{0}', be more specific")]
    Ambiguous(String),

    #[error("Invalid slot id '{0}'")]
    InvalidSlot(String),

    #[error("Cannot {action} {name}, user has immunity")]
    Immune { action: &'static str, name: String },

    #[error("{0} is already gagged")]
    AlreadyGagged(String),

    #[error("{0} is not gagged")]
    NotGagged(String),

    #[error("Sorry, you have been gagged.")]
    Gagged,

    #[error("Unknown map '{0}'")]
    UnknownMap(String),

    #[error("Trying to {0} from the server console, eh?")]
    ConsoleNotAllowed(&'static str),

    #[error("Trying to login multiple times, eh?")]
    AlreadyAuthenticated,

    #[error(transparent)]
    Vote(#[from] VoteError),
}

/// Error taxonomy used for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-correctable misuse: bad arguments, unknown or ambiguous target.
    User,
    /// Insufficient access or a protected target.
    Denied,
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams { .. } => "need_more_params",
            Self::NoAccess(_) => "no_access",
            Self::NoMatch(_) => "no_match",
            Self::Ambiguous(_) => "ambiguous",
            Self::InvalidSlot(_) => "invalid_slot",
            Self::Immune { .. } => "immune",
            Self::AlreadyGagged(_) => "already_gagged",
            Self::NotGagged(_) => "not_gagged",
            Self::Gagged => "gagged",
            Self::UnknownMap(_) => "unknown_map",
            Self::ConsoleNotAllowed(_) => "console_not_allowed",
            Self::AlreadyAuthenticated => "already_authenticated",
            Self::Vote(e) => e.error_code(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoAccess(_) | Self::Immune { .. } | Self::ConsoleNotAllowed(_) | Self::Gagged => {
                ErrorKind::Denied
            }
            _ => ErrorKind::User,
        }
    }

    /// Render the notice sent back to the invoking session.
    pub fn to_notice(&self) -> String {
        format!("{NOTICE_PREFIX}{self}")
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<crate::handlers::Verdict, HandlerError>;

// ============================================================================
// Vote Errors
// ============================================================================

/// Vote engine errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VoteError {
    #[error("A vote is already running")]
    AlreadyRunning,

    #[error("There is no vote currently running")]
    NotRunning,

    #[error("You have already voted for {0}")]
    AlreadyVoted(u8),

    #[error("Invalid vote option, choose from 1-{max}")]
    InvalidChoice { max: u8 },

    #[error("A vote needs between 2 and 9 choices, got {0}")]
    InvalidChoices(u8),
}

impl VoteError {
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyRunning => "vote_already_running",
            Self::NotRunning => "vote_not_running",
            Self::AlreadyVoted(_) => "vote_already_cast",
            Self::InvalidChoice { .. } => "vote_invalid_choice",
            Self::InvalidChoices(_) => "vote_invalid_choices",
        }
    }
}

// ============================================================================
// State Errors
// ============================================================================

/// Credential store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("User {kind} entry already exists for \"{user}\"")]
    Duplicate { kind: MatchKind, user: String },
}

/// Rejected connect or info-change notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InfoError {
    #[error("userinfo {0} contains a quote or semicolon")]
    UnsafeField(&'static str),

    #[error("userinfo string contains a quote or semicolon")]
    UnsafeInfoString,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_codes() {
        assert_eq!(
            HandlerError::NeedMoreParams { usage: "admin_kick <name>".into() }.error_code(),
            "need_more_params"
        );
        assert_eq!(HandlerError::Ambiguous("bo".into()).error_code(), "ambiguous");
        assert_eq!(
            HandlerError::Vote(VoteError::NotRunning).error_code(),
            "vote_not_running"
        );
    }

    #[test]
    fn test_handler_error_kind() {
        assert_eq!(HandlerError::NoAccess("admin_ban".into()).kind(), ErrorKind::Denied);
        let immune = HandlerError::Immune { action: "kick", name: "Boss".into() };
        assert_eq!(immune.kind(), ErrorKind::Denied);
        assert_eq!(HandlerError::NoMatch("x".into()).kind(), ErrorKind::User);
        assert_eq!(HandlerError::Vote(VoteError::AlreadyVoted(1)).kind(), ErrorKind::User);
    }

    #[test]
    fn test_handler_error_to_notice() {
        let notice = HandlerError::Immune { action: "ban", name: "Boss".into() }.to_notice();
        assert_eq!(notice, "[QADMIN] Cannot ban Boss, user has immunity");

        let notice = HandlerError::Vote(VoteError::InvalidChoice { max: 2 }).to_notice();
        assert_eq!(notice, "[QADMIN] Invalid vote option, choose from 1-2");
    }

    #[test]
    fn test_credential_error_display() {
        let err = CredentialError::Duplicate { kind: MatchKind::Name, user: "Admin".into() };
        assert_eq!(err.to_string(), "User name entry already exists for \"Admin\"");
    }
}
