//! Tracing span constructors shared by dispatch and the admin facade.

/// Standardized span constructors for admin observability.
pub mod spans {
    use crate::state::SessionId;
    use tracing::{Span, debug_span, info_span};

    /// Create a span for a command execution.
    pub fn command(name: &str, session: SessionId, say: bool) -> Span {
        if say {
            info_span!("command", name = %name, session = %session, via = "say")
        } else {
            info_span!("command", name = %name, session = %session)
        }
    }

    /// Create a span for a host notification.
    pub fn event(kind: &'static str, session: Option<SessionId>) -> Span {
        match session {
            Some(session) => debug_span!("event", kind = kind, session = %session),
            None => debug_span!("event", kind = kind),
        }
    }

    /// Create a span for a vote reaching its outcome.
    pub fn vote(action: &str) -> Span {
        info_span!("vote", action = %action)
    }
}
